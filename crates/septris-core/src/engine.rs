//! The simulation engine — sessions, scoring, and the level state machine.
//!
//! All mutation goes through `start_level`, `tick`, `apply_order`, and
//! `poll_advance`. Each call either fully commits or fully no-ops; the
//! caller is expected to serialize them (see [`crate::shell`]).

use serde::{Deserialize, Serialize};

use septris_logic::config::SimConfig;
use septris_logic::orders::OrderKind;
use septris_logic::patients;
use septris_logic::rules::{self, PatientStatus, TickOutcome, HEALTH_MAX, HEALTH_MIN, POSITION_MAX, POSITION_MIN};

use crate::error::{LevelError, OrderError};
use crate::session::{PatientSession, SessionSnapshot};

/// Where the current level stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPhase {
    /// No level loaded (menu).
    Idle,
    /// Sessions are live.
    LevelInProgress,
    /// Every session is cured; the advance fires once the grace delay
    /// passes. Nothing cancels it short of engine teardown.
    LevelClearedPending { advance_at_ms: u64 },
    /// The last defined level has been cleared.
    AllLevelsComplete,
}

/// Transient acknowledgment that an order was just placed. Expired
/// entries carry no gameplay effect and are pruned on the next tick; the
/// presentation layer filters by its own clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAck {
    pub session_id: u32,
    pub order: OrderKind,
    pub expires_at_ms: u64,
}

/// What a successful order placement did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderReceipt {
    pub order: OrderKind,
    pub correct: bool,
    pub points: i32,
}

/// Full game state for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub level: u8,
    pub score: u32,
    pub elapsed_secs: u64,
    pub phase: LevelPhase,
    pub sessions: Vec<SessionSnapshot>,
    pub recent_orders: Vec<OrderAck>,
}

/// The simulation engine. One instance per play-through.
#[derive(Debug)]
pub struct SimulationEngine {
    config: SimConfig,
    level: u8,
    sessions: Vec<PatientSession>,
    score: u32,
    elapsed_secs: u64,
    phase: LevelPhase,
    next_session_id: u32,
    acks: Vec<OrderAck>,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            level: 0,
            sessions: Vec::new(),
            score: 0,
            elapsed_secs: 0,
            phase: LevelPhase::Idle,
            next_session_id: 1,
            acks: Vec::new(),
        }
    }

    /// Replace the session set with fresh admissions for `level`.
    ///
    /// Cumulative score and elapsed time are left alone — only
    /// [`SimulationEngine::reset_game`] clears those.
    pub fn start_level(&mut self, level: u8) -> Result<(), LevelError> {
        let roster = patients::level_roster(level).ok_or(LevelError::InvalidLevel(level))?;

        self.sessions = roster
            .iter()
            .map(|template| {
                let id = self.next_session_id;
                self.next_session_id += 1;
                PatientSession::admit(id, template, &self.config)
            })
            .collect();
        self.level = level;
        self.phase = LevelPhase::LevelInProgress;
        self.acks.clear();
        log::info!("level {} started with {} patients", level, self.sessions.len());
        Ok(())
    }

    /// Explicit game reset: zero the aggregates and reseed level 1.
    pub fn reset_game(&mut self) {
        self.reset_game_at(1).expect("level 1 is always defined");
    }

    /// Game reset seeding an arbitrary starting level. State is unchanged
    /// when the level is invalid.
    pub fn reset_game_at(&mut self, level: u8) -> Result<(), LevelError> {
        self.start_level(level)?;
        self.score = 0;
        self.elapsed_secs = 0;
        Ok(())
    }

    /// Teardown to the idle state. Discards sessions, acknowledgments,
    /// and any pending level advance.
    pub fn clear(&mut self) {
        self.sessions.clear();
        self.acks.clear();
        self.level = 0;
        self.phase = LevelPhase::Idle;
    }

    /// Advance every active session by one fixed tick.
    ///
    /// `now_ms` is the driver's monotonic clock, used only to stamp the
    /// level-advance deadline and prune expired acknowledgments.
    pub fn tick(&mut self, now_ms: u64) {
        if self.phase == LevelPhase::Idle || self.phase == LevelPhase::AllLevelsComplete {
            return;
        }

        let period_secs = self.config.tick_period_ms / 1000;
        for session in &mut self.sessions {
            if !session.is_active() {
                continue;
            }
            let bundled = session.bundle_complete();
            let any_applied = !session.applied_orders.is_empty();
            match rules::evaluate_tick(
                session.health,
                session.position,
                bundled,
                any_applied,
                &self.config,
            ) {
                TickOutcome::Died => {
                    session.status = PatientStatus::Died;
                    session.health = HEALTH_MIN;
                    session.position = POSITION_MIN;
                    session.needs_attention = false;
                    log::info!("patient {} ({}) died", session.id, session.template.name);
                }
                TickOutcome::Cured => {
                    session.status = PatientStatus::Cured;
                    session.health = HEALTH_MAX;
                    session.position = POSITION_MAX;
                    session.needs_attention = false;
                    log::info!("patient {} ({}) cured", session.id, session.template.name);
                }
                TickOutcome::Active {
                    health,
                    position,
                    needs_attention,
                } => {
                    session.health = health;
                    session.position = position;
                    session.time_elapsed_secs += period_secs;
                    session.needs_attention = needs_attention;
                }
            }
        }

        self.elapsed_secs += period_secs;
        self.acks.retain(|ack| ack.expires_at_ms > now_ms);

        let all_cured = !self.sessions.is_empty()
            && self.sessions.iter().all(|s| s.status == PatientStatus::Cured);
        if self.phase == LevelPhase::LevelInProgress && all_cured {
            let advance_at_ms = now_ms + self.config.level_advance_delay_ms;
            self.phase = LevelPhase::LevelClearedPending { advance_at_ms };
            log::info!("level {} cleared, advancing at {}ms", self.level, advance_at_ms);
        }
    }

    /// Fire a due level advance, if any. Returns `true` when the phase
    /// changed (next level started or all levels complete).
    pub fn poll_advance(&mut self, now_ms: u64) -> bool {
        let LevelPhase::LevelClearedPending { advance_at_ms } = self.phase else {
            return false;
        };
        if now_ms < advance_at_ms {
            return false;
        }
        let next = self.level + 1;
        if self.start_level(next).is_err() {
            self.phase = LevelPhase::AllLevelsComplete;
            log::info!("all levels complete");
        }
        true
    }

    /// Place an order on a session.
    ///
    /// Preconditions are checked in order: live session, known order id,
    /// not already placed. A failure mutates nothing.
    pub fn apply_order(
        &mut self,
        session_id: u32,
        order_id: u8,
        now_ms: u64,
    ) -> Result<OrderReceipt, OrderError> {
        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .filter(|s| s.is_active())
            .ok_or(OrderError::SessionNotActive(session_id))?;
        let order = OrderKind::from_u8(order_id).ok_or(OrderError::UnknownOrder(order_id))?;
        if session.has_order(order) {
            return Err(OrderError::AlreadyApplied(order));
        }

        let correct = session.template.correct_orders.contains(&order);
        session.applied_orders.push(order);
        session.health =
            rules::clamp_health(session.health + rules::order_health_adjust(correct, &self.config));

        let points = rules::order_points(order, correct, &self.config);
        self.score = rules::apply_points(self.score, points);
        self.acks.push(OrderAck {
            session_id,
            order,
            expires_at_ms: now_ms + self.config.order_ack_ms,
        });
        log::debug!(
            "order {} on patient {}: correct={} points={}",
            order.spec().order_name,
            session_id,
            correct,
            points
        );
        Ok(OrderReceipt {
            order,
            correct,
            points,
        })
    }

    // ── Read accessors ──────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    pub fn sessions(&self) -> &[PatientSession] {
        &self.sessions
    }

    pub fn session(&self, id: u32) -> Option<&PatientSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Acknowledgments that have not expired as of `now_ms`.
    pub fn recent_orders(&self, now_ms: u64) -> Vec<OrderAck> {
        self.acks
            .iter()
            .copied()
            .filter(|ack| ack.expires_at_ms > now_ms)
            .collect()
    }

    pub fn snapshot(&self, now_ms: u64) -> GameSnapshot {
        GameSnapshot {
            level: self.level,
            score: self.score,
            elapsed_secs: self.elapsed_secs,
            phase: self.phase,
            sessions: self.sessions.iter().map(|s| s.snapshot()).collect(),
            recent_orders: self.recent_orders(now_ms),
        }
    }
}
