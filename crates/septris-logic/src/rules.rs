//! Tick rules, terminal outcomes, and scoring arithmetic.
//!
//! The per-tick trajectory rules and per-order adjustments — all as pure
//! functions over plain values. The engine owns the state; this module
//! owns the math.

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::orders::OrderKind;

/// Health bounds. Terminal transitions force health to one of these.
pub const HEALTH_MIN: f32 = 0.0;
pub const HEALTH_MAX: f32 = 100.0;

/// Position bounds. Position is the trajectory indicator between critical
/// deterioration (low) and full recovery (high).
pub const POSITION_MIN: f32 = 5.0;
pub const POSITION_MAX: f32 = 95.0;

/// Below this health an unbundled session raises the attention flag.
pub const ATTENTION_HEALTH: f32 = 30.0;

/// Lifecycle state of a patient session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatientStatus {
    Active,
    Cured,
    Died,
}

impl PatientStatus {
    /// Banner text the chart header shows for this state.
    pub fn chart_label(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Cured => "STABLE",
            Self::Died => "CRITICAL",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// Result of advancing one session by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Session died. Health/position are forced to the floor.
    Died,
    /// Session cured. Health/position are forced to the ceiling.
    Cured,
    /// Session continues with the new values.
    Active {
        health: f32,
        position: f32,
        needs_attention: bool,
    },
}

/// True when every essential member of `correct` has been applied.
///
/// Vacuously true for a case with no essential correct orders.
pub fn bundle_complete(correct: &[OrderKind], applied: &[OrderKind]) -> bool {
    correct
        .iter()
        .filter(|o| o.spec().essential)
        .all(|o| applied.contains(o))
}

/// Per-tick health delta for one session.
///
/// Full recovery once the essential bundle is in; slowed decay for any
/// effort at all; baseline decay for an untouched patient.
pub fn tick_health_delta(bundle_complete: bool, any_applied: bool, config: &SimConfig) -> f32 {
    if bundle_complete {
        config.bundle_complete_gain
    } else if any_applied {
        -config.partial_effort_decay
    } else {
        -config.untreated_decay
    }
}

pub fn clamp_health(health: f32) -> f32 {
    health.clamp(HEALTH_MIN, HEALTH_MAX)
}

/// Step position by one unit in the direction of the health delta.
///
/// Only the sign of the delta matters; magnitude never does.
pub fn step_position(position: f32, health_delta: f32) -> f32 {
    let step = if health_delta > 0.0 { 1.0 } else { -1.0 };
    (position + step).clamp(POSITION_MIN, POSITION_MAX)
}

/// Advance one session by one tick.
///
/// Terminal checks run against the *new* values; death takes precedence
/// when both thresholds are met on the same tick.
pub fn evaluate_tick(
    health: f32,
    position: f32,
    bundle_complete: bool,
    any_applied: bool,
    config: &SimConfig,
) -> TickOutcome {
    let delta = tick_health_delta(bundle_complete, any_applied, config);
    let new_health = clamp_health(health + delta);
    let new_position = step_position(position, delta);

    if new_health <= config.death_health || new_position <= config.death_position {
        TickOutcome::Died
    } else if new_health >= config.cure_health && new_position >= config.cure_position {
        TickOutcome::Cured
    } else {
        TickOutcome::Active {
            health: new_health,
            position: new_position,
            needs_attention: new_health < ATTENTION_HEALTH && !bundle_complete,
        }
    }
}

/// Health adjustment for placing an order, before clamping.
pub fn order_health_adjust(is_correct: bool, config: &SimConfig) -> f32 {
    if is_correct {
        config.correct_order_bonus
    } else {
        -config.wrong_order_penalty
    }
}

/// Points earned (or lost) for placing an order.
pub fn order_points(order: OrderKind, is_correct: bool, config: &SimConfig) -> i32 {
    if is_correct {
        order.spec().points
    } else {
        -config.wrong_order_score_penalty
    }
}

/// Apply a point delta to the running score, which never goes negative.
pub fn apply_points(score: u32, points: i32) -> u32 {
    if points >= 0 {
        score.saturating_add(points as u32)
    } else {
        score.saturating_sub(points.unsigned_abs())
    }
}

/// Format elapsed seconds as `m:ss` for the status bar.
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
