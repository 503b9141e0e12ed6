//! Septris Headless Simulation Harness
//!
//! Validates catalog data, tick rules, and full play-throughs without
//! timers, rendering, or any presentation layer. Runs entirely
//! in-process.
//!
//! Usage:
//!   cargo run -p septris-simtest
//!   cargo run -p septris-simtest -- --verbose

use septris_core::{GameShell, GameSnapshot, LevelPhase, OrderError, SimulationEngine};
use septris_logic::config::{validate_config, SimConfig};
use septris_logic::orders::{OrderCategory, OrderKind};
use septris_logic::patients::{level_roster, LEVEL_COUNT};
use septris_logic::rules::{self, PatientStatus, TickOutcome};

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn check(name: &str, passed: bool, detail: String) -> Self {
        Self {
            name: name.into(),
            passed,
            detail,
        }
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Septris Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Catalog consistency
    results.extend(validate_catalog(verbose));

    // 2. Tick rule sweep
    results.extend(validate_tick_rules(verbose));

    // 3. Order application
    results.extend(validate_order_application(verbose));

    // 4. Full play-throughs
    results.extend(validate_playthroughs(verbose));

    // 5. Snapshot round-trip
    results.extend(validate_snapshots(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Catalog consistency ──────────────────────────────────────────────

fn validate_catalog(_verbose: bool) -> Vec<TestResult> {
    println!("--- Catalog ---");
    let mut results = Vec::new();

    let category_total: usize = OrderCategory::all().iter().map(|c| c.orders().len()).sum();
    results.push(TestResult::check(
        "catalog_category_coverage",
        category_total == OrderKind::all().len(),
        format!(
            "{} orders across {} categories",
            category_total,
            OrderCategory::all().len()
        ),
    ));

    let mut misplaced = 0;
    for order in OrderKind::all() {
        let homes = OrderCategory::all()
            .iter()
            .filter(|c| c.orders().contains(order))
            .count();
        if homes != 1 {
            misplaced += 1;
        }
    }
    results.push(TestResult::check(
        "catalog_orders_unique_home",
        misplaced == 0,
        format!("{} orders with a wrong category count", misplaced),
    ));

    let essential_count = OrderKind::all()
        .iter()
        .filter(|o| o.spec().essential)
        .count();
    results.push(TestResult::check(
        "catalog_essential_count",
        essential_count == 5,
        format!("{} essential orders", essential_count),
    ));

    let mut roster_ok = true;
    let mut patient_count = 0;
    for level in 1..=LEVEL_COUNT {
        match level_roster(level) {
            Some(roster) => {
                patient_count += roster.len();
                for patient in roster {
                    if patient.correct_orders.is_empty()
                        || !patient.correct_orders.iter().any(|o| o.spec().essential)
                    {
                        roster_ok = false;
                    }
                }
            }
            None => roster_ok = false,
        }
    }
    results.push(TestResult::check(
        "catalog_rosters_winnable",
        roster_ok,
        format!("{} patients across {} levels", patient_count, LEVEL_COUNT),
    ));

    results.push(TestResult::check(
        "catalog_level_bounds",
        level_roster(0).is_none() && level_roster(LEVEL_COUNT + 1).is_none(),
        "indices outside 1..=LEVEL_COUNT rejected".into(),
    ));

    let errors = validate_config(&SimConfig::default());
    results.push(TestResult::check(
        "config_default_valid",
        errors.is_empty(),
        format!("{} validation errors", errors.len()),
    ));

    results
}

// ── 2. Tick rule sweep ──────────────────────────────────────────────────

fn validate_tick_rules(_verbose: bool) -> Vec<TestResult> {
    println!("--- Tick Rules ---");
    let mut results = Vec::new();
    let config = SimConfig::default();

    let untreated = rules::evaluate_tick(50.0, 50.0, false, false, &config);
    results.push(TestResult::check(
        "tick_untreated_baseline",
        untreated
            == TickOutcome::Active {
                health: 49.0,
                position: 49.0,
                needs_attention: false,
            },
        format!("{:?}", untreated),
    ));

    let bundled = rules::evaluate_tick(50.0, 50.0, true, true, &config);
    results.push(TestResult::check(
        "tick_bundled_recovery",
        bundled
            == TickOutcome::Active {
                health: 52.0,
                position: 51.0,
                needs_attention: false,
            },
        format!("{:?}", bundled),
    ));

    // Sweep a grid of states: bounds must hold for every active outcome.
    let mut violations = 0;
    let mut evaluated = 0;
    for health in 0..=20 {
        for position in 0..=18 {
            for (bundle, any) in [(false, false), (false, true), (true, true)] {
                let outcome = rules::evaluate_tick(
                    health as f32 * 5.0,
                    5.0 + position as f32 * 5.0,
                    bundle,
                    any,
                    &config,
                );
                evaluated += 1;
                if let TickOutcome::Active { health, position, .. } = outcome {
                    if !(0.0..=100.0).contains(&health) || !(5.0..=95.0).contains(&position) {
                        violations += 1;
                    }
                }
            }
        }
    }
    results.push(TestResult::check(
        "tick_bounds_sweep",
        violations == 0,
        format!("{} states evaluated, {} violations", evaluated, violations),
    ));

    // Walking a fresh untreated patient must reach death by position.
    let mut health = config.start_health;
    let mut position = config.start_position;
    let mut ticks = 0;
    let died = loop {
        match rules::evaluate_tick(health, position, false, false, &config) {
            TickOutcome::Died => break true,
            TickOutcome::Cured => break false,
            TickOutcome::Active {
                health: h,
                position: p,
                ..
            } => {
                health = h;
                position = p;
                ticks += 1;
                if ticks > 500 {
                    break false;
                }
            }
        }
    };
    results.push(TestResult::check(
        "tick_neglect_reaches_death",
        died && ticks == 44,
        format!("died={} after {} active ticks", died, ticks),
    ));

    // A bundled patient from the start must reach cure.
    let mut health = config.start_health;
    let mut position = config.start_position;
    let mut ticks = 0;
    let cured = loop {
        match rules::evaluate_tick(health, position, true, true, &config) {
            TickOutcome::Cured => break true,
            TickOutcome::Died => break false,
            TickOutcome::Active {
                health: h,
                position: p,
                ..
            } => {
                health = h;
                position = p;
                ticks += 1;
                if ticks > 500 {
                    break false;
                }
            }
        }
    };
    results.push(TestResult::check(
        "tick_bundle_reaches_cure",
        cured && ticks == 39,
        format!("cured={} after {} active ticks", cured, ticks),
    ));

    results
}

// ── 3. Order application ────────────────────────────────────────────────

fn validate_order_application(_verbose: bool) -> Vec<TestResult> {
    println!("--- Order Application ---");
    let mut results = Vec::new();

    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.reset_game();
    let id = engine.sessions()[0].id;

    let receipt = engine.apply_order(id, OrderKind::Ceftriaxone as u8, 0);
    results.push(TestResult::check(
        "order_correct_scores",
        matches!(receipt, Ok(r) if r.correct && r.points == 35) && engine.score() == 35,
        format!("{:?}, score {}", receipt, engine.score()),
    ));

    let health = engine.session(id).map(|s| s.health).unwrap_or(0.0);
    results.push(TestResult::check(
        "order_correct_heals",
        health == 60.0,
        format!("health {} after +10 bonus", health),
    ));

    let dup = engine.apply_order(id, OrderKind::Ceftriaxone as u8, 0);
    results.push(TestResult::check(
        "order_duplicate_rejected",
        dup == Err(OrderError::AlreadyApplied(OrderKind::Ceftriaxone)) && engine.score() == 35,
        format!("{:?}", dup),
    ));

    let unknown = engine.apply_order(id, 77, 0);
    results.push(TestResult::check(
        "order_unknown_rejected",
        unknown == Err(OrderError::UnknownOrder(77)),
        format!("{:?}", unknown),
    ));

    let ghost = engine.apply_order(40_000, OrderKind::IvAccess as u8, 0);
    results.push(TestResult::check(
        "order_ghost_session_rejected",
        ghost == Err(OrderError::SessionNotActive(40_000)),
        format!("{:?}", ghost),
    ));

    // Wrong orders drain score to its floor, never below.
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.reset_game();
    let id = engine.sessions()[0].id;
    let _ = engine.apply_order(id, OrderKind::CtAbdomen as u8, 0);
    let _ = engine.apply_order(id, OrderKind::SurgeryConsult as u8, 0);
    results.push(TestResult::check(
        "order_score_floor",
        engine.score() == 0,
        format!("score {} after two wrong orders", engine.score()),
    ));

    let acks = engine.recent_orders(500);
    let expired = engine.recent_orders(5_000);
    results.push(TestResult::check(
        "order_ack_window",
        acks.len() == 2 && expired.is_empty(),
        format!("{} live acks, {} after expiry", acks.len(), expired.len()),
    ));

    results
}

// ── 4. Full play-throughs ───────────────────────────────────────────────

fn treat_everyone(shell: &mut GameShell) {
    let plan: Vec<(u32, Vec<u8>)> = shell
        .engine()
        .sessions()
        .iter()
        .map(|s| {
            (
                s.id,
                s.template.correct_orders.iter().map(|o| *o as u8).collect(),
            )
        })
        .collect();
    for (id, orders) in plan {
        for order in orders {
            let _ = shell.apply_order(id, order);
        }
    }
}

fn validate_playthroughs(verbose: bool) -> Vec<TestResult> {
    println!("--- Play-throughs ---");
    let mut results = Vec::new();

    // Winning run: level 1 → level 2 → all complete.
    let mut shell = GameShell::new(SimConfig::default()).expect("valid config");
    shell.start_game();
    let mut levels_seen = vec![shell.engine().level()];
    for _ in 0..300 {
        if shell.engine().phase() == LevelPhase::AllLevelsComplete {
            break;
        }
        if shell.engine().phase() == LevelPhase::LevelInProgress
            && shell.engine().sessions().iter().any(|s| s.applied_orders.is_empty())
        {
            treat_everyone(&mut shell);
        }
        shell.advance(2000);
        let level = shell.engine().level();
        if levels_seen.last() != Some(&level) {
            levels_seen.push(level);
        }
    }
    if verbose {
        println!(
            "  win run: levels {:?}, score {}, clock {}",
            levels_seen,
            shell.engine().score(),
            rules::format_clock(shell.engine().elapsed_secs())
        );
    }
    results.push(TestResult::check(
        "play_win_run",
        shell.engine().phase() == LevelPhase::AllLevelsComplete && levels_seen == vec![1, 2],
        format!("levels {:?}, phase {:?}", levels_seen, shell.engine().phase()),
    ));
    results.push(TestResult::check(
        "play_win_score",
        shell.engine().score() > 0,
        format!("final score {}", shell.engine().score()),
    ));

    // Losing run: neglect until everyone dies, verify no advance ever.
    let mut shell = GameShell::new(SimConfig::default()).expect("valid config");
    shell.start_game();
    for _ in 0..80 {
        shell.advance(4000);
    }
    let all_dead = shell
        .engine()
        .sessions()
        .iter()
        .all(|s| s.status == PatientStatus::Died);
    results.push(TestResult::check(
        "play_neglect_run",
        all_dead && shell.engine().level() == 1,
        format!(
            "all_dead={}, level {}, phase {:?}",
            all_dead,
            shell.engine().level(),
            shell.engine().phase()
        ),
    ));

    // Teardown mid-grace: the pending advance must die with the state.
    let mut shell = GameShell::new(SimConfig::default()).expect("valid config");
    shell.start_game();
    treat_everyone(&mut shell);
    for _ in 0..60 {
        if shell.engine().phase() != LevelPhase::LevelInProgress {
            break;
        }
        shell.advance(4000);
    }
    let was_pending = matches!(
        shell.engine().phase(),
        LevelPhase::LevelClearedPending { .. }
    );
    shell.exit_to_menu();
    shell.advance(600_000);
    results.push(TestResult::check(
        "play_teardown_discards_advance",
        was_pending && shell.engine().phase() == LevelPhase::Idle,
        format!(
            "pending={}, phase after teardown {:?}",
            was_pending,
            shell.engine().phase()
        ),
    ));

    results
}

// ── 5. Snapshot round-trip ──────────────────────────────────────────────

fn validate_snapshots(_verbose: bool) -> Vec<TestResult> {
    println!("--- Snapshots ---");
    let mut results = Vec::new();

    let mut shell = GameShell::new(SimConfig::default()).expect("valid config");
    shell.start_game();
    let id = shell.engine().sessions()[0].id;
    let _ = shell.apply_order(id, OrderKind::BloodCulture as u8);
    shell.advance(8000);

    let snapshot = shell.snapshot();
    let json = match serde_json::to_string(&snapshot) {
        Ok(json) => json,
        Err(e) => {
            results.push(TestResult::check(
                "snapshot_serialize",
                false,
                format!("serialize error: {}", e),
            ));
            return results;
        }
    };
    results.push(TestResult::check(
        "snapshot_serialize",
        json.contains("Jane Johnson"),
        format!("{} bytes", json.len()),
    ));

    match serde_json::from_str::<GameSnapshot>(&json) {
        Ok(decoded) => {
            results.push(TestResult::check(
                "snapshot_roundtrip",
                decoded == snapshot,
                format!(
                    "level {}, {} sessions, score {}",
                    decoded.level,
                    decoded.sessions.len(),
                    decoded.score
                ),
            ));
        }
        Err(e) => {
            results.push(TestResult::check(
                "snapshot_roundtrip",
                false,
                format!("parse error: {}", e),
            ));
        }
    }

    results
}
