//! Pure simulation logic for Septris.
//!
//! This crate contains all rules and static scenario data that are
//! independent of any engine, timer, or rendering layer. Functions take
//! plain data and return results, making them unit-testable and portable
//! across the stateful engine, the headless simtest harness, and any
//! future front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Tunable simulation constants and validation |
//! | [`orders`] | Order taxonomy: categories, definitions, point values |
//! | [`patients`] | Patient case templates and per-level rosters |
//! | [`rules`] | Tick rules, terminal outcomes, scoring arithmetic |

pub mod config;
pub mod orders;
pub mod patients;
pub mod rules;
