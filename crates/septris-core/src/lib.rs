//! Septris Core - Patient Simulation Engine
//!
//! The stateful half of the Septris training simulation: live patient
//! sessions for the current level, the fixed-period tick that moves each
//! patient toward recovery or demise, order application with scoring,
//! and the level-advance state machine.
//!
//! # Architecture
//!
//! - **`septris-logic`** holds every rule and all scenario data as pure
//!   functions and static tables.
//! - **[`engine::SimulationEngine`]** owns the mutable state and applies
//!   those rules through exactly four mutating operations.
//! - **[`shell::GameShell`]** is the serialized driver: the host reports
//!   elapsed wall time and relays learner input; the shell schedules
//!   ticks and fires due level advances. A presentation layer only ever
//!   renders snapshots.
//!
//! # Example
//!
//! ```rust,no_run
//! use septris_core::GameShell;
//! use septris_logic::config::SimConfig;
//!
//! let mut shell = GameShell::new(SimConfig::default()).unwrap();
//! shell.start_game();
//!
//! loop {
//!     shell.advance(16); // elapsed ms since the last frame
//!     let snapshot = shell.snapshot();
//!     // render snapshot, relay clicks via shell.apply_order(...)
//!     # let _ = snapshot;
//! }
//! ```

pub mod engine;
pub mod error;
pub mod session;
pub mod shell;

pub use engine::{GameSnapshot, LevelPhase, OrderAck, OrderReceipt, SimulationEngine};
pub use error::{LevelError, OrderError};
pub use session::{PatientSession, SessionSnapshot};
pub use shell::{GameShell, ShellState};
