//! Typed operation failures.
//!
//! Every engine operation either fully commits or fully no-ops; these
//! errors report the no-op cases. None of them is fatal — the driver
//! reports them to the presentation layer and keeps running.

use septris_logic::orders::OrderKind;

/// Failure placing an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderError {
    /// The session id is unknown, or the session has already reached a
    /// terminal state.
    SessionNotActive(u32),
    /// The order id does not resolve in the catalog.
    UnknownOrder(u8),
    /// The order is already on this session. Never double-counts.
    AlreadyApplied(OrderKind),
}

impl std::fmt::Display for OrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderError::SessionNotActive(id) => {
                write!(f, "session {} is not active", id)
            }
            OrderError::UnknownOrder(id) => write!(f, "unknown order id {}", id),
            OrderError::AlreadyApplied(order) => {
                write!(f, "order {} already placed", order.spec().order_name)
            }
        }
    }
}

impl std::error::Error for OrderError {}

/// Failure starting a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelError {
    /// The level index is outside the defined set.
    InvalidLevel(u8),
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::InvalidLevel(level) => write!(f, "no such level: {}", level),
        }
    }
}

impl std::error::Error for LevelError {}
