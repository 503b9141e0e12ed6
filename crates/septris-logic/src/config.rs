//! Tunable simulation constants and validation.
//!
//! Everything the reference behavior hardcodes — tick period, terminal
//! thresholds, scoring adjustments, starting values — lives here so a
//! deployment can retune without touching rule code. `Default` is the
//! reference tuning.

use serde::{Deserialize, Serialize};

use crate::rules::{HEALTH_MAX, HEALTH_MIN, POSITION_MAX, POSITION_MIN};

/// Simulation tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Fixed tick period in milliseconds.
    pub tick_period_ms: u64,
    /// How long a just-placed order marker stays visible.
    pub order_ack_ms: u64,
    /// Grace delay between clearing a level and advancing to the next.
    pub level_advance_delay_ms: u64,
    /// Health a session is admitted with.
    pub start_health: f32,
    /// Position a session is admitted with.
    pub start_position: f32,
    /// Health at or below which a session dies.
    pub death_health: f32,
    /// Position at or below which a session dies.
    pub death_position: f32,
    /// Health at or above which a session can be cured.
    pub cure_health: f32,
    /// Position at or above which a session can be cured.
    pub cure_position: f32,
    /// Health gained when a correct order is placed.
    pub correct_order_bonus: f32,
    /// Health lost when an incorrect order is placed.
    pub wrong_order_penalty: f32,
    /// Score lost when an incorrect order is placed.
    pub wrong_order_score_penalty: i32,
    /// Per-tick health gain once every essential correct order is in.
    pub bundle_complete_gain: f32,
    /// Per-tick health loss when some but not all needed care is in.
    pub partial_effort_decay: f32,
    /// Per-tick health loss with no orders placed at all.
    pub untreated_decay: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: 4000,
            order_ack_ms: 1000,
            level_advance_delay_ms: 2000,
            start_health: 50.0,
            start_position: 50.0,
            death_health: 0.0,
            death_position: 5.0,
            cure_health: 90.0,
            cure_position: 90.0,
            correct_order_bonus: 10.0,
            wrong_order_penalty: 5.0,
            wrong_order_score_penalty: 10,
            bundle_complete_gain: 2.0,
            partial_effort_decay: 0.5,
            untreated_decay: 1.0,
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Tick period must be nonzero.
    ZeroTickPeriod,
    /// Starting health outside the health bounds.
    StartHealthOutOfRange(f32),
    /// Starting position outside the position bounds.
    StartPositionOutOfRange(f32),
    /// Cure health threshold must lie above start and within bounds.
    CureHealthOutOfRange(f32),
    /// Cure position threshold must lie above start and within bounds.
    CurePositionOutOfRange(f32),
    /// Death health threshold must lie below start and within bounds.
    DeathHealthOutOfRange(f32),
    /// Death position threshold must lie below start and within bounds.
    DeathPositionOutOfRange(f32),
    /// Recovery gain must be positive.
    NonPositiveGain(f32),
    /// Decay rates must be positive.
    NonPositiveDecay(f32),
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &SimConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.tick_period_ms == 0 {
        errors.push(ConfigError::ZeroTickPeriod);
    }
    if !(HEALTH_MIN..=HEALTH_MAX).contains(&config.start_health) {
        errors.push(ConfigError::StartHealthOutOfRange(config.start_health));
    }
    if !(POSITION_MIN..=POSITION_MAX).contains(&config.start_position) {
        errors.push(ConfigError::StartPositionOutOfRange(config.start_position));
    }
    if config.cure_health <= config.start_health || config.cure_health > HEALTH_MAX {
        errors.push(ConfigError::CureHealthOutOfRange(config.cure_health));
    }
    if config.cure_position <= config.start_position || config.cure_position > POSITION_MAX {
        errors.push(ConfigError::CurePositionOutOfRange(config.cure_position));
    }
    if config.death_health >= config.start_health || config.death_health < HEALTH_MIN {
        errors.push(ConfigError::DeathHealthOutOfRange(config.death_health));
    }
    if config.death_position >= config.start_position || config.death_position < POSITION_MIN {
        errors.push(ConfigError::DeathPositionOutOfRange(config.death_position));
    }
    if config.bundle_complete_gain <= 0.0 {
        errors.push(ConfigError::NonPositiveGain(config.bundle_complete_gain));
    }
    if config.partial_effort_decay <= 0.0 {
        errors.push(ConfigError::NonPositiveDecay(config.partial_effort_decay));
    }
    if config.untreated_decay <= 0.0 {
        errors.push(ConfigError::NonPositiveDecay(config.untreated_decay));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(validate_config(&SimConfig::default()).is_empty());
    }

    #[test]
    fn test_zero_tick_period_rejected() {
        let config = SimConfig {
            tick_period_ms: 0,
            ..SimConfig::default()
        };
        assert!(validate_config(&config).contains(&ConfigError::ZeroTickPeriod));
    }

    #[test]
    fn test_start_out_of_range_rejected() {
        let config = SimConfig {
            start_health: 120.0,
            start_position: 2.0,
            ..SimConfig::default()
        };
        let errors = validate_config(&config);
        assert!(errors.contains(&ConfigError::StartHealthOutOfRange(120.0)));
        assert!(errors.contains(&ConfigError::StartPositionOutOfRange(2.0)));
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        // Cure below start and death above start are both unwinnable setups.
        let config = SimConfig {
            cure_health: 40.0,
            death_position: 60.0,
            ..SimConfig::default()
        };
        let errors = validate_config(&config);
        assert!(errors.contains(&ConfigError::CureHealthOutOfRange(40.0)));
        assert!(errors.contains(&ConfigError::DeathPositionOutOfRange(60.0)));
    }

    #[test]
    fn test_nonpositive_rates_rejected() {
        let config = SimConfig {
            bundle_complete_gain: 0.0,
            untreated_decay: -1.0,
            ..SimConfig::default()
        };
        let errors = validate_config(&config);
        assert!(errors.contains(&ConfigError::NonPositiveGain(0.0)));
        assert!(errors.contains(&ConfigError::NonPositiveDecay(-1.0)));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = SimConfig {
            tick_period_ms: 0,
            start_health: -5.0,
            bundle_complete_gain: 0.0,
            ..SimConfig::default()
        };
        assert!(validate_config(&config).len() >= 3);
    }
}
