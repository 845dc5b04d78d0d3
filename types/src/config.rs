use serde::{Deserialize, Serialize};

use super::{
    ConfigError, JACKPOT_PENALTY_SECONDS, SACRIFICE_COOLDOWN_TURNS, SACRIFICE_INTRO_MAX_TURN,
    SACRIFICE_INTRO_MIN_TURN, SACRIFICE_PENALTY_SECONDS, STARTING_MONEY, TARGET_MONEY,
    TICK_DECREMENT_MAX, TICK_DECREMENT_MIN, TICK_INTERVAL_MAX, TICK_INTERVAL_MIN, TOTAL_SECONDS,
};

/// Half-open range of seconds a random quantity is sampled from.
///
/// A range with `min == max` always yields `min`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SecondsRange {
    pub min: f64,
    pub max: f64,
}

impl SecondsRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn is_fixed(&self) -> bool {
        self.min >= self.max
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || self.min < 0.0 {
            return Err(ConfigError::InvalidNonNegative {
                field,
                value: self.min,
            });
        }
        if !self.max.is_finite() || self.max < self.min {
            return Err(ConfigError::InvalidRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Inclusive range of turn numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRange {
    pub min: u32,
    pub max: u32,
}

impl TurnRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Tunables for one session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub starting_money: u64,
    pub target_money: u64,
    pub total_seconds: f64,
    /// Seconds removed by each clock tick.
    pub tick_decrement: SecondsRange,
    /// Seconds between clock ticks.
    pub tick_interval: SecondsRange,
    pub jackpot_penalty_seconds: f64,
    pub sacrifice_penalty_seconds: f64,
    pub sacrifice_cooldown_turns: u32,
    /// Turn count at which the sacrifice is first offered, sampled once per session.
    pub sacrifice_intro_turns: TurnRange,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_money: STARTING_MONEY,
            target_money: TARGET_MONEY,
            total_seconds: TOTAL_SECONDS,
            tick_decrement: SecondsRange::new(TICK_DECREMENT_MIN, TICK_DECREMENT_MAX),
            tick_interval: SecondsRange::new(TICK_INTERVAL_MIN, TICK_INTERVAL_MAX),
            jackpot_penalty_seconds: JACKPOT_PENALTY_SECONDS,
            sacrifice_penalty_seconds: SACRIFICE_PENALTY_SECONDS,
            sacrifice_cooldown_turns: SACRIFICE_COOLDOWN_TURNS,
            sacrifice_intro_turns: TurnRange::new(
                SACRIFICE_INTRO_MIN_TURN,
                SACRIFICE_INTRO_MAX_TURN,
            ),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_money == 0 {
            return Err(ConfigError::InvalidPositive {
                field: "starting_money",
                value: 0.0,
            });
        }
        if self.target_money <= self.starting_money {
            return Err(ConfigError::TargetNotAboveStart {
                starting: self.starting_money,
                target: self.target_money,
            });
        }
        if !self.total_seconds.is_finite() || self.total_seconds <= 0.0 {
            return Err(ConfigError::InvalidPositive {
                field: "total_seconds",
                value: self.total_seconds,
            });
        }
        self.tick_decrement.validate("tick_decrement")?;
        self.tick_interval.validate("tick_interval")?;
        if self.tick_interval.max <= 0.0 {
            return Err(ConfigError::InvalidPositive {
                field: "tick_interval",
                value: self.tick_interval.max,
            });
        }
        ensure_non_negative("jackpot_penalty_seconds", self.jackpot_penalty_seconds)?;
        ensure_non_negative("sacrifice_penalty_seconds", self.sacrifice_penalty_seconds)?;
        if self.sacrifice_intro_turns.min > self.sacrifice_intro_turns.max {
            return Err(ConfigError::InvalidRange {
                field: "sacrifice_intro_turns",
                min: self.sacrifice_intro_turns.min as f64,
                max: self.sacrifice_intro_turns.max as f64,
            });
        }
        Ok(())
    }
}

fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidNonNegative { field, value });
    }
    Ok(())
}
