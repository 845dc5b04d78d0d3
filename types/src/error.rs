use thiserror::Error;

use super::Color;

/// Rejections produced while placing a bet or using the sacrifice.
///
/// None of these are fatal: every rejection leaves the session untouched and still playable.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid bet amount: {0:?}")]
    InvalidBet(String),
    #[error("insufficient funds (amount={amount}, balance={balance})")]
    InsufficientFunds { amount: u64, balance: u64 },
    #[error("illegal action: {0}")]
    IllegalAction(IllegalAction),
}

impl GameError {
    /// Illegal actions come from controls that should already be disabled, so they are dropped
    /// without a message or cue.
    pub fn is_silent(&self) -> bool {
        matches!(self, GameError::IllegalAction(_))
    }

    /// Player-facing text for a visible rejection.
    pub fn player_message(&self) -> Option<&'static str> {
        match self {
            GameError::InvalidBet(_) => Some("Enter a valid bet amount."),
            GameError::InsufficientFunds { .. } => Some("You don't have enough money."),
            GameError::IllegalAction(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum IllegalAction {
    #[error("a spin is still being presented")]
    SpinInProgress,
    #[error("the session is over")]
    SessionOver,
    #[error("the sacrifice is not ready")]
    SacrificeNotReady,
}

impl From<IllegalAction> for GameError {
    fn from(value: IllegalAction) -> Self {
        GameError::IllegalAction(value)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("unknown color: {0}")]
    UnknownColor(String),
    #[error("number out of range: {0} (max 36)")]
    NumberOutOfRange(u8),
    #[error("{number} is not offered for {color}")]
    ColorMismatch { color: Color, number: u8 },
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} range is empty (min={min}, max={max})")]
    InvalidRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("{field} must be >= 0 (got {value})")]
    InvalidNonNegative { field: &'static str, value: f64 },
    #[error("{field} must be > 0 (got {value})")]
    InvalidPositive { field: &'static str, value: f64 },
    #[error("target_money must exceed starting_money (starting={starting}, target={target})")]
    TargetNotAboveStart { starting: u64, target: u64 },
    #[error("invalid log level: {value}")]
    InvalidLogLevel { value: String },
}
