use serde::{Deserialize, Serialize};

use super::{BetRequest, LossReason, Pick, Screen, SessionOutcome, SpinResult};

/// Dealer line typed out when the sacrifice is first offered.
pub const SACRIFICE_INTRO_DIALOGUE: &str = "Dealer: This is taking too long... I have an idea.\n\
    What if you ruin your future odds of a jackpot by getting a bigger bonus right now! \
    I'll give you this button if you're open to indulge ;)";

/// Flavor line shown after a sacrifice.
pub const SACRIFICE_USED_MESSAGE: &str =
    "You embraced the sacrifice... More power now, less future.";

pub const WIN_MESSAGE: &str = "You paid your debt! Your soul is yours again!";
pub const LOSS_MESSAGE: &str = "You lost! Your soul now belongs to me!";

/// Audio cues the core asks the presentation layer to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    Error,
    Spin,
    Jackpot,
    TimeWarp,
    WinTick,
    BigWin,
    Lose,
    SacrificeReady,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyReason {
    Jackpot,
    Sacrifice,
}

/// Everything the presentation layer needs to know, in the order it happened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    BetRejected {
        message: String,
    },
    BetAccepted {
        bet: BetRequest,
        money: u64,
    },
    SpinResolved {
        bet: u64,
        pick: Pick,
        result: SpinResult,
        display_multiplier: f64,
    },
    MoneyChanged {
        from: u64,
        to: u64,
    },
    TurnAdvanced {
        turn: u32,
    },
    ClockTicked {
        decrement_secs: f64,
        time_left_secs: f64,
    },
    TimePenalty {
        reason: PenaltyReason,
        seconds: f64,
        time_left_secs: f64,
    },
    SacrificeIntro {
        dialogue: String,
    },
    SacrificeUnlocked,
    SacrificeReady,
    SacrificeUsed {
        message: String,
    },
    SessionEnded {
        outcome: SessionOutcome,
        loss_reason: Option<LossReason>,
        message: String,
        screen: Screen,
    },
}

impl SessionEvent {
    pub fn penalty_message(seconds: f64) -> String {
        format!("Time sacrificed! -{seconds} minutes")
    }
}
