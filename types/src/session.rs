use serde::{Deserialize, Serialize};

use super::{
    Color, GameError, Pick, BOTH_MULTIPLIER, COLOR_ONLY_MULTIPLIER, NUMBER_ONLY_MULTIPLIER,
};

/// Raw bet as it arrives from the betting surface: the amount is still free text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetSlip {
    pub amount: String,
    pub pick: Pick,
}

impl BetSlip {
    pub fn new(amount: impl Into<String>, pick: Pick) -> Self {
        Self {
            amount: amount.into(),
            pick,
        }
    }

    /// Parse the slip into a bet. The amount must be a positive 32-bit integer; anything wider
    /// is rejected as invalid rather than as unaffordable.
    pub fn parse(&self) -> Result<BetRequest, GameError> {
        let raw = self.amount.trim();
        let amount = match raw.parse::<i32>() {
            Ok(value) if value > 0 => value as u64,
            _ => return Err(GameError::InvalidBet(self.amount.clone())),
        };
        Ok(BetRequest {
            amount,
            pick: self.pick,
        })
    }
}

/// A validated bet for a single spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetRequest {
    pub amount: u64,
    pub pick: Pick,
}

impl BetRequest {
    pub fn chosen_number(&self) -> u8 {
        self.pick.number()
    }

    pub fn chosen_color(&self) -> Color {
        self.pick.color()
    }
}

/// How a drawn pocket relates to the bet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    None,
    ColorOnly,
    NumberOnly,
    Both,
}

impl MatchKind {
    pub fn classify(number_match: bool, color_match: bool) -> Self {
        match (number_match, color_match) {
            (true, true) => MatchKind::Both,
            (true, false) => MatchKind::NumberOnly,
            (false, true) => MatchKind::ColorOnly,
            (false, false) => MatchKind::None,
        }
    }

    /// Multiplier applied to the full bet amount.
    pub fn multiplier(self) -> u64 {
        match self {
            MatchKind::Both => BOTH_MULTIPLIER,
            MatchKind::NumberOnly => NUMBER_ONLY_MULTIPLIER,
            MatchKind::ColorOnly => COLOR_ONLY_MULTIPLIER,
            MatchKind::None => 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinResult {
    pub result_number: u8,
    pub result_color: Color,
    pub match_kind: MatchKind,
    pub payout_multiplier: u64,
    pub winnings: u64,
}

impl SpinResult {
    /// A jackpot is a full match that actually paid out.
    pub fn is_jackpot(&self) -> bool {
        self.match_kind == MatchKind::Both && self.winnings > 0
    }

    /// Multiplier shown next to the chips: winnings over bet, or zero for a loss.
    pub fn display_multiplier(&self, bet: u64) -> f64 {
        if bet > 0 && self.winnings > 0 {
            self.winnings as f64 / bet as f64
        } else {
            0.0
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    #[default]
    Ongoing,
    Won,
    Lost,
}

impl SessionOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionOutcome::Ongoing)
    }
}

/// Why a session ended in a loss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossReason {
    Bankrupt,
    ClockExpired,
}

/// Screens the core can send the player to. Each session visits at most one of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Win,
    Loss,
}

/// Root session state, owned and mutated only by the turn controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub money: u64,
    pub target_money: u64,
    pub turn_count: u32,
    pub time_left_secs: f64,
    pub outcome: SessionOutcome,
}

impl SessionState {
    pub fn new(money: u64, target_money: u64, time_left_secs: f64) -> Self {
        Self {
            money,
            target_money,
            turn_count: 0,
            time_left_secs: time_left_secs.max(0.0),
            outcome: SessionOutcome::Ongoing,
        }
    }

    pub fn is_ongoing(&self) -> bool {
        self.outcome == SessionOutcome::Ongoing
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SacrificePhase {
    Locked,
    Unlocking,
    Unlocked,
}

/// Snapshot of the sacrifice cooldown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SacrificeState {
    pub phase: SacrificePhase,
    pub turns_since_last_use: u32,
    pub cooldown_turns: u32,
}

impl SacrificeState {
    pub fn locked(cooldown_turns: u32) -> Self {
        Self {
            phase: SacrificePhase::Locked,
            turns_since_last_use: 0,
            cooldown_turns,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.phase == SacrificePhase::Unlocked
    }

    pub fn is_ready(&self) -> bool {
        self.is_unlocked() && self.turns_since_last_use >= self.cooldown_turns
    }
}
