//! Sacrifice cooldown.
//!
//! `Locked -> Unlocking -> Unlocked` with a turn-count cooldown gating use. The intro threshold
//! is sampled once at construction; the intro itself is presented by the runtime, which calls
//! [`Sacrifice::finish_intro`] when the dialogue has played out.

use rand::Rng;
use soulbet_types::{SacrificePhase, SacrificeState, SessionConfig};
use tracing::{debug, info};

use crate::clock::{Penalize, PenaltyOutcome};
use crate::rng::sample_turn;

/// Something the presentation layer should react to after a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SacrificeSignal {
    /// The intro threshold was reached: play the intro dialogue.
    Intro,
    /// The cooldown elapsed: light the ready indicator.
    Ready,
}

#[derive(Clone, Debug)]
pub struct Sacrifice {
    state: SacrificeState,
    intro_turn: u32,
    penalty_seconds: f64,
}

impl Sacrifice {
    pub fn new<R: Rng + ?Sized>(config: &SessionConfig, rng: &mut R) -> Self {
        let intro_turn = sample_turn(rng, config.sacrifice_intro_turns);
        debug!(intro_turn, "sacrifice intro threshold sampled");
        Self::with_intro_turn(config, intro_turn)
    }

    pub fn with_intro_turn(config: &SessionConfig, intro_turn: u32) -> Self {
        Self {
            state: SacrificeState::locked(config.sacrifice_cooldown_turns),
            intro_turn,
            penalty_seconds: config.sacrifice_penalty_seconds,
        }
    }

    pub fn state(&self) -> SacrificeState {
        self.state
    }

    pub fn intro_turn(&self) -> u32 {
        self.intro_turn
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    /// Advance the cooldown after a resolved turn.
    ///
    /// While locked this only watches for the intro threshold (triggered once). While the intro
    /// plays nothing happens. Once unlocked, every turn counts toward the cooldown and the ready
    /// signal fires on the turn the cooldown is met, not again after.
    pub fn on_turn_advanced(&mut self, turn_count: u32) -> Option<SacrificeSignal> {
        match self.state.phase {
            SacrificePhase::Locked => {
                if turn_count < self.intro_turn {
                    return None;
                }
                self.state.phase = SacrificePhase::Unlocking;
                info!(turn_count, "sacrifice intro triggered");
                Some(SacrificeSignal::Intro)
            }
            SacrificePhase::Unlocking => None,
            SacrificePhase::Unlocked => {
                let was_ready = self.state.is_ready();
                self.state.turns_since_last_use = self.state.turns_since_last_use.saturating_add(1);
                if !was_ready && self.state.is_ready() {
                    info!(turn_count, "sacrifice ready");
                    Some(SacrificeSignal::Ready)
                } else {
                    None
                }
            }
        }
    }

    /// Complete the intro and unlock the control. A no-op unless the intro is playing.
    pub fn finish_intro(&mut self) -> bool {
        if self.state.phase != SacrificePhase::Unlocking {
            return false;
        }
        self.state.phase = SacrificePhase::Unlocked;
        self.state.turns_since_last_use = 0;
        info!("sacrifice unlocked");
        true
    }

    /// Burn clock time if the sacrifice is ready; otherwise do nothing.
    pub fn activate<P: Penalize + ?Sized>(&mut self, clock: &mut P) -> Option<PenaltyOutcome> {
        if !self.is_ready() {
            debug!(state = ?self.state, "sacrifice not ready");
            return None;
        }
        let outcome = clock.apply_penalty(self.penalty_seconds);
        self.state.turns_since_last_use = 0;
        info!(time_left = outcome.time_left_secs, "sacrifice used");
        Some(outcome)
    }
}
