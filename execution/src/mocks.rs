//! Deterministic stand-ins for tests.

use std::collections::VecDeque;

use rand::{rngs::StdRng, SeedableRng};
use soulbet_types::{SecondsRange, SessionConfig, SessionEvent, MAX_NUMBER};

use crate::{Sacrifice, SessionClock, TurnController, Wheel};

/// Wheel that plays back scripted draws, repeating the last one when the script runs out.
#[derive(Clone, Debug)]
pub struct FixedWheel {
    draws: VecDeque<u8>,
    last: u8,
}

impl FixedWheel {
    pub fn new(draws: impl IntoIterator<Item = u8>) -> Self {
        let draws: VecDeque<u8> = draws.into_iter().collect();
        assert!(draws.iter().all(|draw| *draw <= MAX_NUMBER), "draw out of range");
        let last = draws.front().copied().unwrap_or(0);
        Self { draws, last }
    }

    pub fn push(&mut self, draw: u8) {
        self.draws.push_back(draw);
    }
}

impl Wheel for FixedWheel {
    fn spin(&mut self) -> u8 {
        if let Some(draw) = self.draws.pop_front() {
            self.last = draw;
        }
        self.last
    }
}

/// Session config whose clock ticks are fixed instead of sampled.
pub fn fixed_clock_config(total_seconds: f64, decrement: f64, interval: f64) -> SessionConfig {
    SessionConfig {
        total_seconds,
        tick_decrement: SecondsRange::new(decrement, decrement),
        tick_interval: SecondsRange::new(interval, interval),
        ..SessionConfig::default()
    }
}

/// Controller with scripted draws, a recording sink and the intro at the earliest allowed turn.
pub fn fixed_controller(
    config: SessionConfig,
    wheel: FixedWheel,
) -> TurnController<FixedWheel, Vec<SessionEvent>> {
    let clock = SessionClock::new(&config, StdRng::seed_from_u64(0));
    let sacrifice = Sacrifice::with_intro_turn(&config, config.sacrifice_intro_turns.min);
    TurnController::new(config, clock, sacrifice, wheel, Vec::new())
}
