//! Session clock.
//!
//! A countdown that loses a random slice of seconds on every tick and waits a random interval
//! before the next one. The caller owns scheduling: [`SessionClock::tick`] returns the delay
//! until the next tick, or `None` once the clock has run out.
//!
//! Penalties (jackpots, sacrifices) come in through [`Penalize`] and are independent of the tick
//! loop. Whichever mutation first drives the clock to zero reports the expiry; it is reported
//! exactly once.

use std::time::Duration;

use rand::{rngs::StdRng, RngCore};
use soulbet_types::{SecondsRange, SessionConfig};
use tracing::{debug, info};

use crate::rng::sample_seconds;

/// Result of one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub decrement_secs: f64,
    pub time_left_secs: f64,
    /// True only on the tick that ran the clock out.
    pub expired: bool,
    /// Delay before the next tick, `None` when the loop should stop.
    pub next_tick: Option<Duration>,
}

/// Result of a penalty.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PenaltyOutcome {
    pub seconds: f64,
    pub time_left_secs: f64,
    /// True only on the penalty that ran the clock out.
    pub expired: bool,
}

/// Anything that can be charged a time penalty.
pub trait Penalize {
    fn apply_penalty(&mut self, seconds: f64) -> PenaltyOutcome;
}

#[derive(Clone, Debug)]
pub struct SessionClock<R = StdRng> {
    time_left: f64,
    running: bool,
    expired: bool,
    decrement: SecondsRange,
    interval: SecondsRange,
    rng: R,
}

impl<R: RngCore> SessionClock<R> {
    pub fn new(config: &SessionConfig, rng: R) -> Self {
        let time_left = config.total_seconds.max(0.0);
        Self {
            time_left,
            running: time_left > 0.0,
            expired: false,
            decrement: config.tick_decrement,
            interval: config.tick_interval,
            rng,
        }
    }

    pub fn time_left(&self) -> f64 {
        self.time_left
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Stop the tick loop without expiring (used when the session ends some other way).
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Delay before the first tick, `None` if the clock starts empty.
    pub fn first_delay(&mut self) -> Option<Duration> {
        if !self.running {
            return None;
        }
        Some(Duration::from_secs_f64(sample_seconds(
            &mut self.rng,
            self.interval,
        )))
    }

    /// Apply one tick: subtract a sampled decrement and sample the next delay independently.
    pub fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick {
                decrement_secs: 0.0,
                time_left_secs: self.time_left,
                expired: false,
                next_tick: None,
            };
        }

        let decrement_secs = sample_seconds(&mut self.rng, self.decrement);
        self.time_left = (self.time_left - decrement_secs).max(0.0);
        let expired = self.check_expiry();

        let next_tick = if self.running {
            let delay = sample_seconds(&mut self.rng, self.interval);
            Some(Duration::from_secs_f64(delay))
        } else {
            None
        };
        debug!(
            decrement_secs,
            time_left = self.time_left,
            ?next_tick,
            "clock tick"
        );

        Tick {
            decrement_secs,
            time_left_secs: self.time_left,
            expired,
            next_tick,
        }
    }

    fn check_expiry(&mut self) -> bool {
        if self.time_left > 0.0 || self.expired {
            return false;
        }
        self.time_left = 0.0;
        self.running = false;
        self.expired = true;
        info!("clock expired");
        true
    }
}

impl<R: RngCore> Penalize for SessionClock<R> {
    fn apply_penalty(&mut self, seconds: f64) -> PenaltyOutcome {
        let seconds = seconds.max(0.0);
        self.time_left = (self.time_left - seconds).max(0.0);
        let expired = self.check_expiry();
        info!(seconds, time_left = self.time_left, expired, "clock penalty");
        PenaltyOutcome {
            seconds,
            time_left_secs: self.time_left,
            expired,
        }
    }
}
