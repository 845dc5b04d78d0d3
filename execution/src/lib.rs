//! Soulbet execution layer.
//!
//! This crate contains the deterministic session core: the outcome engine, the session clock,
//! the sacrifice cooldown and the turn controller that ties them together. The table runtime
//! drives it from a single task; nothing in here sleeps or reads the wall clock.
//!
//! ## Determinism requirements
//! - Do not use wall-clock time inside execution. Delays are returned as [`std::time::Duration`]
//!   values for the caller to schedule.
//! - Do not use ambient randomness; every draw comes from an injected [`Wheel`] or a seeded
//!   stream handed out by [`SeedStreams`].
//!
//! ## Minimal turn (example)
//! ```rust
//! use soulbet_execution::TurnController;
//! use soulbet_types::{BetSlip, Color, Pick, SessionConfig, SessionEvent};
//!
//! let mut controller =
//!     TurnController::from_seed(SessionConfig::default(), 7, Vec::<SessionEvent>::new());
//! let pick = Pick::new(Color::Red, 7).unwrap();
//! let outcome = controller.place_bet(&BetSlip::new("100", pick)).unwrap();
//! assert_eq!(controller.state().turn_count, 1);
//! assert_eq!(outcome.money, 2_500 - 100 + outcome.spin.winnings);
//! ```

pub mod clock;
pub mod controller;
pub mod outcome;
pub mod rng;
pub mod sacrifice;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

#[cfg(test)]
mod session_tests;

pub use clock::{Penalize, PenaltyOutcome, SessionClock, Tick};
pub use controller::{EventSink, TurnController, TurnOutcome};
pub use outcome::resolve_spin;
pub use rng::{RandomWheel, SeedStreams, Wheel};
pub use sacrifice::{Sacrifice, SacrificeSignal};
