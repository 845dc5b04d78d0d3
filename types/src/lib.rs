//! Soulbet domain types.
//!
//! Defines the wheel, bet, spin, session and event types shared by the execution core and the
//! table runtime, plus the tunables every session is built from.

mod config;
mod constants;
mod error;
mod events;
mod session;
mod wheel;

pub use config::*;
pub use constants::*;
pub use error::*;
pub use events::*;
pub use session::*;
pub use wheel::*;
