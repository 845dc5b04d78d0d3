//! Table runtime for soulbet.
//!
//! Wraps the deterministic core from `soulbet-execution` in a single tokio task that owns the
//! session, paces the presentation with cancellable timers and renders it through a
//! [`DisplaySink`]. The `soulbet` binary pairs it with a line-oriented terminal front end.

pub mod config;
pub mod display;
pub mod driver;
pub mod input;
pub mod presenter;
pub mod timers;

pub use config::{Config, PresentationConfig, PresentationTimings, ValidatedConfig};
pub use display::{
    format_clock, format_multiplier, ConsoleDisplay, DisplaySink, SacrificeControl, Tone,
};
pub use driver::{Command, SessionDriver};
pub use input::{describe_numbers, parse_line, Input, InputError, HELP};
pub use presenter::{Followup, Presenter};
pub use timers::{TimerFired, TimerHandle, TimerSlot, Timers};
