//! Display and audio surface the presenter drives.

use std::io::Write;

use soulbet_types::{Color, Cue, SacrificeState, Screen, SessionState};
use tracing::warn;

/// How a transient message is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Info,
    Win,
    Loss,
    Error,
}

/// Visibility of the sacrifice control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SacrificeControl {
    Hidden,
    Charging,
    Ready,
}

/// Everything the presenter can ask of a front end.
///
/// Animated values are pushed frame by frame with `settled == false` and once more with
/// `settled == true` when they come to rest.
pub trait DisplaySink {
    fn show_message(&mut self, text: &str, tone: Tone);
    fn clear_message(&mut self);
    fn play_cue(&mut self, cue: Cue);
    fn show_wheel(&mut self, number: u8, color: Color, settled: bool);
    /// Bet chips and multiplier label of the current spin, `None` to clear them.
    fn show_bet(&mut self, bet: Option<(u64, String)>);
    fn show_winnings(&mut self, amount: Option<u64>, settled: bool);
    fn show_money(&mut self, money: u64, settled: bool);
    fn show_turn(&mut self, turn: u32);
    fn show_clock(&mut self, text: &str, flashing: bool);
    fn show_dialogue(&mut self, text: Option<&str>, complete: bool);
    fn set_betting_enabled(&mut self, enabled: bool);
    fn set_sacrifice_control(&mut self, control: SacrificeControl);
    fn show_status(&mut self, state: &SessionState, sacrifice: SacrificeState);
    fn go_to(&mut self, screen: Screen);
}

/// `"MM:SS left"`, both fields floored.
pub fn format_clock(time_left_secs: f64) -> String {
    let total = time_left_secs.max(0.0).floor() as u64;
    format!("{:02}:{:02} left", total / 60, total % 60)
}

/// Multiplier label with at most two decimals and no trailing zeros.
pub fn format_multiplier(multiplier: f64) -> String {
    let fixed = format!("{multiplier:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}x")
}

/// Line-oriented renderer. Intermediate animation frames are skipped.
pub struct ConsoleDisplay<W: Write> {
    out: W,
    spinning: bool,
    clock: Option<String>,
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            spinning: false,
            clock: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}").and_then(|_| self.out.flush()) {
            warn!(?err, "failed to write to console");
        }
    }
}

impl<W: Write> DisplaySink for ConsoleDisplay<W> {
    fn show_message(&mut self, text: &str, tone: Tone) {
        let prefix = match tone {
            Tone::Info => "*",
            Tone::Win => "+",
            Tone::Loss => "-",
            Tone::Error => "!",
        };
        self.line(&format!("{prefix} {text}"));
    }

    fn clear_message(&mut self) {}

    fn play_cue(&mut self, _cue: Cue) {}

    fn show_wheel(&mut self, number: u8, color: Color, settled: bool) {
        if !settled {
            if !self.spinning {
                self.spinning = true;
                self.line("spinning...");
            }
            return;
        }
        self.spinning = false;
        self.line(&format!("ball lands on {number} {color}"));
    }

    fn show_bet(&mut self, bet: Option<(u64, String)>) {
        if let Some((amount, multiplier)) = bet {
            self.line(&format!("bet {amount} paid {multiplier}"));
        }
    }

    fn show_winnings(&mut self, amount: Option<u64>, settled: bool) {
        if let (Some(amount), true) = (amount, settled) {
            self.line(&format!("total {amount}"));
        }
    }

    fn show_money(&mut self, money: u64, settled: bool) {
        if settled {
            self.line(&format!("money {money}"));
        }
    }

    fn show_turn(&mut self, turn: u32) {
        self.line(&format!("turn {turn}"));
    }

    fn show_clock(&mut self, text: &str, flashing: bool) {
        let changed = self.clock.as_deref() != Some(text);
        if flashing {
            self.line(&format!("clock {text} (!)"));
        } else if changed {
            self.line(&format!("clock {text}"));
        }
        if changed {
            self.clock = Some(text.to_string());
        }
    }

    fn show_dialogue(&mut self, text: Option<&str>, complete: bool) {
        if let (Some(text), true) = (text, complete) {
            self.line(text);
        }
    }

    fn set_betting_enabled(&mut self, enabled: bool) {
        if enabled {
            self.line("place your bet");
        }
    }

    fn set_sacrifice_control(&mut self, control: SacrificeControl) {
        match control {
            SacrificeControl::Hidden => {}
            SacrificeControl::Charging => self.line("sacrifice charging"),
            SacrificeControl::Ready => self.line("sacrifice ready (type `sacrifice`)"),
        }
    }

    fn show_status(&mut self, state: &SessionState, sacrifice: SacrificeState) {
        let sacrifice = if sacrifice.is_ready() {
            "ready".to_string()
        } else if sacrifice.is_unlocked() {
            format!(
                "{}/{} turns",
                sacrifice.turns_since_last_use, sacrifice.cooldown_turns
            )
        } else {
            "locked".to_string()
        };
        self.line(&format!(
            "money {} / {} | turn {} | {} | sacrifice {}",
            state.money,
            state.target_money,
            state.turn_count,
            format_clock(state.time_left_secs),
            sacrifice
        ));
    }

    fn go_to(&mut self, screen: Screen) {
        let name = match screen {
            Screen::Win => "WIN",
            Screen::Loss => "LOSS",
        };
        self.line(&format!("== {name} =="));
    }
}

/// Records every call for assertions. Clones share one log.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub struct RecordingDisplay {
    calls: std::sync::Arc<std::sync::Mutex<Vec<Call>>>,
}

#[cfg(test)]
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Message(String, Tone),
    ClearMessage,
    Cue(Cue),
    Wheel(u8, Color, bool),
    Bet(Option<(u64, String)>),
    Winnings(Option<u64>, bool),
    Money(u64, bool),
    Turn(u32),
    Clock(String, bool),
    Dialogue(Option<String>, bool),
    Betting(bool),
    Sacrifice(SacrificeControl),
    Status,
    GoTo(Screen),
}

#[cfg(test)]
impl RecordingDisplay {
    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|call| predicate(call)).count()
    }

    pub fn contains(&self, call: &Call) -> bool {
        self.calls.lock().unwrap().contains(call)
    }

    pub fn last_money(&self) -> Option<u64> {
        self.calls.lock().unwrap().iter().rev().find_map(|call| match call {
            Call::Money(money, true) => Some(*money),
            _ => None,
        })
    }
}

#[cfg(test)]
impl DisplaySink for RecordingDisplay {
    fn show_message(&mut self, text: &str, tone: Tone) {
        self.record(Call::Message(text.to_string(), tone));
    }

    fn clear_message(&mut self) {
        self.record(Call::ClearMessage);
    }

    fn play_cue(&mut self, cue: Cue) {
        self.record(Call::Cue(cue));
    }

    fn show_wheel(&mut self, number: u8, color: Color, settled: bool) {
        self.record(Call::Wheel(number, color, settled));
    }

    fn show_bet(&mut self, bet: Option<(u64, String)>) {
        self.record(Call::Bet(bet));
    }

    fn show_winnings(&mut self, amount: Option<u64>, settled: bool) {
        self.record(Call::Winnings(amount, settled));
    }

    fn show_money(&mut self, money: u64, settled: bool) {
        self.record(Call::Money(money, settled));
    }

    fn show_turn(&mut self, turn: u32) {
        self.record(Call::Turn(turn));
    }

    fn show_clock(&mut self, text: &str, flashing: bool) {
        self.record(Call::Clock(text.to_string(), flashing));
    }

    fn show_dialogue(&mut self, text: Option<&str>, complete: bool) {
        self.record(Call::Dialogue(text.map(str::to_string), complete));
    }

    fn set_betting_enabled(&mut self, enabled: bool) {
        self.record(Call::Betting(enabled));
    }

    fn set_sacrifice_control(&mut self, control: SacrificeControl) {
        self.record(Call::Sacrifice(control));
    }

    fn show_status(&mut self, _state: &SessionState, _sacrifice: SacrificeState) {
        self.record(Call::Status);
    }

    fn go_to(&mut self, screen: Screen) {
        self.record(Call::GoTo(screen));
    }
}
