//! Presentation sequencer.
//!
//! Turns [`SessionEvent`]s into display calls and paces the animated ones with [`Timers`]:
//!
//! * spin: random flicker every frame for the spin duration, then the reveal (wheel, bet chips,
//!   multiplier) followed by either `"LOSE..."` or a winnings count-up and its closing label.
//! * money: the balance animates from the pre-credit value to the new one.
//! * messages: every transient message clears after a fixed delay; a newer message supersedes the
//!   pending clear.
//! * sacrifice intro: the dealer line is typed out, held, then hidden, after which the driver
//!   unlocks the sacrifice.
//! * endings: the closing line is shown and the screen transition follows after a delay, at most
//!   once.
//!
//! The presenter never touches session state. When a timer needs the core to act (re-enable
//! betting, finish the intro) it hands a [`Followup`] back to the driver.

use std::time::Duration;

use rand::{rngs::StdRng, Rng};
use soulbet_types::{
    Color, Cue, PenaltyReason, Screen, SessionEvent, SessionOutcome, SessionState, SpinResult,
    HUGE_WIN_DISPLAY_THRESHOLD, JACKPOT_DISPLAY_THRESHOLD, POCKET_COUNT,
};
use tracing::debug;

use crate::config::PresentationTimings;
use crate::display::{format_clock, format_multiplier, DisplaySink, SacrificeControl, Tone};
use crate::timers::{TimerSlot, Timers};

/// Work the driver must do on the presenter's behalf.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Followup {
    /// The spin has played out: betting may reopen.
    SettleSpin,
    /// The intro dialogue is done: unlock the sacrifice.
    FinishSacrificeIntro,
}

pub const LOSE_LABEL: &str = "LOSE...";

/// Label shown once the winnings count-up finishes.
pub fn win_label(winnings: u64) -> (&'static str, Option<Cue>) {
    if winnings >= JACKPOT_DISPLAY_THRESHOLD {
        ("JACKPOT!!!", Some(Cue::BigWin))
    } else if winnings >= HUGE_WIN_DISPLAY_THRESHOLD {
        ("HUGE WIN!", None)
    } else {
        ("NICE!", None)
    }
}

/// Increment per count-up step and the delay between steps.
///
/// The counter climbs by `max(1, w / 40)` and the whole count takes
/// `clamp(ln(w + 1) * 0.4, 0.5, 2.0)` seconds.
pub fn count_up_plan(winnings: u64) -> (u64, Duration) {
    let increment = (winnings / 40).max(1);
    let total = ((winnings as f64 + 1.0).ln() * 0.4).clamp(0.5, 2.0);
    let steps = (winnings / increment).max(1);
    (increment, Duration::from_secs_f64(total / steps as f64))
}

/// Number of `frame`-long frames needed to cover `duration`.
pub fn frames_in(duration: Duration, frame: Duration) -> u32 {
    let frames = duration.as_nanos().div_ceil(frame.as_nanos().max(1));
    u32::try_from(frames).unwrap_or(u32::MAX).max(1)
}

#[derive(Clone, Copy, Debug)]
struct Reveal {
    bet: u64,
    result: SpinResult,
    display_multiplier: f64,
}

#[derive(Debug)]
struct Spin {
    frames_left: u32,
    reveal: Option<Reveal>,
}

#[derive(Debug)]
struct CountUp {
    total: u64,
    shown: u64,
    increment: u64,
    step: Duration,
}

#[derive(Debug)]
struct MoneyCount {
    from: u64,
    to: u64,
    frame: u32,
    frames: u32,
}

#[derive(Debug)]
enum Intro {
    Typing { text: Vec<char>, shown: usize },
    Holding,
}

pub struct Presenter<R = StdRng> {
    timings: PresentationTimings,
    rng: R,
    spin: Option<Spin>,
    count_up: Option<CountUp>,
    money: Option<MoneyCount>,
    intro: Option<Intro>,
    time_left_secs: f64,
    pending_screen: Option<Screen>,
    screen_issued: bool,
}

impl<R: Rng> Presenter<R> {
    pub fn new(timings: PresentationTimings, rng: R) -> Self {
        Self {
            timings,
            rng,
            spin: None,
            count_up: None,
            money: None,
            intro: None,
            time_left_secs: 0.0,
            pending_screen: None,
            screen_issued: false,
        }
    }

    /// True once the win or loss screen has been requested.
    pub fn screen_issued(&self) -> bool {
        self.screen_issued
    }

    /// Paint the opening state.
    pub fn start<D: DisplaySink>(&mut self, state: &SessionState, display: &mut D) {
        self.time_left_secs = state.time_left_secs;
        display.show_money(state.money, true);
        display.show_turn(state.turn_count);
        display.show_clock(&format_clock(state.time_left_secs), false);
        display.set_sacrifice_control(SacrificeControl::Hidden);
        display.set_betting_enabled(state.is_ongoing());
    }

    pub fn handle_event<D: DisplaySink>(
        &mut self,
        event: SessionEvent,
        display: &mut D,
        timers: &mut Timers,
    ) {
        match event {
            SessionEvent::BetRejected { message } => {
                display.play_cue(Cue::Error);
                self.flash_message(&message, Tone::Error, display, timers);
            }
            SessionEvent::BetAccepted { money, .. } => {
                display.set_betting_enabled(false);
                self.clear_results(display, timers);
                timers.cancel(TimerSlot::MoneyCount);
                self.money = None;
                display.show_money(money, true);

                display.play_cue(Cue::Spin);
                self.spin = Some(Spin {
                    frames_left: frames_in(self.timings.spin_duration, self.timings.spin_frame),
                    reveal: None,
                });
                self.advance_spin(display, timers);
                timers.schedule(
                    TimerSlot::ReEnable,
                    self.timings.spin_duration + self.timings.reenable_padding,
                );
            }
            SessionEvent::SpinResolved {
                bet,
                result,
                display_multiplier,
                ..
            } => {
                if let Some(spin) = self.spin.as_mut() {
                    spin.reveal = Some(Reveal {
                        bet,
                        result,
                        display_multiplier,
                    });
                }
            }
            SessionEvent::MoneyChanged { from, to } => {
                self.start_money_count(from, to, display, timers)
            }
            SessionEvent::TurnAdvanced { turn } => display.show_turn(turn),
            SessionEvent::ClockTicked { time_left_secs, .. } => {
                self.time_left_secs = time_left_secs;
                display.show_clock(
                    &format_clock(time_left_secs),
                    timers.is_pending(TimerSlot::ClockFlash),
                );
            }
            SessionEvent::TimePenalty {
                reason,
                seconds,
                time_left_secs,
            } => {
                self.time_left_secs = time_left_secs;
                display.play_cue(Cue::TimeWarp);
                if reason == PenaltyReason::Jackpot {
                    display.play_cue(Cue::Jackpot);
                }
                self.flash_message(
                    &SessionEvent::penalty_message(seconds),
                    Tone::Info,
                    display,
                    timers,
                );
                display.show_clock(&format_clock(time_left_secs), true);
                timers.schedule(TimerSlot::ClockFlash, self.timings.clock_flash);
            }
            SessionEvent::SacrificeIntro { dialogue } => {
                self.intro = Some(Intro::Typing {
                    text: dialogue.chars().collect(),
                    shown: 0,
                });
                display.show_dialogue(Some(""), false);
                self.advance_intro(display, timers);
            }
            SessionEvent::SacrificeUnlocked => {
                display.set_sacrifice_control(SacrificeControl::Charging);
            }
            SessionEvent::SacrificeReady => {
                display.play_cue(Cue::SacrificeReady);
                display.set_sacrifice_control(SacrificeControl::Ready);
            }
            SessionEvent::SacrificeUsed { message } => {
                display.set_sacrifice_control(SacrificeControl::Charging);
                self.flash_message(&message, Tone::Info, display, timers);
            }
            SessionEvent::SessionEnded {
                outcome,
                message,
                screen,
                ..
            } => {
                if self.pending_screen.is_some() || self.screen_issued {
                    return;
                }
                display.set_betting_enabled(false);
                timers.cancel(TimerSlot::ClockTick);
                timers.cancel(TimerSlot::ReEnable);
                timers.cancel(TimerSlot::MessageClear);
                let tone = match outcome {
                    SessionOutcome::Won => Tone::Win,
                    _ => Tone::Loss,
                };
                display.show_message(&message, tone);
                self.pending_screen = Some(screen);
                timers.schedule(TimerSlot::ScreenTransition, self.timings.result_delay);
            }
        }
    }

    pub fn handle_timer<D: DisplaySink>(
        &mut self,
        slot: TimerSlot,
        display: &mut D,
        timers: &mut Timers,
    ) -> Option<Followup> {
        match slot {
            TimerSlot::SpinFrame => self.advance_spin(display, timers),
            TimerSlot::ReEnable => return Some(Followup::SettleSpin),
            TimerSlot::CountUp => self.advance_count_up(display, timers),
            TimerSlot::MoneyCount => self.advance_money(display, timers),
            TimerSlot::MessageClear => {
                display.clear_message();
                display.show_bet(None);
                display.show_winnings(None, true);
            }
            TimerSlot::ClockFlash => {
                display.show_clock(&format_clock(self.time_left_secs), false);
            }
            TimerSlot::Typewriter => return self.advance_intro(display, timers),
            TimerSlot::ScreenTransition => {
                if let Some(screen) = self.pending_screen.take() {
                    timers.cancel_all();
                    self.screen_issued = true;
                    debug!(?screen, "screen transition");
                    display.go_to(screen);
                }
            }
            TimerSlot::ClockTick => {}
        }
        None
    }

    fn ending(&self) -> bool {
        self.pending_screen.is_some() || self.screen_issued
    }

    fn flash_message<D: DisplaySink>(
        &mut self,
        text: &str,
        tone: Tone,
        display: &mut D,
        timers: &mut Timers,
    ) {
        if self.ending() {
            return;
        }
        display.show_message(text, tone);
        timers.schedule(TimerSlot::MessageClear, self.timings.message_clear);
    }

    fn clear_results<D: DisplaySink>(&mut self, display: &mut D, timers: &mut Timers) {
        timers.cancel(TimerSlot::MessageClear);
        timers.cancel(TimerSlot::CountUp);
        self.count_up = None;
        display.clear_message();
        display.show_bet(None);
        display.show_winnings(None, true);
    }

    fn advance_spin<D: DisplaySink>(&mut self, display: &mut D, timers: &mut Timers) {
        let Some(spin) = self.spin.as_mut() else {
            return;
        };
        if spin.frames_left > 0 {
            spin.frames_left -= 1;
            let number = self.rng.gen_range(0..POCKET_COUNT);
            let color = Color::ALL[self.rng.gen_range(0..Color::ALL.len())];
            display.show_wheel(number, color, false);
            timers.schedule(TimerSlot::SpinFrame, self.timings.spin_frame);
            return;
        }

        let Some(Spin {
            reveal: Some(reveal),
            ..
        }) = self.spin.take()
        else {
            return;
        };
        let result = reveal.result;
        display.show_wheel(result.result_number, result.result_color, true);
        display.show_bet(Some((reveal.bet, format_multiplier(reveal.display_multiplier))));
        if result.winnings == 0 {
            display.show_winnings(Some(0), true);
            display.play_cue(Cue::Lose);
            self.flash_message(LOSE_LABEL, Tone::Loss, display, timers);
            return;
        }

        let (increment, step) = count_up_plan(result.winnings);
        self.count_up = Some(CountUp {
            total: result.winnings,
            shown: 0,
            increment,
            step,
        });
        self.advance_count_up(display, timers);
    }

    fn advance_count_up<D: DisplaySink>(&mut self, display: &mut D, timers: &mut Timers) {
        let Some(count) = self.count_up.as_mut() else {
            return;
        };
        if count.shown < count.total {
            count.shown = count.shown.saturating_add(count.increment).min(count.total);
            display.show_winnings(Some(count.shown), count.shown == count.total);
            display.play_cue(Cue::WinTick);
            timers.schedule(TimerSlot::CountUp, count.step);
            return;
        }

        let total = count.total;
        self.count_up = None;
        let (label, cue) = win_label(total);
        if let Some(cue) = cue {
            display.play_cue(cue);
        }
        self.flash_message(label, Tone::Win, display, timers);
    }

    fn start_money_count<D: DisplaySink>(
        &mut self,
        from: u64,
        to: u64,
        display: &mut D,
        timers: &mut Timers,
    ) {
        timers.cancel(TimerSlot::MoneyCount);
        if from == to {
            self.money = None;
            display.show_money(to, true);
            return;
        }
        let duration = if to < from {
            self.timings.money_count_down
        } else {
            self.timings.money_count_up
        };
        self.money = Some(MoneyCount {
            from,
            to,
            frame: 0,
            frames: frames_in(duration, self.timings.count_frame),
        });
        timers.schedule(TimerSlot::MoneyCount, self.timings.count_frame);
    }

    fn advance_money<D: DisplaySink>(&mut self, display: &mut D, timers: &mut Timers) {
        let Some(count) = self.money.as_mut() else {
            return;
        };
        count.frame += 1;
        if count.frame >= count.frames {
            display.show_money(count.to, true);
            self.money = None;
            return;
        }
        let t = f64::from(count.frame) / f64::from(count.frames);
        let value = count.from as f64 + (count.to as f64 - count.from as f64) * t;
        display.show_money(value.round() as u64, false);
        timers.schedule(TimerSlot::MoneyCount, self.timings.count_frame);
    }

    fn advance_intro<D: DisplaySink>(
        &mut self,
        display: &mut D,
        timers: &mut Timers,
    ) -> Option<Followup> {
        match self.intro.take()? {
            Intro::Typing { text, mut shown } if shown < text.len() => {
                shown += 1;
                let typed: String = text[..shown].iter().collect();
                display.show_dialogue(Some(&typed), shown == text.len());
                self.intro = Some(Intro::Typing { text, shown });
                timers.schedule(TimerSlot::Typewriter, self.timings.type_speed);
                None
            }
            Intro::Typing { .. } => {
                self.intro = Some(Intro::Holding);
                timers.schedule(TimerSlot::Typewriter, self.timings.intro_hold);
                None
            }
            Intro::Holding => {
                display.show_dialogue(None, true);
                Some(Followup::FinishSacrificeIntro)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_labels() {
        assert_eq!(win_label(5_000), ("JACKPOT!!!", Some(Cue::BigWin)));
        assert_eq!(win_label(62_500), ("JACKPOT!!!", Some(Cue::BigWin)));
        assert_eq!(win_label(4_999), ("HUGE WIN!", None));
        assert_eq!(win_label(1_000), ("HUGE WIN!", None));
        assert_eq!(win_label(999), ("NICE!", None));
        assert_eq!(win_label(2), ("NICE!", None));
    }

    #[test]
    fn test_count_up_plan() {
        // ln(201) * 0.4 > 2, so the count takes the full two seconds over 40 steps.
        let (increment, step) = count_up_plan(200);
        assert_eq!(increment, 5);
        assert_eq!(step, Duration::from_millis(50));

        // Small wins climb one unit at a time over the minimum half second.
        let (increment, step) = count_up_plan(2);
        assert_eq!(increment, 1);
        assert_eq!(step, Duration::from_millis(250));
    }

    #[test]
    fn test_frames_in() {
        assert_eq!(
            frames_in(Duration::from_millis(1_800), Duration::from_millis(50)),
            36
        );
        assert_eq!(
            frames_in(Duration::from_millis(1_000), Duration::from_millis(16)),
            63
        );
        assert_eq!(frames_in(Duration::ZERO, Duration::from_millis(16)), 1);
    }
}
