//! Turn controller.
//!
//! Owns the [`SessionState`] and is the only thing that mutates it. Collaborators are injected at
//! construction: the clock, the sacrifice cooldown, the wheel and the sink that receives
//! [`SessionEvent`]s for the presentation layer.
//!
//! A turn runs strictly in order: validate, deduct, draw, resolve, jackpot penalty, credit,
//! advance the turn counter, notify the sacrifice, emit, terminal check. Nothing can interleave
//! with it; the runtime calls in from a single task.

use std::time::Duration;

use rand::{rngs::StdRng, RngCore};
use soulbet_types::{
    BetRequest, BetSlip, GameError, IllegalAction, LossReason, PenaltyReason, SacrificeState,
    Screen, SessionConfig, SessionEvent, SessionOutcome, SessionState, SpinResult, LOSS_MESSAGE,
    SACRIFICE_INTRO_DIALOGUE, SACRIFICE_USED_MESSAGE, WIN_MESSAGE,
};
use tracing::{debug, info};

use crate::clock::{Penalize, PenaltyOutcome, SessionClock};
use crate::outcome::resolve_spin;
use crate::rng::{RandomWheel, SeedStreams, Wheel};
use crate::sacrifice::{Sacrifice, SacrificeSignal};

/// Receives events produced by the controller.
pub trait EventSink {
    fn emit(&mut self, event: SessionEvent);
}

impl EventSink for Vec<SessionEvent> {
    fn emit(&mut self, event: SessionEvent) {
        self.push(event);
    }
}

/// Result of an accepted bet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurnOutcome {
    pub bet: BetRequest,
    pub spin: SpinResult,
    /// Balance after crediting winnings.
    pub money: u64,
    pub turn: u32,
    pub jackpot_penalty: Option<PenaltyOutcome>,
    pub session: SessionOutcome,
}

pub struct TurnController<W, S, R = StdRng> {
    config: SessionConfig,
    state: SessionState,
    clock: SessionClock<R>,
    sacrifice: Sacrifice,
    wheel: W,
    sink: S,
    spin_in_flight: bool,
}

impl<S: EventSink> TurnController<RandomWheel<StdRng>, S> {
    /// Build a controller whose wheel, clock and sacrifice intro all derive from one seed.
    pub fn from_seed(config: SessionConfig, seed: u64, sink: S) -> Self {
        let streams = SeedStreams::new(seed);
        let clock = SessionClock::new(&config, streams.clock());
        let sacrifice = Sacrifice::new(&config, &mut streams.sacrifice());
        let wheel = RandomWheel::new(streams.wheel());
        Self::new(config, clock, sacrifice, wheel, sink)
    }
}

impl<W: Wheel, S: EventSink, R: RngCore> TurnController<W, S, R> {
    pub fn new(
        config: SessionConfig,
        clock: SessionClock<R>,
        sacrifice: Sacrifice,
        wheel: W,
        sink: S,
    ) -> Self {
        let state = SessionState::new(
            config.starting_money,
            config.target_money,
            clock.time_left(),
        );
        Self {
            config,
            state,
            clock,
            sacrifice,
            wheel,
            sink,
            spin_in_flight: false,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn sacrifice_state(&self) -> SacrificeState {
        self.sacrifice.state()
    }

    pub fn clock(&self) -> &SessionClock<R> {
        &self.clock
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// True when a new bet would be accepted for processing.
    pub fn betting_open(&self) -> bool {
        self.state.is_ongoing() && !self.spin_in_flight
    }

    pub fn is_spin_in_flight(&self) -> bool {
        self.spin_in_flight
    }

    /// Place a bet and resolve the spin.
    ///
    /// Rejections never mutate state. `InvalidBet` and `InsufficientFunds` are reported to the
    /// sink as a player-facing message; illegal actions (session over, spin still presenting)
    /// are dropped silently.
    pub fn place_bet(&mut self, slip: &BetSlip) -> Result<TurnOutcome, GameError> {
        let bet = match self.validate_bet(slip) {
            Ok(bet) => bet,
            Err(err) => {
                self.reject(&err);
                return Err(err);
            }
        };

        // Deduct before the draw so a losing bet is already reflected in the balance.
        self.state.money -= bet.amount;
        self.sink.emit(SessionEvent::BetAccepted {
            bet,
            money: self.state.money,
        });

        let draw = self.wheel.spin();
        let spin = resolve_spin(&bet, draw);

        let jackpot_penalty = if spin.is_jackpot() {
            Some(self.charge_penalty(PenaltyReason::Jackpot, self.config.jackpot_penalty_seconds))
        } else {
            None
        };

        let before_credit = self.state.money;
        self.state.money = self.state.money.saturating_add(spin.winnings);
        self.state.turn_count = self.state.turn_count.saturating_add(1);
        let turn = self.state.turn_count;
        self.sink.emit(SessionEvent::TurnAdvanced { turn });

        match self.sacrifice.on_turn_advanced(turn) {
            Some(SacrificeSignal::Intro) => self.sink.emit(SessionEvent::SacrificeIntro {
                dialogue: SACRIFICE_INTRO_DIALOGUE.to_string(),
            }),
            Some(SacrificeSignal::Ready) => self.sink.emit(SessionEvent::SacrificeReady),
            None => {}
        }

        self.sink.emit(SessionEvent::MoneyChanged {
            from: before_credit,
            to: self.state.money,
        });
        self.sink.emit(SessionEvent::SpinResolved {
            bet: bet.amount,
            pick: bet.pick,
            result: spin,
            display_multiplier: spin.display_multiplier(bet.amount),
        });
        info!(
            turn,
            draw,
            amount = bet.amount,
            match_kind = ?spin.match_kind,
            winnings = spin.winnings,
            money = self.state.money,
            "spin resolved"
        );

        if self.state.money == 0 {
            self.finish(SessionOutcome::Lost, Some(LossReason::Bankrupt));
        } else if self.state.money >= self.state.target_money {
            self.finish(SessionOutcome::Won, None);
        } else if self.clock.is_expired() {
            self.finish(SessionOutcome::Lost, Some(LossReason::ClockExpired));
        } else {
            self.spin_in_flight = true;
        }

        Ok(TurnOutcome {
            bet,
            spin,
            money: self.state.money,
            turn,
            jackpot_penalty,
            session: self.state.outcome,
        })
    }

    /// The spin presentation finished. Returns whether betting is open again.
    pub fn spin_settled(&mut self) -> bool {
        self.spin_in_flight = false;
        self.betting_open()
    }

    /// Trade clock time through the sacrifice. A silent no-op unless it is ready.
    pub fn use_sacrifice(&mut self) -> Result<PenaltyOutcome, GameError> {
        if !self.state.is_ongoing() {
            debug!("sacrifice ignored: session over");
            return Err(IllegalAction::SessionOver.into());
        }
        let Some(outcome) = self.sacrifice.activate(&mut self.clock) else {
            debug!(state = ?self.sacrifice.state(), "sacrifice ignored: not ready");
            return Err(IllegalAction::SacrificeNotReady.into());
        };

        self.state.time_left_secs = outcome.time_left_secs;
        self.sink.emit(SessionEvent::TimePenalty {
            reason: PenaltyReason::Sacrifice,
            seconds: outcome.seconds,
            time_left_secs: outcome.time_left_secs,
        });
        self.sink.emit(SessionEvent::SacrificeUsed {
            message: SACRIFICE_USED_MESSAGE.to_string(),
        });

        if outcome.expired {
            self.finish(SessionOutcome::Lost, Some(LossReason::ClockExpired));
        }
        Ok(outcome)
    }

    /// The intro dialogue has played out: unlock the sacrifice control.
    pub fn finish_sacrifice_intro(&mut self) -> bool {
        if !self.sacrifice.finish_intro() {
            return false;
        }
        self.sink.emit(SessionEvent::SacrificeUnlocked);
        if self.sacrifice.is_ready() {
            self.sink.emit(SessionEvent::SacrificeReady);
        }
        true
    }

    /// Delay before the first clock tick. `None` once the session is over.
    pub fn start_clock(&mut self) -> Option<Duration> {
        if !self.state.is_ongoing() {
            return None;
        }
        self.clock.first_delay()
    }

    /// Run one clock tick. Returns the delay before the next tick, or `None` when the loop
    /// should stop (clock expired or session over).
    pub fn tick_clock(&mut self) -> Option<Duration> {
        if !self.state.is_ongoing() {
            self.clock.stop();
            return None;
        }

        let tick = self.clock.tick();
        self.state.time_left_secs = tick.time_left_secs;
        self.sink.emit(SessionEvent::ClockTicked {
            decrement_secs: tick.decrement_secs,
            time_left_secs: tick.time_left_secs,
        });

        if tick.expired {
            self.finish(SessionOutcome::Lost, Some(LossReason::ClockExpired));
        }
        tick.next_tick
    }

    fn validate_bet(&self, slip: &BetSlip) -> Result<BetRequest, GameError> {
        if !self.state.is_ongoing() {
            return Err(IllegalAction::SessionOver.into());
        }
        if self.spin_in_flight {
            return Err(IllegalAction::SpinInProgress.into());
        }
        let bet = slip.parse()?;
        if bet.amount > self.state.money {
            return Err(GameError::InsufficientFunds {
                amount: bet.amount,
                balance: self.state.money,
            });
        }
        Ok(bet)
    }

    fn reject(&mut self, err: &GameError) {
        match err.player_message() {
            Some(message) => {
                info!(%err, "bet rejected");
                self.sink.emit(SessionEvent::BetRejected {
                    message: message.to_string(),
                });
            }
            None => debug!(%err, "bet ignored"),
        }
    }

    fn charge_penalty(&mut self, reason: PenaltyReason, seconds: f64) -> PenaltyOutcome {
        let outcome = self.clock.apply_penalty(seconds);
        self.state.time_left_secs = outcome.time_left_secs;
        self.sink.emit(SessionEvent::TimePenalty {
            reason,
            seconds: outcome.seconds,
            time_left_secs: outcome.time_left_secs,
        });
        outcome
    }

    fn finish(&mut self, outcome: SessionOutcome, loss_reason: Option<LossReason>) {
        if self.state.outcome.is_terminal() {
            return;
        }
        self.state.outcome = outcome;
        self.spin_in_flight = false;
        self.clock.stop();

        let (message, screen) = match outcome {
            SessionOutcome::Won => (WIN_MESSAGE, Screen::Win),
            _ => (LOSS_MESSAGE, Screen::Loss),
        };
        info!(
            ?outcome,
            ?loss_reason,
            money = self.state.money,
            turn = self.state.turn_count,
            time_left = self.state.time_left_secs,
            "session ended"
        );
        self.sink.emit(SessionEvent::SessionEnded {
            outcome,
            loss_reason,
            message: message.to_string(),
            screen,
        });
    }
}
