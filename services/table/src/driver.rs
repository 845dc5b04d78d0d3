//! Session driver.
//!
//! One task owns the turn controller, the presenter and the display. Player commands and timer
//! firings arrive over channels and are handled one at a time, so every mutation of the session
//! is serialized without locks.

use rand::{rngs::StdRng, RngCore};
use soulbet_execution::{RandomWheel, SeedStreams, TurnController, Wheel};
use soulbet_types::{BetSlip, SessionEvent};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::ValidatedConfig;
use crate::display::DisplaySink;
use crate::presenter::{Followup, Presenter};
use crate::timers::{TimerFired, TimerSlot, Timers};

/// Requests from the input surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    PlaceBet(BetSlip),
    UseSacrifice,
    Status,
    Quit,
}

pub struct SessionDriver<W, D, R = StdRng> {
    controller: TurnController<W, Vec<SessionEvent>, R>,
    presenter: Presenter,
    display: D,
    timers: Timers,
    fired: mpsc::UnboundedReceiver<TimerFired>,
}

impl<D: DisplaySink> SessionDriver<RandomWheel<StdRng>, D> {
    pub fn from_config(config: &ValidatedConfig, display: D) -> Self {
        let streams = SeedStreams::new(config.seed);
        let controller = TurnController::from_seed(config.session.clone(), config.seed, Vec::new());
        let presenter = Presenter::new(config.presentation, streams.presentation());
        Self::new(controller, presenter, display)
    }
}

impl<W: Wheel, D: DisplaySink, R: RngCore> SessionDriver<W, D, R> {
    pub fn new(
        controller: TurnController<W, Vec<SessionEvent>, R>,
        presenter: Presenter,
        display: D,
    ) -> Self {
        let (timers, fired) = Timers::new();
        Self {
            controller,
            presenter,
            display,
            timers,
            fired,
        }
    }

    /// Play the session until the win or loss screen is shown or the player quits.
    ///
    /// Returns the display so callers can inspect or flush it.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) -> D {
        self.start();
        while !self.presenter.screen_issued() {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Quit) | None => {
                        info!("player left the table");
                        break;
                    }
                    Some(command) => self.handle_command(command),
                },
                Some(fired) = self.fired.recv() => self.handle_timer(fired),
            }
        }
        self.timers.cancel_all();
        self.display
    }

    fn start(&mut self) {
        let state = self.controller.state().clone();
        self.presenter.start(&state, &mut self.display);
        if let Some(delay) = self.controller.start_clock() {
            self.timers.schedule(TimerSlot::ClockTick, delay);
        }
        info!(
            money = state.money,
            target = state.target_money,
            time_left = state.time_left_secs,
            "session started"
        );
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::PlaceBet(slip) => {
                if let Err(err) = self.controller.place_bet(&slip) {
                    debug!(%err, "bet not placed");
                }
            }
            Command::UseSacrifice => {
                if let Err(err) = self.controller.use_sacrifice() {
                    debug!(%err, "sacrifice not used");
                }
            }
            Command::Status => {
                self.display.show_status(
                    self.controller.state(),
                    self.controller.sacrifice_state(),
                );
            }
            Command::Quit => {}
        }
        self.flush();
    }

    fn handle_timer(&mut self, fired: TimerFired) {
        if !self.timers.accept(fired) {
            return;
        }
        match fired.slot {
            TimerSlot::ClockTick => {
                if let Some(delay) = self.controller.tick_clock() {
                    self.timers.schedule(TimerSlot::ClockTick, delay);
                }
            }
            slot => {
                match self
                    .presenter
                    .handle_timer(slot, &mut self.display, &mut self.timers)
                {
                    Some(Followup::SettleSpin) => {
                        if self.controller.spin_settled() {
                            self.display.set_betting_enabled(true);
                        }
                    }
                    Some(Followup::FinishSacrificeIntro) => {
                        self.controller.finish_sacrifice_intro();
                    }
                    None => {}
                }
            }
        }
        self.flush();
    }

    /// Hand every event the controller produced to the presenter.
    fn flush(&mut self) {
        let events = std::mem::take(self.controller.sink_mut());
        for event in events {
            self.presenter
                .handle_event(event, &mut self.display, &mut self.timers);
        }
    }
}
