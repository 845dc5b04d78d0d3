//! Cancellable timers.
//!
//! Every pending delay lives in a named [`TimerSlot`]. Scheduling into an occupied slot aborts the
//! previous task, and a firing is only honoured if it carries the id of the slot's current timer,
//! so a stale firing that was already queued when it got superseded is dropped.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

/// Named timer slots. At most one timer per slot is pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    ClockTick,
    SpinFrame,
    ReEnable,
    CountUp,
    MoneyCount,
    MessageClear,
    ClockFlash,
    Typewriter,
    ScreenTransition,
}

/// Posted back to the driver when a timer elapses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerFired {
    pub slot: TimerSlot,
    pub id: u64,
}

/// A spawned sleep. Aborted on drop.
#[derive(Debug)]
pub struct TimerHandle {
    id: u64,
    handle: JoinHandle<()>,
}

impl TimerHandle {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub struct Timers {
    sender: mpsc::UnboundedSender<TimerFired>,
    pending: HashMap<TimerSlot, TimerHandle>,
    next_id: u64,
}

impl Timers {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerFired>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let timers = Self {
            sender,
            pending: HashMap::new(),
            next_id: 0,
        };
        (timers, receiver)
    }

    /// Arm `slot` to fire after `delay`, superseding whatever was pending there.
    pub fn schedule(&mut self, slot: TimerSlot, delay: Duration) {
        self.next_id += 1;
        let id = self.next_id;
        let sender = self.sender.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = sender.send(TimerFired { slot, id });
        });
        if let Some(previous) = self.pending.insert(slot, TimerHandle { id, handle }) {
            trace!(?slot, superseded = previous.id(), id, "timer replaced");
        }
    }

    pub fn cancel(&mut self, slot: TimerSlot) {
        if let Some(previous) = self.pending.remove(&slot) {
            trace!(?slot, id = previous.id(), "timer cancelled");
        }
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, slot: TimerSlot) -> bool {
        self.pending.contains_key(&slot)
    }

    /// Claim a firing. Returns false for firings of superseded or cancelled timers.
    pub fn accept(&mut self, fired: TimerFired) -> bool {
        match self.pending.get(&fired.slot) {
            Some(current) if current.id() == fired.id => {
                self.pending.remove(&fired.slot);
                true
            }
            _ => {
                trace!(slot = ?fired.slot, id = fired.id, "stale timer dropped");
                false
            }
        }
    }
}
