//! Shared ownership of the one active sequence.
//!
//! The clock driver and the button handlers each hold a clone of the same
//! [`SequenceManager`]. Every read and every mutation goes through a single
//! mutex, so a tick and a control command are always applied one after the
//! other and a snapshot never observes a half-applied change.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::interval::IntervalStatus;
use super::sequence::Sequence;
use super::speed::Speed;
use super::template::SequenceTemplate;
use crate::error::TimerError;
use crate::events::Event;
use crate::snapshot::Snapshot;

/// Zero-argument control commands bound to physical buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Start,
    TogglePause,
    RestartCurrent,
    Advance,
    RebuildSequence,
}

#[derive(Debug, Clone)]
pub struct SequenceManager {
    speed: Speed,
    sequence: Arc<Mutex<Sequence>>,
}

impl SequenceManager {
    pub fn new(template: SequenceTemplate, speed: Speed) -> Result<Self, TimerError> {
        let sequence = Sequence::build(template)?;
        Ok(Self {
            speed,
            sequence: Arc::new(Mutex::new(sequence)),
        })
    }

    /// The reference sequence at real-time speed.
    pub fn reference() -> Result<Self, TimerError> {
        Self::new(SequenceTemplate::reference(), Speed::REALTIME)
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// A panic while holding the lock can only interrupt a single-field
    /// update, so the state behind a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Sequence> {
        self.sequence.lock().unwrap_or_else(|poisoned| {
            warn!("sequence lock poisoned; recovering");
            poisoned.into_inner()
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> IntervalStatus {
        self.lock().status()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    /// Run `f` against the sequence while holding the lock.
    pub fn inspect<R>(&self, f: impl FnOnce(&Sequence) -> R) -> R {
        f(&self.lock())
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn tick(&self) -> Option<Event> {
        self.lock().tick_current(self.speed)
    }

    /// Tick and capture the result under one lock acquisition.
    pub fn tick_and_snapshot(&self) -> (Snapshot, Option<Event>) {
        let mut sequence = self.lock();
        let event = sequence.tick_current(self.speed);
        (sequence.snapshot(), event)
    }

    pub fn start_current(&self) -> Event {
        self.lock().start_current()
    }

    pub fn toggle_pause(&self) -> Result<Event, TimerError> {
        self.lock().pause_current()
    }

    pub fn restart_current(&self) -> Event {
        self.lock().restart_current()
    }

    pub fn advance(&self) -> Event {
        self.lock().advance()
    }

    pub fn rebuild(&self) -> Result<Event, TimerError> {
        self.lock().rebuild()
    }

    pub fn apply(&self, command: Command) -> Result<Event, TimerError> {
        match command {
            Command::Start => Ok(self.start_current()),
            Command::TogglePause => self.toggle_pause(),
            Command::RestartCurrent => Ok(self.restart_current()),
            Command::Advance => Ok(self.advance()),
            Command::RebuildSequence => self.rebuild(),
        }
    }
}
