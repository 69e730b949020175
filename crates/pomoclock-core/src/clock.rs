//! Clock driver.
//!
//! The only long-running task in the core. Once per wall-clock period it
//! advances the current interval by the manager's speed, captures a snapshot
//! under the same lock, and publishes it on a `watch` channel. The channel
//! holds a single slot, so a slow renderer only ever sees the latest
//! snapshot.
//!
//! ## Usage
//!
//! ```ignore
//! let manager = SequenceManager::reference()?;
//! let handle = ClockDriver::new(manager.clone(), ClockDriver::DEFAULT_PERIOD)?.spawn();
//! let mut snapshots = handle.snapshots();
//! while snapshots.changed().await.is_ok() {
//!     render(&snapshots.borrow_and_update());
//! }
//! ```

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::error::TimerError;
use crate::events::Event;
use crate::snapshot::Snapshot;
use crate::timer::SequenceManager;

pub struct ClockDriver {
    manager: SequenceManager,
    period: Duration,
    tx: watch::Sender<Snapshot>,
}

impl ClockDriver {
    pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

    /// Fails with `InvalidArgument` for a zero period.
    pub fn new(manager: SequenceManager, period: Duration) -> Result<Self, TimerError> {
        if period.is_zero() {
            return Err(TimerError::InvalidArgument {
                field: "period".into(),
                message: "clock period must be greater than zero".into(),
            });
        }
        let (tx, _rx) = watch::channel(manager.snapshot());
        Ok(Self {
            manager,
            period,
            tx,
        })
    }

    pub fn manager(&self) -> &SequenceManager {
        &self.manager
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    /// One clock step: tick, capture, publish.
    ///
    /// Never fails. Publishing with no live receivers is not an error.
    pub fn step(&self) -> (Snapshot, Option<Event>) {
        let (snapshot, event) = self.manager.tick_and_snapshot();
        if let Some(Event::IntervalCompleted { name, kind, .. }) = &event {
            info!(interval = %name, kind = %kind, "interval reached zero, counting overrun");
        }
        debug!(
            interval = %snapshot.interval_name,
            remaining = snapshot.remaining_or_overrun_seconds,
            "tick"
        );
        self.tx.send_replace(snapshot.clone());
        (snapshot, event)
    }

    /// Step once per period, forever. The first step happens one period
    /// after the call.
    pub async fn run(self) {
        info!(
            period_ms = self.period.as_millis() as u64,
            speed = %self.manager.speed(),
            "clock started"
        );
        let mut ticker = time::interval_at(time::Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.step();
        }
    }

    /// Run on the current tokio runtime.
    pub fn spawn(self) -> ClockHandle {
        let snapshots = self.subscribe();
        let manager = self.manager.clone();
        let task = tokio::spawn(self.run());
        ClockHandle {
            task,
            snapshots,
            manager,
        }
    }
}

/// Owner of a running clock task.
pub struct ClockHandle {
    task: JoinHandle<()>,
    snapshots: watch::Receiver<Snapshot>,
    manager: SequenceManager,
}

impl ClockHandle {
    pub fn snapshots(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    pub fn manager(&self) -> &SequenceManager {
        &self.manager
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop ticking. An in-flight tick finishes under the lock or never
    /// starts; there is nothing to roll back.
    pub async fn shutdown(self) {
        self.task.abort();
        let _ = self.task.await;
        info!("clock stopped");
    }
}
