//! Circular rotation of intervals.
//!
//! Exactly one interval is current; the rest wait in a FIFO queue. The set
//! of intervals is fixed at build time and only `rebuild` replaces it.

use std::collections::VecDeque;

use chrono::{Local, Utc};
use tracing::{debug, info};

use super::factory::IntervalFactory;
use super::interval::{Interval, IntervalState, IntervalStatus};
use super::speed::Speed;
use super::template::SequenceTemplate;
use crate::error::TimerError;
use crate::events::Event;
use crate::snapshot::Snapshot;

#[derive(Debug, Clone)]
pub struct Sequence {
    template: SequenceTemplate,
    current: Interval,
    queue: VecDeque<Interval>,
}

impl Sequence {
    /// Build every interval from the template and make the first current.
    pub fn build(template: SequenceTemplate) -> Result<Self, TimerError> {
        let mut factory = IntervalFactory::new();
        let mut queue = template
            .entries
            .iter()
            .map(|entry| factory.from_template(entry))
            .collect::<Result<VecDeque<_>, _>>()?;

        let current = queue.pop_front().ok_or_else(|| {
            TimerError::invalid_argument("template", "sequence template has no intervals")
        })?;

        info!(
            intervals = template.len(),
            total_secs = template.total_secs(),
            "sequence built"
        );
        Ok(Self {
            template,
            current,
            queue,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn current(&self) -> &Interval {
        &self.current
    }

    /// Intervals waiting their turn, next-up first.
    pub fn queued(&self) -> impl Iterator<Item = &Interval> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len() + 1
    }

    pub fn template(&self) -> &SequenceTemplate {
        &self.template
    }

    pub fn status(&self) -> IntervalStatus {
        self.current.status()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.current.status(), Local::now())
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start_current(&mut self) -> Event {
        self.current.start();
        Event::IntervalStarted {
            interval: self.current.id(),
            name: self.current.name().to_string(),
            at: Utc::now(),
        }
    }

    /// Advance the current interval by `speed` logical seconds.
    ///
    /// Returns `IntervalCompleted` if it reached zero during this tick.
    pub fn tick_current(&mut self, speed: Speed) -> Option<Event> {
        let completed = self.current.advance_by(u64::from(speed.get()));
        completed.then(|| {
            info!(interval = %self.current.name(), kind = %self.current.kind(), "interval complete");
            Event::IntervalCompleted {
                interval: self.current.id(),
                kind: self.current.kind(),
                name: self.current.name().to_string(),
                at: Utc::now(),
            }
        })
    }

    pub fn pause_current(&mut self) -> Result<Event, TimerError> {
        let state = self.current.toggle_pause()?;
        let interval = self.current.id();
        let remaining_secs = self.current.remaining_secs();
        let at = Utc::now();
        Ok(match state {
            IntervalState::Paused => Event::IntervalPaused {
                interval,
                remaining_secs,
                at,
            },
            _ => Event::IntervalResumed {
                interval,
                remaining_secs,
                at,
            },
        })
    }

    pub fn restart_current(&mut self) -> Event {
        self.current.restart();
        Event::IntervalRestarted {
            interval: self.current.id(),
            length_secs: self.current.length_secs(),
            at: Utc::now(),
        }
    }

    /// Reset the current interval, send it to the back of the queue and
    /// start whichever interval has waited longest.
    ///
    /// With a single interval this degenerates to restarting it.
    pub fn advance(&mut self) -> Event {
        let from = self.current.id();
        self.current.restart();
        if let Some(next) = self.queue.pop_front() {
            let previous = std::mem::replace(&mut self.current, next);
            self.queue.push_back(previous);
        }
        self.current.start();

        debug!(from = %from, to = %self.current.id(), name = %self.current.name(), "advance");
        Event::IntervalAdvanced {
            from,
            to: self.current.id(),
            kind: self.current.kind(),
            at: Utc::now(),
        }
    }

    /// Throw away every interval and build again from the template.
    pub fn rebuild(&mut self) -> Result<Event, TimerError> {
        *self = Self::build(self.template.clone())?;
        Ok(Event::SequenceRebuilt {
            intervals: self.len(),
            at: Utc::now(),
        })
    }
}
