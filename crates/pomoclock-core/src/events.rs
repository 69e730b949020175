use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{IntervalId, IntervalKind};

/// Every control operation and every completing tick produces an Event.
/// The presentation boundary logs them; tests match on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    IntervalStarted {
        interval: IntervalId,
        name: String,
        at: DateTime<Utc>,
    },
    IntervalPaused {
        interval: IntervalId,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    IntervalResumed {
        interval: IntervalId,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    IntervalRestarted {
        interval: IntervalId,
        length_secs: u64,
        at: DateTime<Utc>,
    },
    /// Remaining time reached zero; overrun counting has begun.
    IntervalCompleted {
        interval: IntervalId,
        kind: IntervalKind,
        name: String,
        at: DateTime<Utc>,
    },
    IntervalAdvanced {
        from: IntervalId,
        to: IntervalId,
        kind: IntervalKind,
        at: DateTime<Utc>,
    },
    /// Every interval was rebuilt from the template; all progress dropped.
    SequenceRebuilt {
        intervals: usize,
        at: DateTime<Utc>,
    },
}
