//! Read-only view of the current interval handed to the presentation layer.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::timer::{Color, IntervalId, IntervalKind, IntervalState, IntervalStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp: DateTime<Local>,
    pub interval_id: IntervalId,
    pub interval_name: String,
    pub interval_description: String,
    pub interval_kind: IntervalKind,
    pub interval_color: Color,
    pub length_sec: u64,
    pub state: IntervalState,
    /// Remaining seconds while counting down; negative overrun once complete.
    pub remaining_or_overrun_seconds: i64,
    pub is_overrun: bool,
}

impl Snapshot {
    pub fn capture(status: &IntervalStatus, timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            interval_id: status.id,
            interval_name: status.name.clone(),
            interval_description: status.description.clone(),
            interval_kind: status.kind,
            interval_color: status.color,
            length_sec: status.length_secs,
            state: status.state,
            remaining_or_overrun_seconds: status.display_secs(),
            is_overrun: status.is_overrun(),
        }
    }

    /// `MM:SS`, prefixed with `-` once the interval has overrun. Minutes are
    /// not wrapped into hours.
    pub fn countdown(&self) -> String {
        let secs = self.remaining_or_overrun_seconds;
        let sign = if secs < 0 { "-" } else { "" };
        let abs = secs.unsigned_abs();
        format!("{sign}{:02}:{:02}", abs / 60, abs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(state: IntervalState, remaining_secs: u64, overrun_secs: u64) -> IntervalStatus {
        IntervalStatus {
            id: IntervalId(2),
            kind: IntervalKind::Work,
            color: Color::RED,
            name: "Work 2".into(),
            description: "normal working timer".into(),
            length_secs: 1500,
            remaining_secs,
            overrun_secs,
            state,
        }
    }

    #[test]
    fn countdown_while_running() {
        let snap = Snapshot::capture(&status(IntervalState::Running, 1499, 0), Local::now());
        assert!(!snap.is_overrun);
        assert_eq!(snap.remaining_or_overrun_seconds, 1499);
        assert_eq!(snap.countdown(), "24:59");
    }

    #[test]
    fn countdown_when_overrun() {
        let snap = Snapshot::capture(&status(IntervalState::Complete, 0, 65), Local::now());
        assert!(snap.is_overrun);
        assert_eq!(snap.remaining_or_overrun_seconds, -65);
        assert_eq!(snap.countdown(), "-01:05");
    }

    #[test]
    fn just_completed_shows_zero_without_sign() {
        let snap = Snapshot::capture(&status(IntervalState::Complete, 0, 0), Local::now());
        assert!(snap.is_overrun);
        assert_eq!(snap.countdown(), "00:00");
    }

    #[test]
    fn minutes_are_not_wrapped() {
        let snap = Snapshot::capture(&status(IntervalState::Paused, 2 * 3600, 0), Local::now());
        assert_eq!(snap.countdown(), "120:00");
    }

    #[test]
    fn json_carries_hex_color() {
        let snap = Snapshot::capture(&status(IntervalState::Paused, 1500, 0), Local::now());
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["interval_color"], "FF0000");
        assert_eq!(json["state"], "paused");
    }
}
