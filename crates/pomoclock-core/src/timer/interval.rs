//! A single countdown interval.
//!
//! ## State Transitions
//!
//! ```text
//! Paused <-> Running -> Complete
//!   \___________________/  restart() from any state -> Running
//! ```
//!
//! Time only moves through [`Interval::tick`], which the owning sequence
//! calls once per logical second. Once an interval reaches zero it stays
//! `Complete` and counts overrun upward without bound until restarted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TimerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalState {
    Paused,
    Running,
    Complete,
}

impl IntervalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalState::Paused => "paused",
            IntervalState::Running => "running",
            IntervalState::Complete => "complete",
        }
    }
}

impl fmt::Display for IntervalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Work or Break. Determines presentation attributes only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntervalKind {
    Work,
    Break,
}

impl IntervalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalKind::Work => "Work",
            IntervalKind::Break => "Break",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            IntervalKind::Work => Color::RED,
            IntervalKind::Break => Color::GREEN,
        }
    }
}

impl FromStr for IntervalKind {
    type Err = TimerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Work" => Ok(IntervalKind::Work),
            "Break" => Ok(IntervalKind::Break),
            other => Err(TimerError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RGB display color, serialized as a six-digit hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color { r: 0xFF, g: 0, b: 0 };
    pub const GREEN: Color = Color { r: 0, g: 0xFF, b: 0 };

    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.hex()
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let hex = value.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("expected RRGGBB, got '{value}'"));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| format!("bad color '{value}': {e}"))
        };
        Ok(Color {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

/// Position of the interval in the template it was built from.
///
/// Stable across rotation, so it identifies an interval for the lifetime of
/// the sequence that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntervalId(pub usize);

impl fmt::Display for IntervalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    id: IntervalId,
    kind: IntervalKind,
    name: String,
    description: String,
    length_secs: u64,
    remaining_secs: u64,
    /// Seconds elapsed since reaching zero. Counts up, never negative.
    overrun_secs: u64,
    state: IntervalState,
}

impl Interval {
    /// Create a paused interval with its full length remaining.
    ///
    /// Fails with `InvalidArgument` for a blank name or a zero length.
    pub fn new(
        id: IntervalId,
        kind: IntervalKind,
        name: impl Into<String>,
        description: impl Into<String>,
        length_secs: u64,
    ) -> Result<Self, TimerError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TimerError::invalid_argument(
                "name",
                "interval name can't be blank",
            ));
        }
        if length_secs == 0 {
            return Err(TimerError::invalid_argument(
                "length_sec",
                "interval length must be greater than 0 seconds",
            ));
        }

        Ok(Self {
            id,
            kind,
            name,
            description: description.into(),
            length_secs,
            remaining_secs: length_secs,
            overrun_secs: 0,
            state: IntervalState::Paused,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> IntervalId {
        self.id
    }

    pub fn kind(&self) -> IntervalKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn length_secs(&self) -> u64 {
        self.length_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn overrun_secs(&self) -> u64 {
        self.overrun_secs
    }

    pub fn state(&self) -> IntervalState {
        self.state
    }

    pub fn status(&self) -> IntervalStatus {
        IntervalStatus {
            id: self.id,
            kind: self.kind,
            color: self.color(),
            name: self.name.clone(),
            description: self.description.clone(),
            length_secs: self.length_secs,
            remaining_secs: self.remaining_secs,
            overrun_secs: self.overrun_secs,
            state: self.state,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start or unpause. A complete interval goes back to `Complete` on its
    /// next tick and keeps its overrun.
    pub fn start(&mut self) {
        debug!(interval = %self.name, from = %self.state, "start");
        self.state = IntervalState::Running;
    }

    /// Flip between `Paused` and `Running` and return the new state.
    ///
    /// A complete interval has nothing left to pause, so the call is
    /// rejected and the interval is left untouched. That includes one that
    /// was started again after completing.
    pub fn toggle_pause(&mut self) -> Result<IntervalState, TimerError> {
        let next = match self.state {
            IntervalState::Paused if self.remaining_secs > 0 => IntervalState::Running,
            IntervalState::Running if self.remaining_secs > 0 => IntervalState::Paused,
            _ => {
                return Err(TimerError::InvalidState {
                    operation: "toggle pause on",
                    state: IntervalState::Complete.to_string(),
                })
            }
        };
        debug!(interval = %self.name, from = %self.state, to = %next, "toggle pause");
        self.state = next;
        Ok(next)
    }

    /// Discard all progress, including overrun, and run from the top.
    pub fn restart(&mut self) {
        debug!(interval = %self.name, overrun = self.overrun_secs, "restart");
        self.state = IntervalState::Running;
        self.remaining_secs = self.length_secs;
        self.overrun_secs = 0;
    }

    /// Mark complete. Overrun is kept so repeated completion never resets it.
    pub fn complete(&mut self) {
        debug!(interval = %self.name, "complete");
        self.state = IntervalState::Complete;
        self.remaining_secs = 0;
    }

    /// Advance `secs` logical seconds in one step. Returns `true` if the
    /// interval reached zero during this step.
    ///
    /// Seconds left over after reaching zero count as overrun, so the cost
    /// does not depend on `secs`.
    pub(crate) fn advance_by(&mut self, secs: u64) -> bool {
        if secs == 0 {
            return false;
        }
        match self.state {
            // Started again after completing: nothing left to count down.
            IntervalState::Running if self.remaining_secs == 0 => {
                self.complete();
                self.overrun_secs = self.overrun_secs.saturating_add(secs);
                false
            }
            IntervalState::Running => {
                let counted = secs.min(self.remaining_secs);
                self.remaining_secs -= counted;
                if self.remaining_secs > 0 {
                    return false;
                }
                self.complete();
                self.overrun_secs = self.overrun_secs.saturating_add(secs - counted);
                true
            }
            IntervalState::Complete => {
                self.overrun_secs = self.overrun_secs.saturating_add(secs);
                false
            }
            IntervalState::Paused => false,
        }
    }

    #[cfg(test)]
    pub(crate) fn tick(&mut self) -> bool {
        self.advance_by(1)
    }
}

/// Read-only copy of an interval, taken in one piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalStatus {
    pub id: IntervalId,
    pub kind: IntervalKind,
    pub color: Color,
    pub name: String,
    pub description: String,
    pub length_secs: u64,
    pub remaining_secs: u64,
    pub overrun_secs: u64,
    pub state: IntervalState,
}

impl IntervalStatus {
    /// Remaining time only reaches zero through completion, so a restarted
    /// complete interval still reports its overrun.
    pub fn is_overrun(&self) -> bool {
        self.state == IntervalState::Complete || self.remaining_secs == 0
    }

    /// Remaining seconds while counting down, negated overrun once complete.
    pub fn display_secs(&self) -> i64 {
        if self.is_overrun() {
            -(self.overrun_secs.min(i64::MAX as u64) as i64)
        } else {
            self.remaining_secs.min(i64::MAX as u64) as i64
        }
    }
}

impl fmt::Display for IntervalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "timer name: {} state: {} remaining: {} overrun: {}",
            self.name, self.state, self.remaining_secs, self.overrun_secs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn work(length_secs: u64) -> Interval {
        Interval::new(IntervalId(0), IntervalKind::Work, "work1", "work 1 timer", length_secs)
            .unwrap()
    }

    #[test]
    fn starts_paused_with_full_length() {
        let interval = work(25 * 60);
        assert_eq!(interval.state(), IntervalState::Paused);
        assert_eq!(interval.remaining_secs(), 25 * 60);
        assert_eq!(interval.overrun_secs(), 0);
    }

    #[test]
    fn blank_name_is_rejected() {
        for name in ["", "   "] {
            let err = Interval::new(IntervalId(0), IntervalKind::Work, name, "", 300).unwrap_err();
            assert!(matches!(err, TimerError::InvalidArgument { ref field, .. } if field == "name"));
        }
    }

    #[test]
    fn zero_length_is_rejected() {
        let err = Interval::new(IntervalId(0), IntervalKind::Break, "except", "", 0).unwrap_err();
        assert!(
            matches!(err, TimerError::InvalidArgument { ref field, .. } if field == "length_sec")
        );
    }

    #[test]
    fn empty_description_is_allowed() {
        let interval = Interval::new(IntervalId(3), IntervalKind::Break, "b", "", 1).unwrap();
        assert_eq!(interval.description(), "");
    }

    #[test]
    fn paused_interval_does_not_count_down() {
        let mut interval = work(25 * 60);
        for _ in 0..30 * 60 {
            assert!(!interval.tick());
        }
        assert_eq!(interval.remaining_secs(), 25 * 60);
        assert_eq!(interval.state(), IntervalState::Paused);
    }

    #[test]
    fn running_interval_completes_then_overruns() {
        let mut interval = work(25 * 60);
        interval.start();
        let mut completions = 0;
        for _ in 0..30 * 60 {
            if interval.tick() {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(interval.state(), IntervalState::Complete);
        assert_eq!(interval.remaining_secs(), 0);
        assert_eq!(interval.overrun_secs(), 5 * 60);
    }

    #[test]
    fn overrun_is_unbounded() {
        let mut interval = work(1);
        interval.start();
        interval.tick();
        for expected in 1..=1500u64 {
            interval.tick();
            assert_eq!(interval.overrun_secs(), expected);
            assert_eq!(interval.remaining_secs(), 0);
        }
    }

    #[test]
    fn toggle_pause_flips_both_ways() {
        let mut interval = work(10);
        assert_eq!(interval.toggle_pause(), Ok(IntervalState::Running));
        interval.tick();
        assert_eq!(interval.toggle_pause(), Ok(IntervalState::Paused));
        interval.tick();
        assert_eq!(interval.remaining_secs(), 9);
        assert_eq!(interval.toggle_pause(), Ok(IntervalState::Running));
    }

    #[test]
    fn toggle_pause_on_complete_is_rejected() {
        let mut interval = work(1);
        interval.start();
        interval.tick();
        interval.tick();
        let before = interval.clone();
        assert!(matches!(
            interval.toggle_pause(),
            Err(TimerError::InvalidState { .. })
        ));
        assert_eq!(interval, before);
    }

    #[test]
    fn start_after_complete_keeps_counting_overrun() {
        let mut interval = work(1);
        interval.start();
        assert!(interval.tick());
        interval.tick();
        interval.start();
        assert_eq!(interval.state(), IntervalState::Running);
        assert_eq!(interval.status().display_secs(), -1);
        assert!(!interval.tick());
        assert_eq!(interval.state(), IntervalState::Complete);
        assert_eq!(interval.overrun_secs(), 2);
        assert_eq!(interval.remaining_secs(), 0);
    }

    #[test]
    fn pause_after_restarting_a_complete_interval_is_rejected() {
        let mut interval = work(1);
        interval.start();
        interval.tick();
        interval.start();
        let before = interval.clone();
        assert!(matches!(
            interval.toggle_pause(),
            Err(TimerError::InvalidState { ref state, .. }) if state == "complete"
        ));
        assert_eq!(interval, before);
        interval.tick();
        assert_eq!(interval.overrun_secs(), 1);
    }

    #[test]
    fn large_step_splits_into_countdown_and_overrun() {
        let mut interval = work(1500);
        interval.start();
        assert!(interval.advance_by(u64::from(u32::MAX)));
        assert_eq!(interval.state(), IntervalState::Complete);
        assert_eq!(interval.remaining_secs(), 0);
        assert_eq!(interval.overrun_secs(), u64::from(u32::MAX) - 1500);

        assert!(!interval.advance_by(u64::MAX));
        assert_eq!(interval.overrun_secs(), u64::MAX);
    }

    #[test]
    fn complete_keeps_overrun() {
        let mut interval = work(1);
        interval.start();
        for _ in 0..6 {
            interval.tick();
        }
        assert_eq!(interval.overrun_secs(), 5);
        interval.complete();
        assert_eq!(interval.overrun_secs(), 5);
        interval.tick();
        assert_eq!(interval.overrun_secs(), 6);
    }

    #[test]
    fn restart_then_overrun_again() {
        let mut interval = Interval::new(IntervalId(1), IntervalKind::Break, "break1", "", 5 * 60)
            .unwrap();
        interval.start();
        for _ in 0..3 * 60 {
            interval.tick();
        }
        interval.restart();
        assert_eq!(interval.remaining_secs(), 5 * 60);
        for _ in 0..6 * 60 {
            interval.tick();
        }
        assert_eq!(interval.overrun_secs(), 60);
    }

    #[test]
    fn colors_follow_kind() {
        assert_eq!(work(1).color().hex(), "FF0000");
        let rest = Interval::new(IntervalId(1), IntervalKind::Break, "b", "", 1).unwrap();
        assert_eq!(rest.color().hex(), "00FF00");
    }

    #[test]
    fn color_hex_roundtrip() {
        let parsed = Color::try_from("#00ff00".to_string()).unwrap();
        assert_eq!(parsed, Color::GREEN);
        assert!(Color::try_from("12345".to_string()).is_err());
    }

    #[test]
    fn kind_parsing_is_exact() {
        assert_eq!("Work".parse::<IntervalKind>(), Ok(IntervalKind::Work));
        assert_eq!("Break".parse::<IntervalKind>(), Ok(IntervalKind::Break));
        assert_eq!(
            "work".parse::<IntervalKind>(),
            Err(TimerError::UnknownKind("work".into()))
        );
    }

    #[test]
    fn status_line_format() {
        let mut interval = Interval::new(
            IntervalId(0),
            IntervalKind::Work,
            "Work from Factory",
            "work timer",
            120,
        )
        .unwrap();
        interval.start();
        for _ in 0..125 {
            interval.tick();
        }
        assert_eq!(
            interval.status().to_string(),
            "timer name: Work from Factory state: complete remaining: 0 overrun: 5"
        );
        assert_eq!(interval.status().display_secs(), -5);
    }

    proptest! {
        #[test]
        fn restart_always_resets(length in 1u64..5_000, ticks in 0usize..10_000, paused in any::<bool>()) {
            let mut interval = work(length);
            interval.start();
            for _ in 0..ticks {
                interval.tick();
            }
            if paused && interval.state() == IntervalState::Running {
                interval.toggle_pause().unwrap();
            }
            interval.restart();
            prop_assert_eq!(interval.remaining_secs(), length);
            prop_assert_eq!(interval.overrun_secs(), 0);
            prop_assert_eq!(interval.state(), IntervalState::Running);
        }

        #[test]
        fn one_step_matches_repeated_ticks(
            length in 1u64..500,
            before in 0u64..600,
            step in 0u64..1_000,
            running in any::<bool>(),
        ) {
            let mut stepped = work(length);
            stepped.start();
            for _ in 0..before {
                stepped.tick();
            }
            if !running && stepped.state() == IntervalState::Running {
                stepped.toggle_pause().unwrap();
            }
            let mut ticked = stepped.clone();

            let completed = stepped.advance_by(step);
            let mut ticked_completed = false;
            for _ in 0..step {
                ticked_completed |= ticked.tick();
            }
            prop_assert_eq!(completed, ticked_completed);
            prop_assert_eq!(stepped, ticked);
        }

        #[test]
        fn running_counts_down_by_one(length in 2u64..5_000, ticks in 1u64..5_000) {
            let mut interval = work(length);
            interval.start();
            let ticks = ticks.min(length - 1);
            for _ in 0..ticks {
                interval.tick();
            }
            prop_assert_eq!(interval.remaining_secs(), length - ticks);
            prop_assert_eq!(interval.state(), IntervalState::Running);
        }
    }
}
