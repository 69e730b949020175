//! # pomoclock core library
//!
//! Drives a rotating sequence of Work and Break countdown intervals for a
//! desk clock with a small display and four buttons. Rendering and button
//! hardware live outside this crate; they consume the engine through
//! [`Snapshot`]s and [`Command`]s.
//!
//! ## Architecture
//!
//! - **Interval**: a three-state countdown (paused, running, complete) that
//!   keeps counting overrun after reaching zero
//! - **Sequence**: circular FIFO of intervals with exactly one current
//! - **SequenceManager**: shared, mutex-guarded owner of the sequence plus
//!   the speed multiplier
//! - **ClockDriver**: periodic tokio task that ticks the sequence and
//!   publishes the latest snapshot on a watch channel
//! - **Storage**: TOML configuration

pub mod clock;
pub mod error;
pub mod events;
pub mod snapshot;
pub mod storage;
pub mod timer;

pub use clock::{ClockDriver, ClockHandle};
pub use error::{ConfigError, CoreError, TimerError};
pub use events::Event;
pub use snapshot::Snapshot;
pub use storage::Config;
pub use timer::{
    Color, Command, Interval, IntervalFactory, IntervalId, IntervalKind, IntervalState,
    IntervalStatus, IntervalTemplate, Sequence, SequenceManager, SequenceTemplate, Speed,
};
