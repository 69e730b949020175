use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::error::TimerError;

/// Logical seconds advanced per wall-clock tick. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Speed(NonZeroU32);

impl Speed {
    pub const REALTIME: Speed = Speed(NonZeroU32::MIN);

    pub fn new(multiplier: u32) -> Result<Self, TimerError> {
        NonZeroU32::new(multiplier).map(Speed).ok_or_else(|| {
            TimerError::invalid_argument("speed", "speed multiplier must be at least 1")
        })
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl Default for Speed {
    fn default() -> Self {
        Speed::REALTIME
    }
}

impl TryFrom<u32> for Speed {
    type Error = TimerError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Speed::new(value)
    }
}

impl From<Speed> for u32 {
    fn from(speed: Speed) -> Self {
        speed.get()
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.get())
    }
}
