//! Button input for the panel.
//!
//! The device has four buttons. All of them share one debounce window: a
//! press is accepted only if strictly more than the window has passed since
//! the previous accepted press.

use std::str::FromStr;
use std::time::{Duration, Instant};

use pomoclock_core::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    A,
    B,
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    ChangeMode,
    Engine(Command),
}

impl Button {
    pub fn action(&self) -> ButtonAction {
        match self {
            Button::A => ButtonAction::ChangeMode,
            Button::X => ButtonAction::Engine(Command::TogglePause),
            Button::B => ButtonAction::Engine(Command::RestartCurrent),
            Button::Y => ButtonAction::Engine(Command::Advance),
        }
    }
}

/// One line typed on stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Button(Button),
    Start,
    Rebuild,
    Quit,
}

impl FromStr for Input {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "mode" => Ok(Input::Button(Button::A)),
            "x" | "p" | "pause" => Ok(Input::Button(Button::X)),
            "b" | "r" | "restart" => Ok(Input::Button(Button::B)),
            "y" | "n" | "next" => Ok(Input::Button(Button::Y)),
            "s" | "start" => Ok(Input::Start),
            "rebuild" => Ok(Input::Rebuild),
            "q" | "quit" | "exit" => Ok(Input::Quit),
            other => Err(format!("unknown input '{other}'")),
        }
    }
}

#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    pub fn accept(&mut self) -> bool {
        self.accept_at(Instant::now())
    }

    pub fn accept_at(&mut self, now: Instant) -> bool {
        let ready = match self.last_accepted {
            None => true,
            Some(last) => now.saturating_duration_since(last) > self.window,
        };
        if ready {
            self.last_accepted = Some(now);
        }
        ready
    }
}
