//! Terminal stand-in for the clock's display.

mod buttons;

pub use buttons::{ButtonAction, Debouncer, Input};

use pomoclock_core::{IntervalState, Snapshot};

const WIDTH: usize = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMode {
    Clock,
    Pomodoro,
}

impl PanelMode {
    pub fn next(self) -> Self {
        match self {
            PanelMode::Clock => PanelMode::Pomodoro,
            PanelMode::Pomodoro => PanelMode::Clock,
        }
    }
}

pub struct Panel {
    mode: PanelMode,
    color: bool,
    last_drawn: Option<Snapshot>,
}

impl Panel {
    pub fn new(mode: PanelMode, color: bool) -> Self {
        Self {
            mode,
            color,
            last_drawn: None,
        }
    }

    /// Rotate to the next mode and force a redraw.
    pub fn change_mode(&mut self) -> PanelMode {
        self.mode = self.mode.next();
        self.last_drawn = None;
        self.mode
    }

    pub fn force_redraw(&mut self) {
        self.last_drawn = None;
    }

    /// True (and remembered) if `snap` differs from what is on screen.
    pub fn needs_redraw(&mut self, snap: &Snapshot) -> bool {
        if self.last_drawn.as_ref() == Some(snap) {
            return false;
        }
        self.last_drawn = Some(snap.clone());
        true
    }

    pub fn render(&self, snap: &Snapshot) -> Vec<String> {
        let mut lines = Vec::new();

        if self.mode == PanelMode::Clock {
            let date = snap.timestamp.format("%d-%m-%Y").to_string();
            let time = snap.timestamp.format("%H:%M:%S").to_string();
            let gap = WIDTH.saturating_sub(date.len() + time.len());
            lines.push(format!("{date}{}{time}", " ".repeat(gap)));
            lines.push(String::new());
        }

        lines.push(self.paint(snap, &center(&snap.countdown())));
        lines.push(self.paint(snap, &center(&snap.interval_name)));
        if !snap.interval_description.is_empty() {
            lines.push(self.paint(snap, &center(&snap.interval_description)));
        }
        lines.push(center(&format!("[{}]", state_label(snap))));

        if self.mode == PanelMode::Clock {
            lines.push(String::new());
            lines.push("[A] mode [X] pause [B] restart [Y] next".to_string());
        }
        lines
    }

    fn paint(&self, snap: &Snapshot, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        let c = snap.interval_color;
        format!("\x1b[38;2;{};{};{}m{text}\x1b[0m", c.r, c.g, c.b)
    }
}

fn state_label(snap: &Snapshot) -> &'static str {
    match snap.state {
        IntervalState::Paused => "paused",
        IntervalState::Running => "running",
        IntervalState::Complete => "overrun",
    }
}

fn center(text: &str) -> String {
    let len = text.chars().count();
    if len >= WIDTH {
        return text.to_string();
    }
    format!("{}{text}", " ".repeat((WIDTH - len) / 2))
}
