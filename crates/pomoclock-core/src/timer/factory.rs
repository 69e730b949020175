use super::interval::{Interval, IntervalId, IntervalKind};
use super::template::IntervalTemplate;
use crate::error::TimerError;

/// Builds typed intervals and hands out sequential ids.
///
/// The id counter only advances when construction succeeds.
#[derive(Debug, Default)]
pub struct IntervalFactory {
    next_id: usize,
}

impl IntervalFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an interval from a kind tag (`"Work"` or `"Break"`).
    pub fn create(
        &mut self,
        kind: &str,
        name: &str,
        description: &str,
        length_sec: u64,
    ) -> Result<Interval, TimerError> {
        let kind: IntervalKind = kind.parse()?;
        let interval = Interval::new(IntervalId(self.next_id), kind, name, description, length_sec)?;
        self.next_id += 1;
        Ok(interval)
    }

    pub fn from_template(&mut self, template: &IntervalTemplate) -> Result<Interval, TimerError> {
        self.create(
            &template.kind,
            &template.name,
            &template.description,
            template.length_sec,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::interval::IntervalState;

    #[test]
    fn creates_work_and_break() {
        let mut factory = IntervalFactory::new();
        let work = factory.create("Work", "Work from Factory", "work timer", 120).unwrap();
        let rest = factory.create("Break", "Break from Factory", "break timer", 120).unwrap();

        assert_eq!(work.kind(), IntervalKind::Work);
        assert_eq!(rest.kind(), IntervalKind::Break);
        assert_eq!(work.color().hex(), "FF0000");
        assert_eq!(rest.color().hex(), "00FF00");
        assert_eq!(work.id(), IntervalId(0));
        assert_eq!(rest.id(), IntervalId(1));
        assert_eq!(rest.state(), IntervalState::Paused);
    }

    #[test]
    fn break_counts_down() {
        let mut factory = IntervalFactory::new();
        let mut rest = factory.create("Break", "Break from Factory", "break timer", 120).unwrap();
        rest.start();
        for _ in 0..100 {
            rest.tick();
        }
        assert_eq!(
            rest.status().to_string(),
            "timer name: Break from Factory state: running remaining: 20 overrun: 0"
        );
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let mut factory = IntervalFactory::new();
        let err = factory.create("Nap", "nap", "", 60).unwrap_err();
        assert_eq!(err, TimerError::UnknownKind("Nap".into()));
    }

    #[test]
    fn failed_create_does_not_consume_an_id() {
        let mut factory = IntervalFactory::new();
        assert!(factory.create("Work", "", "", 60).is_err());
        assert!(factory.create("Work", "w", "", 0).is_err());
        let ok = factory.create("Work", "w", "", 60).unwrap();
        assert_eq!(ok.id(), IntervalId(0));
    }
}
