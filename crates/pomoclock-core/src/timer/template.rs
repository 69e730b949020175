use serde::{Deserialize, Serialize};

/// One row of a sequence template. `kind` stays a raw tag so that a bad
/// value in a config file surfaces as `UnknownKind` when the sequence is
/// built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalTemplate {
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub length_sec: u64,
}

impl IntervalTemplate {
    pub fn new(
        kind: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        length_sec: u64,
    ) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            description: description.into(),
            length_sec,
        }
    }
}

/// Ordered list of intervals a sequence is built (and rebuilt) from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceTemplate {
    pub entries: Vec<IntervalTemplate>,
}

impl SequenceTemplate {
    pub fn new(entries: Vec<IntervalTemplate>) -> Self {
        Self { entries }
    }

    /// Three 25 minute work blocks, two short breaks and a long one.
    pub fn reference() -> Self {
        const DESCRIPTION: &str = "normal working timer";
        Self {
            entries: vec![
                IntervalTemplate::new("Work", "Work 1", DESCRIPTION, 25 * 60),
                IntervalTemplate::new("Break", "Break 1", DESCRIPTION, 5 * 60),
                IntervalTemplate::new("Work", "Work 2", DESCRIPTION, 25 * 60),
                IntervalTemplate::new("Break", "Break 2", DESCRIPTION, 5 * 60),
                IntervalTemplate::new("Work", "Work 3", DESCRIPTION, 25 * 60),
                IntervalTemplate::new("Break", "Break 3", DESCRIPTION, 15 * 60),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all interval lengths.
    ///
    /// Uses saturating arithmetic so a hostile config can't overflow.
    pub fn total_secs(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.length_sec))
    }

    pub fn work_count(&self) -> usize {
        self.entries.iter().filter(|e| e.kind == "Work").count()
    }
}

impl Default for SequenceTemplate {
    fn default() -> Self {
        Self::reference()
    }
}
