use crate::error::Result;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

pub const NOT_FOUND: &str = "Value not found";
pub const ERROR_PREFIX: &str = "Error: ";

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    Found(String),
    NotFound,
    Failed(String),
}

impl ExtractionOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, ExtractionOutcome::Found(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ExtractionOutcome::Failed(_))
    }
}

impl From<Option<String>> for ExtractionOutcome {
    fn from(value: Option<String>) -> Self {
        value.map_or(ExtractionOutcome::NotFound, ExtractionOutcome::Found)
    }
}

impl fmt::Display for ExtractionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionOutcome::Found(value) => f.write_str(value),
            ExtractionOutcome::NotFound => f.write_str(NOT_FOUND),
            ExtractionOutcome::Failed(message) => write!(f, "{}{}", ERROR_PREFIX, message),
        }
    }
}

impl Serialize for ExtractionOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// File base name to outcome, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultMap {
    entries: BTreeMap<String, ExtractionOutcome>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultCounts {
    pub found: usize,
    pub not_found: usize,
    pub errors: usize,
}

impl ResultMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file_name: impl Into<String>, outcome: ExtractionOutcome) {
        self.entries.insert(file_name.into(), outcome);
    }

    pub fn get(&self, file_name: &str) -> Option<&ExtractionOutcome> {
        self.entries.get(file_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ExtractionOutcome)> {
        self.entries.iter()
    }

    pub fn counts(&self) -> ResultCounts {
        self.entries
            .values()
            .fold(ResultCounts::default(), |mut counts, outcome| {
                match outcome {
                    ExtractionOutcome::Found(_) => counts.found += 1,
                    ExtractionOutcome::NotFound => counts.not_found += 1,
                    ExtractionOutcome::Failed(_) => counts.errors += 1,
                }
                counts
            })
    }

    /// Two-space indented JSON object, no trailing newline.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
