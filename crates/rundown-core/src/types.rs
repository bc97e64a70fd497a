//! Core types for rundown-core.
//!
//! This module defines the data shared between the normalizer and its
//! callers: the structured [`Record`], the ordered [`Sequence`], the
//! [`Outcome`] of a normalize call and the [`FailureReason`] taxonomy.

use serde::Serialize;

/// One timed entry of an event rundown.
///
/// All three fields are free text. `time` is a label, not a parsed clock
/// value: ranges (`"14:00-14:30"`), relative labels (`"開場前"`) and empty
/// strings are all valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Record {
    #[serde(rename = "時間")]
    pub time: String,
    #[serde(rename = "事件")]
    pub event: String,
    #[serde(rename = "備註")]
    pub note: String,
}

impl Record {
    pub fn new(time: impl Into<String>, event: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            event: event.into(),
            note: note.into(),
        }
    }
}

/// Ordered list of [`Record`]s, in the order they appeared in the input.
///
/// A `Sequence` is built fresh by every normalize call and is never mutated
/// afterwards; callers that need an editable copy take [`Sequence::into_records`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Sequence(Vec<Record>);

impl Sequence {
    pub fn new(records: Vec<Record>) -> Self {
        Self(records)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.0
    }

    pub fn into_records(self) -> Vec<Record> {
        self.0
    }

    /// Canonical compact array form, the text persisted by callers.
    ///
    /// Keys are always the primary producer keys (`時間`, `事件`, `備註`) in
    /// that order, so feeding the result back through the normalizer yields
    /// an equal sequence.
    pub fn to_canonical_json(&self) -> String {
        // A Vec of plain string structs cannot fail to serialize.
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }

    /// Same as [`Sequence::to_canonical_json`], indented for display.
    pub fn to_canonical_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| "[]".to_string())
    }
}

impl FromIterator<Record> for Sequence {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Extraction strategy, in pipeline priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// The whole trimmed input is a JSON array of records.
    Direct,
    /// The first fenced code block holds a JSON array of records.
    Fenced,
    /// A delimited text table with a recognisable header.
    Tabular,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Direct => "direct",
            Strategy::Fenced => "fenced",
            Strategy::Tabular => "tabular",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantic column category a table header cell maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Time,
    Event,
    Note,
}

impl Role {
    /// All roles, in the order header cells are matched against them.
    pub const ALL: [Role; 3] = [Role::Time, Role::Event, Role::Note];

    pub fn index(self) -> usize {
        match self {
            Role::Time => 0,
            Role::Event => 1,
            Role::Note => 2,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Time => write!(f, "time"),
            Role::Event => write!(f, "event"),
            Role::Note => write!(f, "note"),
        }
    }
}

/// Why a strategy (or the whole pipeline) could not produce a sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailureReason {
    /// Input was empty or whitespace only; no strategy ran.
    #[error("input is empty")]
    EmptyInput,

    /// Text does not look like JSON at all.
    #[error("input is not structured data")]
    NotStructured,

    /// Text looked like JSON but failed decoding or shape/key validation.
    #[error("structured data is malformed: {detail}")]
    MalformedStructured { detail: String },

    /// No fenced code block in the input.
    #[error("no fenced code block found")]
    NoFencedBlock,

    /// A fenced block exists but its interior failed validation.
    #[error("fenced block content is malformed: {detail}")]
    MalformedFencedContent { detail: String },

    /// No delimited line carried all three column roles.
    #[error("no table header with time, event and note columns found ({candidate_rows} delimited rows seen)")]
    NoHeaderFound { candidate_rows: usize },

    /// A header was accepted but no data row followed it.
    #[error("table header found but no rows were collected")]
    NoRowsCollected,
}

impl FailureReason {
    /// Whether this reason says something about the input, as opposed to
    /// the strategy simply not applying to it.
    pub fn is_conclusive(&self) -> bool {
        !matches!(
            self,
            FailureReason::NotStructured
                | FailureReason::NoFencedBlock
                | FailureReason::NoHeaderFound { candidate_rows: 0 }
        )
    }
}

/// Terminal failure of a normalize call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unrecognized {
    pub reason: FailureReason,
}

impl Unrecognized {
    pub fn new(reason: FailureReason) -> Self {
        Self { reason }
    }

    /// The raw text should be kept for manual correction rather than
    /// discarded. Always true: nothing usable was extracted.
    pub fn retain_raw(&self) -> bool {
        true
    }
}

impl std::fmt::Display for Unrecognized {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "could not understand the response: {}; keep the raw text and correct it manually",
            self.reason
        )
    }
}

/// Result of a normalize call. There is no partial state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Parsed { sequence: Sequence, strategy: Strategy },
    Unrecognized(Unrecognized),
}

impl Outcome {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Outcome::Parsed { .. })
    }

    pub fn sequence(&self) -> Option<&Sequence> {
        match self {
            Outcome::Parsed { sequence, .. } => Some(sequence),
            Outcome::Unrecognized(_) => None,
        }
    }

    pub fn into_sequence(self) -> Option<Sequence> {
        match self {
            Outcome::Parsed { sequence, .. } => Some(sequence),
            Outcome::Unrecognized(_) => None,
        }
    }

    /// Strategy that produced the sequence, if any.
    pub fn strategy(&self) -> Option<Strategy> {
        match self {
            Outcome::Parsed { strategy, .. } => Some(*strategy),
            Outcome::Unrecognized(_) => None,
        }
    }

    pub fn reason(&self) -> Option<&FailureReason> {
        match self {
            Outcome::Parsed { .. } => None,
            Outcome::Unrecognized(u) => Some(&u.reason),
        }
    }

    /// Whether the caller should keep the raw text for manual editing.
    pub fn should_retain_raw(&self) -> bool {
        match self {
            Outcome::Parsed { .. } => false,
            Outcome::Unrecognized(u) => u.retain_raw(),
        }
    }
}
