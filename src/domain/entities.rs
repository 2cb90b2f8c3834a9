//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/terminal types here; adapters map into and out of these.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One user submission. Validated upstream by the UI; never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub project_name: String,
    pub location: String,
    /// Duration in weeks (>= 1).
    pub duration_weeks: u32,
    pub start_date: NaiveDate,
}

impl ScheduleRequest {
    pub fn new(
        project_name: impl Into<String>,
        location: impl Into<String>,
        duration_weeks: u32,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            location: location.into(),
            duration_weeks,
            start_date,
        }
    }
}

/// Unparsed text returned by the LLM. Untrusted, arbitrary shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawModelResponse(String);

impl RawModelResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One task/week pair. Dates are filled in by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub week: u32,
    pub task: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ScheduleEntry {
    pub fn new(week: u32, task: impl Into<String>) -> Self {
        Self {
            week,
            task: task.into(),
            start_date: None,
            end_date: None,
        }
    }
}

/// Why a decoded element was dropped by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotAnObject,
    MissingWeek,
    /// Week field present but not coercible to an integer. Holds the raw JSON text.
    InvalidWeek(String),
    WeekOutOfRange { week: i64, duration: u32 },
    MissingTask,
    EmptyTask,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotAnObject => write!(f, "element is not an object"),
            SkipReason::MissingWeek => write!(f, "missing week field"),
            SkipReason::InvalidWeek(raw) => write!(f, "week is not an integer: {}", raw),
            SkipReason::WeekOutOfRange { week, duration } => {
                write!(f, "week {} outside 1..={}", week, duration)
            }
            SkipReason::MissingTask => write!(f, "missing task field"),
            SkipReason::EmptyTask => write!(f, "task is empty"),
        }
    }
}

/// A rejected element and its position in the decoded payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub index: usize,
    pub reason: SkipReason,
}

/// Successful parser output: sorted entries plus what was dropped on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    pub entries: Vec<ScheduleEntry>,
    pub skipped: Vec<SkippedEntry>,
}

/// Ordered, non-empty schedule. Only constructed by [`crate::domain::builder::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    request: ScheduleRequest,
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    pub(crate) fn from_parts(request: ScheduleRequest, entries: Vec<ScheduleEntry>) -> Self {
        Self { request, entries }
    }

    pub fn request(&self) -> &ScheduleRequest {
        &self.request
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First start date and last end date across all entries.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.entries.iter().filter_map(|e| e.start_date).min()?;
        let end = self.entries.iter().filter_map(|e| e.end_date).max()?;
        Some((start, end))
    }
}

/// What the schedule use case returns: the schedule and the parser's skip log.
#[derive(Debug, Clone)]
pub struct ScheduleOutcome {
    pub schedule: Schedule,
    pub skipped: Vec<SkippedEntry>,
}

impl ScheduleOutcome {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}
