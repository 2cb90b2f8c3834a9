//! Core domain layer. No external I/O dependencies.
//!
//! Entities, the response parser and the schedule builder live here. Dependencies flow inward.

pub mod builder;
pub mod entities;
pub mod errors;
pub mod parser;

pub use entities::{
    ParsedResponse, RawModelResponse, Schedule, ScheduleEntry, ScheduleOutcome, ScheduleRequest,
    SkipReason, SkippedEntry,
};
pub use errors::{BuildError, DomainError, ParseError, RETRY_MESSAGE};
