//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

/// Message shown to the user when the LLM output could not be turned into a schedule.
pub const RETRY_MESSAGE: &str = "could not generate a valid schedule, please retry.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No JSON payload could be located in the response.
    #[error("no structured payload found in model response")]
    Malformed,

    /// Payload decoded but every element was rejected.
    #[error("model response contained no valid entries ({skipped} skipped)")]
    NoValidEntries { skipped: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Unreachable when fed parser output.
    #[error("refusing to build an empty schedule")]
    EmptySchedule,

    #[error("date for week {week} is outside the supported calendar range")]
    DateOutOfRange { week: u32 },
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("LLM request failed: {0}")]
    Llm(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Input error: {0}")]
    Input(String),
}

impl DomainError {
    /// Text for the UI. Collaborator failures pass through as-is.
    pub fn user_message(&self) -> String {
        match self {
            DomainError::Parse(_) => RETRY_MESSAGE.to_string(),
            DomainError::Build(_) => "internal error while building the schedule".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_errors_share_retry_message() {
        let a = DomainError::from(ParseError::Malformed);
        let b = DomainError::from(ParseError::NoValidEntries { skipped: 3 });
        assert_eq!(a.user_message(), RETRY_MESSAGE);
        assert_eq!(b.user_message(), RETRY_MESSAGE);
    }

    #[test]
    fn test_collaborator_error_passes_through() {
        let e = DomainError::Llm("API error 401 Unauthorized: bad key".into());
        assert_eq!(
            e.user_message(),
            "LLM request failed: API error 401 Unauthorized: bad key"
        );
    }

    #[test]
    fn test_build_error_is_generic() {
        let e = DomainError::from(BuildError::EmptySchedule);
        assert!(!e.user_message().contains("empty"));
    }
}
