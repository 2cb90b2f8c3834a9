//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, RawModelResponse, ScheduleRequest};

/// LLM collaborator. One prompt in, one raw text response out.
///
/// Prompt wording is the adapter's concern; the application only hands over the request.
#[async_trait::async_trait]
pub trait LlmPort: Send + Sync {
    /// Ask the model for a schedule. The returned text is untrusted and unparsed.
    async fn generate_schedule(
        &self,
        request: &ScheduleRequest,
    ) -> Result<RawModelResponse, DomainError>;
}

/// Everything the delivery collaborator needs to mail a finished schedule.
#[derive(Debug, Clone)]
pub struct DeliveryPayload {
    pub project_name: String,
    pub csv_filename: String,
    pub csv: String,
    pub pdf_filename: String,
    pub pdf: Vec<u8>,
    pub text_body: String,
    pub html_body: String,
}

/// Delivery port. Hands a rendered schedule to the mail/automation collaborator.
#[async_trait::async_trait]
pub trait DeliveryPort: Send + Sync {
    /// Send the schedule. Transport errors are returned unmodified as `DomainError::Delivery`.
    async fn deliver(&self, payload: &DeliveryPayload) -> Result<(), DomainError>;
}
