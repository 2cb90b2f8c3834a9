//! Webhook delivery adapter. Implements DeliveryPort by posting the schedule to a
//! mail/automation webhook (e.g. a Zapier catch hook that forwards it by email).

use crate::domain::DomainError;
use crate::ports::{DeliveryPayload, DeliveryPort};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::info;

/// Multipart webhook adapter.
///
/// Sends `project_name`, `text_body`, `html_body` as text fields, the CSV as a
/// `csv_file` attachment and the report as `pdf_file`. SMTP, credentials and
/// recipients are the hook's business.
pub struct WebhookDelivery {
    client: Client,
    url: String,
}

impl WebhookDelivery {
    /// Create a new webhook adapter.
    ///
    /// # Arguments
    /// * `url` - Webhook endpoint receiving the multipart POST
    /// * `timeout` - Whole-request timeout
    pub fn new(url: String, timeout: Duration) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Delivery(format!("HTTP client init failed: {}", e)))?;
        Ok(Self { client, url })
    }
}

#[async_trait::async_trait]
impl DeliveryPort for WebhookDelivery {
    async fn deliver(&self, payload: &DeliveryPayload) -> Result<(), DomainError> {
        let csv_part = Part::bytes(payload.csv.clone().into_bytes())
            .file_name(payload.csv_filename.clone())
            .mime_str("text/csv")
            .map_err(|e| DomainError::Delivery(format!("Invalid attachment: {}", e)))?;
        let pdf_part = Part::bytes(payload.pdf.clone())
            .file_name(payload.pdf_filename.clone())
            .mime_str("application/pdf")
            .map_err(|e| DomainError::Delivery(format!("Invalid attachment: {}", e)))?;

        let form = Form::new()
            .text("project_name", payload.project_name.clone())
            .text("text_body", payload.text_body.clone())
            .text("html_body", payload.html_body.clone())
            .part("csv_file", csv_part)
            .part("pdf_file", pdf_part);

        let res = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| DomainError::Delivery(format!("Request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_else(|_| "unknown".to_string());
            return Err(DomainError::Delivery(format!(
                "Webhook error {}: {}",
                status, text
            )));
        }

        info!(
            project = %payload.project_name,
            file = %payload.csv_filename,
            "schedule delivered to webhook"
        );
        Ok(())
    }
}
