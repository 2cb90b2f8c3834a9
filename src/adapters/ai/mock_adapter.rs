//! Mock AI adapter for testing without API calls.
//!
//! Returns a canned construction schedule for development and testing purposes.

use crate::domain::{DomainError, RawModelResponse, ScheduleRequest};
use crate::ports::LlmPort;
use std::time::Duration;
use tracing::info;

/// Generic construction phases, cycled over the requested weeks.
const PHASES: &[&str] = &[
    "Site survey and permits",
    "Site clearing and excavation",
    "Foundations and footings",
    "Structural framing",
    "Roofing and weatherproofing",
    "Mechanical, electrical and plumbing rough-in",
    "Insulation and drywall",
    "Interior finishes",
    "Exterior works and landscaping",
    "Inspections, snagging and handover",
];

/// Mock LLM adapter.
///
/// Replies the way a chatty model would: prose plus a fenced JSON list.
/// Simulates network latency with configurable delay.
pub struct MockAiAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl MockAiAdapter {
    /// Create a new mock adapter with default delay (100ms).
    pub fn new() -> Self {
        Self { delay_ms: 100 }
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }

    fn canned_schedule(request: &ScheduleRequest) -> String {
        let weeks = request.duration_weeks.max(1) as usize;
        let items: Vec<serde_json::Value> = (0..weeks)
            .map(|i| {
                // Spread the phases over the duration rather than truncating them.
                let phase = PHASES[i * PHASES.len() / weeks];
                serde_json::json!({
                    "week": i + 1,
                    "task": format!("[MOCK] {} ({})", phase, request.location),
                })
            })
            .collect();
        let json = serde_json::to_string_pretty(&items).unwrap_or_else(|_| "[]".to_string());
        format!(
            "Here is the schedule for {}:\n```json\n{}\n```\nLet me know if you need changes.",
            request.project_name, json
        )
    }
}

impl Default for MockAiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LlmPort for MockAiAdapter {
    async fn generate_schedule(
        &self,
        request: &ScheduleRequest,
    ) -> Result<RawModelResponse, DomainError> {
        info!(
            project = %request.project_name,
            weeks = request.duration_weeks,
            "[MOCK] Simulating AI schedule generation"
        );

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        Ok(RawModelResponse::new(Self::canned_schedule(request)))
    }
}
