//! Schedule use case: request -> LLM -> parse -> build.
//!
//! One invocation per user submission. Nothing is cached or shared between calls.

use crate::domain::{
    DomainError, RawModelResponse, ScheduleOutcome, ScheduleRequest, builder, parser,
};
use crate::ports::LlmPort;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Service for generating a validated schedule from the LLM.
pub struct ScheduleService {
    llm: Arc<dyn LlmPort>,
}

impl ScheduleService {
    pub fn new(llm: Arc<dyn LlmPort>) -> Self {
        Self { llm }
    }

    /// Ask the LLM for a schedule and turn its reply into a [`ScheduleOutcome`].
    ///
    /// LLM errors are returned as-is. Parse failures come back as `DomainError::Parse`.
    pub async fn generate(&self, request: ScheduleRequest) -> Result<ScheduleOutcome, DomainError> {
        let raw = self.llm.generate_schedule(&request).await?;
        Self::process(&raw, request)
    }

    /// Parse and build from an already fetched response. Pure apart from logging.
    pub fn process(
        raw: &RawModelResponse,
        request: ScheduleRequest,
    ) -> Result<ScheduleOutcome, DomainError> {
        debug!(raw_len = raw.len(), "parsing model response");

        let parsed = parser::parse(raw, request.duration_weeks).map_err(|e| {
            warn!(
                error = %e,
                raw = %raw.as_str().chars().take(200).collect::<String>(),
                "model response rejected"
            );
            DomainError::from(e)
        })?;

        for skipped in &parsed.skipped {
            warn!(
                index = skipped.index,
                reason = %skipped.reason,
                "skipping schedule entry"
            );
        }

        let schedule = builder::build(parsed.entries, request).map_err(|e| {
            error!(error = %e, "schedule builder invariant violated");
            DomainError::from(e)
        })?;

        info!(
            project = %schedule.request().project_name,
            entries = schedule.len(),
            skipped = parsed.skipped.len(),
            "schedule built"
        );

        Ok(ScheduleOutcome {
            schedule,
            skipped: parsed.skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ParseError, RETRY_MESSAGE};
    use chrono::NaiveDate;

    struct FixedLlm(Result<&'static str, &'static str>);

    #[async_trait::async_trait]
    impl LlmPort for FixedLlm {
        async fn generate_schedule(
            &self,
            _request: &ScheduleRequest,
        ) -> Result<RawModelResponse, DomainError> {
            match self.0 {
                Ok(text) => Ok(RawModelResponse::new(text)),
                Err(msg) => Err(DomainError::Llm(msg.to_string())),
            }
        }
    }

    fn request(weeks: u32) -> ScheduleRequest {
        ScheduleRequest::new(
            "Depot",
            "Leeds",
            weeks,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        )
    }

    fn service(reply: Result<&'static str, &'static str>) -> ScheduleService {
        ScheduleService::new(Arc::new(FixedLlm(reply)))
    }

    #[tokio::test]
    async fn test_generate_two_week_schedule() {
        let svc = service(Ok(
            r#"[{"week":1,"task":"Site prep"},{"week":2,"task":"Foundation"}]"#,
        ));
        let outcome = svc.generate(request(2)).await.unwrap();

        let e = outcome.schedule.entries();
        assert_eq!(e.len(), 2);
        assert_eq!(e[0].task, "Site prep");
        assert_eq!(e[0].start_date, Some(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()));
        assert_eq!(e[1].start_date, Some(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()));
        assert_eq!(outcome.skipped_count(), 0);
    }

    #[tokio::test]
    async fn test_generate_reports_skipped_count() {
        let svc = service(Ok(
            r#"[{"week":1,"task":"A"},{"week":99,"task":"B"},{"task":"missing week"}]"#,
        ));
        let outcome = svc.generate(request(3)).await.unwrap();
        assert_eq!(outcome.schedule.len(), 1);
        assert_eq!(outcome.schedule.entries()[0].task, "A");
        assert_eq!(outcome.skipped_count(), 2);
    }

    #[tokio::test]
    async fn test_generate_out_of_range_only() {
        let svc = service(Ok(r#"[{"week":5,"task":"X"}]"#));
        let err = svc.generate(request(2)).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Parse(ParseError::NoValidEntries { .. })
        ));
        assert_eq!(err.user_message(), RETRY_MESSAGE);
    }

    #[tokio::test]
    async fn test_generate_malformed() {
        let svc = service(Ok("I'm sorry, I can't produce that."));
        let err = svc.generate(request(2)).await.unwrap_err();
        assert!(matches!(err, DomainError::Parse(ParseError::Malformed)));
    }

    #[tokio::test]
    async fn test_generate_passes_llm_error_through() {
        let svc = service(Err("API error 503 Service Unavailable: overloaded"));
        let err = svc.generate(request(2)).await.unwrap_err();
        match err {
            DomainError::Llm(msg) => assert_eq!(msg, "API error 503 Service Unavailable: overloaded"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
