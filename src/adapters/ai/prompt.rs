//! Prompt templates for schedule generation.

use crate::domain::ScheduleRequest;

/// System prompt pinning the output schema.
pub fn system_prompt() -> &'static str {
    r#"You are an experienced construction project planner.

## Your Task
Produce a realistic week-by-week construction schedule for the project described by the user.

## Output Format
You MUST respond with valid JSON only. No markdown, no explanations outside JSON.

```json
[
  {"week": 1, "task": "Short description of the work planned for that week"},
  {"week": 2, "task": "..."}
]
```

Rules:
- `week` is an integer starting at 1 and never greater than the requested number of weeks.
- Cover every week at least once. Several objects may share a week when work runs in parallel.
- Keep each task under 120 characters."#
}

/// User prompt carrying the four request fields.
pub fn user_prompt(request: &ScheduleRequest) -> String {
    format!(
        "Create a construction schedule broken down by week for a project named '{}' located in '{}' that lasts {} weeks.\n\
         Assume the project starts on {}.\n\
         Output the schedule as a JSON list of objects with the keys \"week\" and \"task\".",
        request.project_name,
        request.location,
        request.duration_weeks,
        request.start_date.format("%Y-%m-%d"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_user_prompt_contains_request_fields() {
        let req = ScheduleRequest::new(
            "Harbour Depot",
            "Leeds",
            12,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        );
        let p = user_prompt(&req);
        assert!(p.contains("'Harbour Depot'"));
        assert!(p.contains("'Leeds'"));
        assert!(p.contains("lasts 12 weeks"));
        assert!(p.contains("2024-03-04"));
    }
}
