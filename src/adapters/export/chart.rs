//! Chart intervals for timeline / Gantt rendering.

use crate::domain::Schedule;
use chrono::NaiveDate;
use serde::Serialize;

/// One bar on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartInterval {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Kept for colouring bars by week.
    pub week: u32,
}

/// One interval per entry. Overlapping or adjacent intervals are never merged.
pub fn to_chart_intervals(schedule: &Schedule) -> Vec<ChartInterval> {
    let fallback = schedule.request().start_date;
    schedule
        .entries()
        .iter()
        .map(|e| ChartInterval {
            label: e.task.clone(),
            start: e.start_date.unwrap_or(fallback),
            end: e.end_date.unwrap_or(fallback),
            week: e.week,
        })
        .collect()
}
