//! Tabular view: one row per entry, in schedule order.

use crate::domain::Schedule;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Row shown on screen and written to CSV. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub week: u32,
    pub task: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Convert a schedule into rows.
///
/// Every entry of a built schedule carries dates; entries that somehow do not are
/// given the request start date rather than being dropped.
pub fn to_table(schedule: &Schedule) -> Vec<TableRow> {
    let fallback = schedule.request().start_date;
    schedule
        .entries()
        .iter()
        .map(|e| TableRow {
            week: e.week,
            task: e.task.clone(),
            start_date: e.start_date.unwrap_or(fallback),
            end_date: e.end_date.unwrap_or(fallback),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ScheduleEntry, ScheduleRequest, builder};

    #[test]
    fn test_to_table_preserves_order_and_dates() {
        let req = ScheduleRequest::new(
            "Depot",
            "Leeds",
            3,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        );
        let schedule = builder::build(
            vec![
                ScheduleEntry::new(1, "Survey"),
                ScheduleEntry::new(3, "Roofing"),
                ScheduleEntry::new(3, "Windows"),
            ],
            req,
        )
        .unwrap();

        let rows = to_table(&schedule);
        let tasks: Vec<_> = rows.iter().map(|r| r.task.as_str()).collect();
        assert_eq!(tasks, vec!["Survey", "Roofing", "Windows"]);
        assert_eq!(rows[1].start_date, NaiveDate::from_ymd_opt(2024, 3, 18).unwrap());
        assert_eq!(rows[1].end_date, NaiveDate::from_ymd_opt(2024, 3, 24).unwrap());
    }
}
