//! Schedule model builder. Attaches calendar dates to parsed entries.

use crate::domain::{BuildError, Schedule, ScheduleEntry, ScheduleRequest};
use chrono::{Days, NaiveDate};

/// Days covered by one schedule week (start through end inclusive is 7 days).
const WEEK_SPAN_DAYS: u64 = 6;

/// Build a [`Schedule`] from parser output.
///
/// Week `n` starts on `request.start_date + (n - 1) * 7` days and ends six days later.
/// Entries sharing a week get identical spans. Entry order is kept as given.
///
/// # Errors
/// * [`BuildError::EmptySchedule`] if `entries` is empty.
/// * [`BuildError::DateOutOfRange`] if a computed date overflows the calendar.
pub fn build(
    entries: Vec<ScheduleEntry>,
    request: ScheduleRequest,
) -> Result<Schedule, BuildError> {
    if entries.is_empty() {
        return Err(BuildError::EmptySchedule);
    }
    debug_assert!(
        entries
            .iter()
            .all(|e| e.week >= 1 && e.week <= request.duration_weeks),
        "entry week outside 1..=duration reached the builder"
    );
    debug_assert!(
        entries.windows(2).all(|w| w[0].week <= w[1].week),
        "entries not sorted by week"
    );

    let entries = entries
        .into_iter()
        .map(|mut entry| -> Result<ScheduleEntry, BuildError> {
            let (start, end) = week_span(request.start_date, entry.week)?;
            entry.start_date = Some(start);
            entry.end_date = Some(end);
            Ok(entry)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Schedule::from_parts(request, entries))
}

/// Start and end date of a 1-based week relative to `start_date`.
pub fn week_span(start_date: NaiveDate, week: u32) -> Result<(NaiveDate, NaiveDate), BuildError> {
    let offset = u64::from(week.saturating_sub(1)) * 7;
    let start = start_date
        .checked_add_days(Days::new(offset))
        .ok_or(BuildError::DateOutOfRange { week })?;
    let end = start
        .checked_add_days(Days::new(WEEK_SPAN_DAYS))
        .ok_or(BuildError::DateOutOfRange { week })?;
    Ok((start, end))
}
