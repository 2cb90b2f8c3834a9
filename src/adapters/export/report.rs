//! Mail bodies rendered from the tabular view.

use crate::adapters::export::{TableRow, to_table};
use crate::domain::Schedule;

/// Plain-text body: header lines, then one line per row.
pub fn render_text_body(schedule: &Schedule) -> String {
    let req = schedule.request();
    let rows = to_table(schedule);

    let mut body = String::new();
    body.push_str(&format!("{} Schedule\n", req.project_name));
    body.push_str(&format!("Location: {}\n", req.location));
    body.push_str(&format!("{}\n\n", date_range_line(schedule)));

    for row in &rows {
        body.push_str(&format!(
            "Week {:>2} ({} - {}): {}\n",
            row.week,
            row.start_date.format("%Y-%m-%d"),
            row.end_date.format("%Y-%m-%d"),
            row.task
        ));
    }

    body.push_str("\n-- \nGenerated by consched\n");
    body
}

/// HTML body with a single table. All user and model text is escaped.
pub fn render_html_body(schedule: &Schedule) -> String {
    let req = schedule.request();
    let rows = to_table(schedule);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html><body>\n");
    html.push_str(&format!(
        "<h2>{} Schedule</h2>\n",
        escape_html(&req.project_name)
    ));
    html.push_str(&format!(
        "<p><strong>Location:</strong> {}<br>{}</p>\n",
        escape_html(&req.location),
        escape_html(&date_range_line(schedule))
    ));
    html.push_str("<table border=\"1\" cellpadding=\"4\" cellspacing=\"0\">\n");
    html.push_str(
        "<thead><tr><th>Week</th><th>Task</th><th>Start</th><th>End</th></tr></thead>\n<tbody>\n",
    );
    for row in &rows {
        html.push_str(&html_row(row));
    }
    html.push_str("</tbody>\n</table>\n</body></html>\n");
    html
}

fn html_row(row: &TableRow) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
        row.week,
        escape_html(&row.task),
        row.start_date.format("%Y-%m-%d"),
        row.end_date.format("%Y-%m-%d")
    )
}

fn date_range_line(schedule: &Schedule) -> String {
    let req = schedule.request();
    match schedule.span() {
        Some((start, end)) => format!(
            "{} weeks, {} to {}",
            req.duration_weeks,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        ),
        None => format!(
            "{} weeks from {}",
            req.duration_weeks,
            req.start_date.format("%Y-%m-%d")
        ),
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ScheduleEntry, ScheduleRequest, builder};
    use chrono::NaiveDate;

    fn schedule() -> Schedule {
        let req = ScheduleRequest::new(
            "Depot <North>",
            "Leeds & Bradford",
            2,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        );
        builder::build(
            vec![
                ScheduleEntry::new(1, "Survey"),
                ScheduleEntry::new(2, "Pour \"slab\" <fast>"),
            ],
            req,
        )
        .unwrap()
    }

    #[test]
    fn test_text_body_lists_every_row() {
        let body = render_text_body(&schedule());
        assert!(body.starts_with("Depot <North> Schedule\n"));
        assert!(body.contains("2 weeks, 2024-03-04 to 2024-03-17"));
        assert!(body.contains("Week  1 (2024-03-04 - 2024-03-10): Survey"));
        assert!(body.contains("Week  2 (2024-03-11 - 2024-03-17): Pour \"slab\" <fast>"));
    }

    #[test]
    fn test_html_body_escapes_text() {
        let html = render_html_body(&schedule());
        assert!(html.contains("<h2>Depot &lt;North&gt; Schedule</h2>"));
        assert!(html.contains("Leeds &amp; Bradford"));
        assert!(html.contains("<td>Pour &quot;slab&quot; &lt;fast&gt;</td>"));
        assert_eq!(html.matches("<tr><td>").count(), 2);
    }
}
