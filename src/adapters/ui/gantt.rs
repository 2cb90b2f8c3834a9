//! Terminal Gantt chart. One coloured bar per chart interval, scaled to the schedule span.

use crate::adapters::export::ChartInterval;
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{Write, stdout};

/// Label column width in characters.
const LABEL_WIDTH: usize = 32;

/// Bar colours, cycled by week.
const PALETTE: &[Color] = &[
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::Red,
];

/// A laid-out chart row: label column, then `offset` blanks, then `len` bar cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GanttRow {
    pub label: String,
    pub offset: usize,
    pub len: usize,
    pub week: u32,
}

/// Lay out `intervals` on a `width`-column timeline. Order is kept; nothing is merged.
pub fn layout(intervals: &[ChartInterval], width: usize) -> Vec<GanttRow> {
    let width = width.max(1);
    let (Some(first), Some(last)) = (
        intervals.iter().map(|i| i.start).min(),
        intervals.iter().map(|i| i.end).max(),
    ) else {
        return Vec::new();
    };
    let total_days = ((last - first).num_days() + 1).max(1) as usize;

    intervals
        .iter()
        .map(|iv| {
            let from = (iv.start - first).num_days().max(0) as usize;
            let to = (iv.end - first).num_days().max(0) as usize + 1;
            let col_from = from * width / total_days;
            let col_to = (to * width / total_days).max(col_from + 1).min(width);
            GanttRow {
                label: fit_label(&iv.label),
                offset: col_from.min(width - 1),
                len: col_to.saturating_sub(col_from).max(1),
                week: iv.week,
            }
        })
        .collect()
}

fn fit_label(label: &str) -> String {
    let count = label.chars().count();
    if count <= LABEL_WIDTH {
        format!("{:<width$}", label, width = LABEL_WIDTH)
    } else {
        let mut s: String = label.chars().take(LABEL_WIDTH - 1).collect();
        s.push('…');
        s
    }
}

/// Print the chart to stdout, with a header row showing the date range.
pub fn print_gantt(intervals: &[ChartInterval], width: usize) {
    let rows = layout(intervals, width);
    if rows.is_empty() {
        return;
    }
    let mut out = stdout();

    if let (Some(first), Some(last)) = (
        intervals.iter().map(|i| i.start).min(),
        intervals.iter().map(|i| i.end).max(),
    ) {
        let from = first.format("%Y-%m-%d").to_string();
        let to = last.format("%Y-%m-%d").to_string();
        let gap = width.saturating_sub(from.len() + to.len()).max(1);
        let _ = out.execute(Print(format!(
            "{:<lw$} {}{}{}\r\n",
            "Gantt chart",
            from,
            " ".repeat(gap),
            to,
            lw = LABEL_WIDTH
        )));
    }

    for row in &rows {
        let color = PALETTE[(row.week as usize).saturating_sub(1) % PALETTE.len()];
        let _ = out.execute(Print(format!("{} {}", row.label, " ".repeat(row.offset))));
        let _ = out.execute(SetForegroundColor(color));
        let _ = out.execute(Print("█".repeat(row.len)));
        let _ = out.execute(ResetColor);
        let _ = out.execute(Print(format!(" W{}\r\n", row.week)));
    }
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn iv(label: &str, week: u32) -> ChartInterval {
        let base = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let start = base + chrono::Days::new(u64::from(week - 1) * 7);
        ChartInterval {
            label: label.to_string(),
            start,
            end: start + chrono::Days::new(6),
            week,
        }
    }

    #[test]
    fn test_layout_splits_width_by_week() {
        let rows = layout(&[iv("a", 1), iv("b", 2), iv("c", 2)], 28);
        assert_eq!(rows.len(), 3);
        assert_eq!((rows[0].offset, rows[0].len), (0, 14));
        assert_eq!((rows[1].offset, rows[1].len), (14, 14));
        assert_eq!((rows[2].offset, rows[2].len), (14, 14));
        assert_eq!(rows[2].week, 2);
    }

    #[test]
    fn test_layout_never_empty_bar() {
        let intervals: Vec<_> = (1..=20).map(|w| iv("t", w)).collect();
        let rows = layout(&intervals, 10);
        assert!(rows.iter().all(|r| r.len >= 1 && r.offset + r.len <= 10));
    }

    #[test]
    fn test_layout_truncates_long_labels() {
        let rows = layout(&[iv(&"x".repeat(50), 1)], 10);
        assert_eq!(rows[0].label.chars().count(), LABEL_WIDTH);
        assert!(rows[0].label.ends_with('…'));
    }

    #[test]
    fn test_layout_empty() {
        assert!(layout(&[], 40).is_empty());
    }
}
