//! Flat export. Uses the `csv` crate for safe serialization.
//!
//! Converts the tabular view to comma-separated text with a header row,
//! suitable for the file download and the mail attachment.

use crate::adapters::export::TableRow;

/// Column names, in [`TableRow`] field order.
pub const CSV_HEADER: [&str; 4] = ["week", "task", "start_date", "end_date"];

/// Convert table rows to a CSV string.
///
/// Format: `week,task,start_date,end_date`, dates as `YYYY-MM-DD`. Fields holding
/// commas, quotes or line breaks are quoted by the writer (RFC 4180 style).
///
/// # Returns
/// CSV string with header row. Writing goes to memory, so an error here means the
/// in-memory buffer itself failed.
pub fn rows_to_csv(rows: &[TableRow]) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    // Written by hand so an empty table still gets a header.
    wtr.write_record(CSV_HEADER)?;

    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    let bytes = wtr.into_inner().map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::Other,
            e.to_string(),
        ))
    })?;

    String::from_utf8(bytes).map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::export::to_table;
    use crate::domain::{RawModelResponse, ScheduleRequest, builder, parser};
    use chrono::NaiveDate;

    fn row(week: u32, task: &str) -> TableRow {
        let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        TableRow {
            week,
            task: task.to_string(),
            start_date: start,
            end_date: start + chrono::Days::new(6),
        }
    }

    #[test]
    fn test_rows_to_csv_basic() {
        let csv = rows_to_csv(&[row(1, "Site prep")]).unwrap();
        assert_eq!(
            csv,
            "week,task,start_date,end_date\n1,Site prep,2024-03-04,2024-03-10\n"
        );
    }

    #[test]
    fn test_rows_to_csv_quotes_special_chars() {
        let csv = rows_to_csv(&[row(2, "Pour slab, cure \"48h\"")]).unwrap();
        assert!(csv.contains(r#"2,"Pour slab, cure ""48h""",2024-03-04,2024-03-10"#));
    }

    #[test]
    fn test_rows_to_csv_empty_has_header() {
        assert_eq!(rows_to_csv(&[]).unwrap(), "week,task,start_date,end_date\n");
    }

    #[test]
    fn test_csv_round_trip_preserves_pairs_and_order() {
        let raw = RawModelResponse::new(
            r#"[{"week":2,"task":"Frame, roof"},{"week":1,"task":"Dig \"north\" trench"},{"week":2,"task":"Line1\nLine2"}]"#,
        );
        let req = ScheduleRequest::new(
            "Depot",
            "Leeds",
            2,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        );
        let parsed = parser::parse(&raw, 2).unwrap();
        let schedule = builder::build(parsed.entries, req).unwrap();
        let rows = to_table(&schedule);
        let csv = rows_to_csv(&rows).unwrap();

        let mut rdr = csv::Reader::from_reader(csv.as_bytes());
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_HEADER.to_vec());
        let back: Vec<TableRow> = rdr.deserialize().collect::<Result<_, _>>().unwrap();

        let expected: Vec<(u32, &str)> = schedule
            .entries()
            .iter()
            .map(|e| (e.week, e.task.as_str()))
            .collect();
        let got: Vec<(u32, &str)> = back.iter().map(|r| (r.week, r.task.as_str())).collect();
        assert_eq!(got, expected);
        assert_eq!(back, rows);
    }
}
