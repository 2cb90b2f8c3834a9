//! Printable PDF report: a "<project> Schedule" title, then one `Week N: task` line per row.
//!
//! Built directly with `lopdf` on A4 pages using the standard Helvetica font, so no
//! font files are embedded. Text outside WinAnsi is replaced with `?`.

use crate::adapters::export::{TableRow, to_table};
use crate::domain::Schedule;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 56;
const TITLE_SIZE: i64 = 16;
const BODY_SIZE: i64 = 11;
const LEADING: i64 = 16;
/// Characters per body line. Helvetica averages about half an em per glyph.
const WRAP_COLUMNS: usize = 84;
const CONTINUATION_INDENT: &str = "    ";

/// Render the schedule as PDF bytes.
pub fn render_pdf(schedule: &Schedule) -> Result<Vec<u8>, lopdf::Error> {
    let title = format!("{} Schedule", schedule.request().project_name);
    let lines = report_lines(&to_table(schedule));

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let body_top = PAGE_HEIGHT - MARGIN - TITLE_SIZE - LEADING;
    let per_page = ((body_top - MARGIN) / LEADING).max(1) as usize;

    let mut kids: Vec<Object> = Vec::new();
    let mut chunks: Vec<&[String]> = lines.chunks(per_page).collect();
    if chunks.is_empty() {
        chunks.push(&[]);
    }
    for (page_no, chunk) in chunks.iter().enumerate() {
        let mut operations = Vec::new();
        if page_no == 0 {
            operations.extend(text_at(
                centered_x(&title, TITLE_SIZE),
                PAGE_HEIGHT - MARGIN - TITLE_SIZE,
                TITLE_SIZE,
                &title,
            ));
        }
        let top = if page_no == 0 {
            body_top
        } else {
            PAGE_HEIGHT - MARGIN - BODY_SIZE
        };
        for (i, line) in chunk.iter().enumerate() {
            operations.extend(text_at(MARGIN, top - i as i64 * LEADING, BODY_SIZE, line));
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(page_count),
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(PAGE_WIDTH),
            Object::Integer(PAGE_HEIGHT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

/// Body lines, one `Week N: task` per row, long tasks wrapped onto indented lines.
fn report_lines(rows: &[TableRow]) -> Vec<String> {
    let mut lines = Vec::with_capacity(rows.len());
    for row in rows {
        let text = format!("Week {}: {}", row.week, row.task);
        let mut current = String::new();
        for word in text.split_whitespace() {
            let width = current.chars().count();
            if width > 0 && width + 1 + word.chars().count() > WRAP_COLUMNS {
                lines.push(std::mem::take(&mut current));
                current.push_str(CONTINUATION_INDENT);
            } else if width > 0 && !current.ends_with(' ') {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }
    lines
}

fn text_at(x: i64, y: i64, size: i64, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), Object::Integer(size)]),
        Operation::new("Td", vec![Object::Integer(x), Object::Integer(y)]),
        Operation::new("Tj", vec![Object::string_literal(win_ansi(text))]),
        Operation::new("ET", vec![]),
    ]
}

fn centered_x(text: &str, size: i64) -> i64 {
    let approx_width = text.chars().count() as i64 * size / 2;
    ((PAGE_WIDTH - approx_width) / 2).max(MARGIN)
}

/// Latin-1 printable characters map to the same WinAnsi byte.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            0x20..=0x7E | 0xA0..=0xFF => u32::from(c) as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ScheduleEntry, ScheduleRequest, builder};
    use chrono::NaiveDate;

    fn schedule(entries: Vec<ScheduleEntry>, weeks: u32) -> Schedule {
        let req = ScheduleRequest::new(
            "Harbour Depot",
            "Leeds",
            weeks,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        );
        builder::build(entries, req).unwrap()
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_render_pdf_single_page() {
        let s = schedule(
            vec![ScheduleEntry::new(1, "Survey"), ScheduleEntry::new(2, "Dig")],
            2,
        );
        let bytes = render_pdf(&s).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert!(contains(&bytes, b"(Harbour Depot Schedule)"));
        assert!(contains(&bytes, b"(Week 1: Survey)"));
        assert!(contains(&bytes, b"(Week 2: Dig)"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_render_pdf_paginates_long_schedules() {
        let entries = (1..=20)
            .flat_map(|w| (0..5).map(move |i| ScheduleEntry::new(w, format!("Task {w}.{i}"))))
            .collect();
        let bytes = render_pdf(&schedule(entries, 20)).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() > 1);
    }

    #[test]
    fn test_report_lines_wrap_long_tasks() {
        let rows = to_table(&schedule(vec![ScheduleEntry::new(1, "word ".repeat(40))], 1));
        let lines = report_lines(&rows);
        assert!(lines.len() > 1);
        assert!(lines[0].starts_with("Week 1: word"));
        assert!(lines[1].starts_with(CONTINUATION_INDENT));
        assert!(lines.iter().all(|l| l.chars().count() <= WRAP_COLUMNS));
    }

    #[test]
    fn test_win_ansi_replaces_unmappable() {
        assert_eq!(win_ansi("Café → Школа"), b"Caf\xE9 ? ?????".to_vec());
    }
}
