//! Export adapters. Pure transforms from a built Schedule to display, chart, file, print and mail shapes.

pub mod chart;
pub mod csv_export;
pub mod pdf;
pub mod report;
pub mod table;

pub use chart::{ChartInterval, to_chart_intervals};
pub use csv_export::{CSV_HEADER, rows_to_csv};
pub use pdf::render_pdf;
pub use report::{render_html_body, render_text_body};
pub use table::{TableRow, to_table};
