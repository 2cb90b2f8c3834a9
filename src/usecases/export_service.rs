//! Export use case. Renders a built schedule for display, download and mail delivery.
//!
//! Coordinates the pure export adapters, the file writer and the optional delivery port.

use crate::adapters::export::{
    ChartInterval, TableRow, render_html_body, render_pdf, render_text_body, rows_to_csv,
    to_chart_intervals, to_table,
};
use crate::adapters::persistence::fs_export::FsExport;
use crate::domain::{DomainError, Schedule};
use crate::ports::{DeliveryPayload, DeliveryPort};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Every rendered shape of one schedule.
#[derive(Debug, Clone)]
pub struct ExportArtifacts {
    pub rows: Vec<TableRow>,
    pub intervals: Vec<ChartInterval>,
    pub csv: String,
    pub csv_filename: String,
    pub pdf: Vec<u8>,
    pub pdf_filename: String,
    pub text_body: String,
    pub html_body: String,
}

/// Where the downloads of one schedule were written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedExport {
    pub csv_path: PathBuf,
    pub pdf_path: PathBuf,
}

/// Service for exporting schedules.
pub struct ExportService {
    files: FsExport,
    delivery: Option<Arc<dyn DeliveryPort>>,
}

impl ExportService {
    /// Create a new export service.
    ///
    /// # Arguments
    /// * `export_dir` - Directory the CSV and PDF downloads are written to
    /// * `delivery` - Mail/webhook collaborator; `None` disables delivery
    pub fn new(export_dir: PathBuf, delivery: Option<Arc<dyn DeliveryPort>>) -> Self {
        Self {
            files: FsExport::new(export_dir),
            delivery,
        }
    }

    pub fn is_delivery_configured(&self) -> bool {
        self.delivery.is_some()
    }

    /// Render table, chart, CSV, PDF and mail bodies. No I/O.
    pub fn render(&self, schedule: &Schedule) -> Result<ExportArtifacts, DomainError> {
        let rows = to_table(schedule);
        let csv = rows_to_csv(&rows)
            .map_err(|e| DomainError::Export(format!("Failed to generate CSV: {}", e)))?;
        let pdf = render_pdf(schedule)
            .map_err(|e| DomainError::Export(format!("Failed to generate PDF: {}", e)))?;

        Ok(ExportArtifacts {
            intervals: to_chart_intervals(schedule),
            csv_filename: FsExport::csv_filename(schedule.request()),
            pdf_filename: FsExport::pdf_filename(schedule.request()),
            pdf,
            text_body: render_text_body(schedule),
            html_body: render_html_body(schedule),
            rows,
            csv,
        })
    }

    /// Write the CSV and PDF downloads.
    pub async fn save(
        &self,
        schedule: &Schedule,
        artifacts: &ExportArtifacts,
    ) -> Result<SavedExport, DomainError> {
        let csv_path = self
            .files
            .write_csv(schedule.request(), &artifacts.csv)
            .await?;
        let pdf_path = self
            .files
            .write_pdf(schedule.request(), &artifacts.pdf)
            .await?;
        Ok(SavedExport { csv_path, pdf_path })
    }

    /// Hand the schedule to the delivery collaborator.
    ///
    /// Returns `Ok(false)` without doing anything when delivery is not configured.
    pub async fn deliver(
        &self,
        schedule: &Schedule,
        artifacts: &ExportArtifacts,
    ) -> Result<bool, DomainError> {
        let Some(delivery) = &self.delivery else {
            info!("delivery not configured; skipping");
            return Ok(false);
        };

        let payload = DeliveryPayload {
            project_name: schedule.request().project_name.clone(),
            csv_filename: artifacts.csv_filename.clone(),
            csv: artifacts.csv.clone(),
            pdf_filename: artifacts.pdf_filename.clone(),
            pdf: artifacts.pdf.clone(),
            text_body: artifacts.text_body.clone(),
            html_body: artifacts.html_body.clone(),
        };
        delivery.deliver(&payload).await?;
        Ok(true)
    }
}
