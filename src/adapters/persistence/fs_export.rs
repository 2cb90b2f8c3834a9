//! Writes the schedule downloads to disk.
//! One CSV and one PDF per generated schedule: {base_dir}/{project-slug}_{start_date}.{csv,pdf}.
//! Write-replace via a temp file so a crash never leaves a half-written file behind.

use crate::domain::{DomainError, ScheduleRequest};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// File-system exporter for generated schedules.
pub struct FsExport {
    base_dir: PathBuf,
}

impl FsExport {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// File name for a request's CSV, e.g. `harbour-depot_2024-03-04.csv`.
    pub fn csv_filename(request: &ScheduleRequest) -> String {
        format!("{}.csv", file_stem(request))
    }

    /// File name for a request's PDF report, e.g. `harbour-depot_2024-03-04.pdf`.
    pub fn pdf_filename(request: &ScheduleRequest) -> String {
        format!("{}.pdf", file_stem(request))
    }

    /// Write `csv` for `request`, replacing any earlier export of the same name.
    pub async fn write_csv(
        &self,
        request: &ScheduleRequest,
        csv: &str,
    ) -> Result<PathBuf, DomainError> {
        self.write_file(&Self::csv_filename(request), csv.as_bytes())
            .await
    }

    /// Write the PDF report for `request`, replacing any earlier one.
    pub async fn write_pdf(
        &self,
        request: &ScheduleRequest,
        pdf: &[u8],
    ) -> Result<PathBuf, DomainError> {
        self.write_file(&Self::pdf_filename(request), pdf).await
    }

    async fn write_file(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, DomainError> {
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| DomainError::Export(format!("create export dir: {}", e)))?;

        let path = self.base_dir.join(name);
        let temp_path = self.base_dir.join(format!("{}.tmp", name));

        if let Err(e) = replace_via_temp(&temp_path, &path, bytes).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        let abs_path = path.canonicalize().unwrap_or_else(|_| path.clone());
        info!(path = %abs_path.display(), bytes = bytes.len(), "schedule export saved");
        Ok(path)
    }
}

async fn replace_via_temp(temp_path: &Path, path: &Path, bytes: &[u8]) -> Result<(), DomainError> {
    let mut f = fs::File::create(temp_path)
        .await
        .map_err(|e| DomainError::Export(format!("create temp file: {}", e)))?;
    f.write_all(bytes)
        .await
        .map_err(|e| DomainError::Export(format!("write temp file: {}", e)))?;
    f.sync_all()
        .await
        .map_err(|e| DomainError::Export(format!("sync temp file: {}", e)))?;
    drop(f);

    fs::rename(temp_path, path)
        .await
        .map_err(|e| DomainError::Export(format!("rename failed: {}", e)))
}

fn file_stem(request: &ScheduleRequest) -> String {
    format!(
        "{}_{}",
        slugify(&request.project_name),
        request.start_date.format("%Y-%m-%d")
    )
}

/// Lowercase ASCII alphanumerics, everything else collapsed to single dashes.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "schedule".to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request() -> ScheduleRequest {
        ScheduleRequest::new(
            "Harbour Depot",
            "Leeds",
            2,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        )
    }

    #[test]
    fn test_filenames_share_stem() {
        assert_eq!(FsExport::csv_filename(&request()), "harbour-depot_2024-03-04.csv");
        assert_eq!(FsExport::pdf_filename(&request()), "harbour-depot_2024-03-04.pdf");
    }

    #[tokio::test]
    async fn test_write_pdf_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let files = FsExport::new(dir.path());
        files.write_pdf(&request(), b"%PDF-old").await.unwrap();
        let path = files.write_pdf(&request(), b"%PDF-new").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-new");
        assert!(!dir.path().join("harbour-depot_2024-03-04.pdf.tmp").exists());
    }

    #[tokio::test]
    async fn test_failed_write_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory at the target name makes the final rename fail.
        std::fs::create_dir(dir.path().join("harbour-depot_2024-03-04.csv")).unwrap();
        let files = FsExport::new(dir.path());

        let err = files.write_csv(&request(), "week,task\n").await.unwrap_err();
        assert!(matches!(err, DomainError::Export(_)));
        assert!(!dir.path().join("harbour-depot_2024-03-04.csv.tmp").exists());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Harbour Depot (Phase 2)"), "harbour-depot-phase-2");
        assert_eq!(slugify("  ***  "), "schedule");
        assert_eq!(slugify("Школа"), "schedule");
    }
}
