//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Collects the four request fields, runs generation, shows table + Gantt,
//! saves the CSV and PDF and optionally delivers by mail.

use crate::adapters::export::TableRow;
use crate::adapters::ui::{gantt, progress};
use crate::domain::{DomainError, ScheduleRequest};
use crate::ports::InputPort;
use crate::usecases::{ExportService, ScheduleService};
use async_trait::async_trait;
use chrono::NaiveDate;
use crossterm::style::Stylize;
use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, StyleSheet, Styled};
use inquire::validator::Validation;
use inquire::{Confirm, CustomType, Select, Text};
use std::sync::Arc;

/// Width of the Gantt bar area in terminal columns.
const GANTT_WIDTH: usize = 48;

const MENU_GENERATE: &str = "Generate schedule";
const MENU_QUIT: &str = "Quit";

/// Applies the prompt theme globally. Call once before the first prompt.
pub fn apply_theme() {
    let mut cfg = RenderConfig::default();
    cfg.prompt_prefix = Styled::new("?").with_fg(Color::LightCyan);
    cfg.highlighted_option_prefix = Styled::new(">").with_fg(Color::LightYellow);
    cfg.answer = StyleSheet::new().with_fg(Color::LightCyan);
    inquire::set_global_render_config(cfg);
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    schedule_service: Arc<ScheduleService>,
    export_service: Arc<ExportService>,
    max_weeks: u32,
    default_weeks: u32,
}

impl TuiInputPort {
    pub fn new(
        schedule_service: Arc<ScheduleService>,
        export_service: Arc<ExportService>,
        max_weeks: u32,
        default_weeks: u32,
    ) -> Self {
        Self {
            schedule_service,
            export_service,
            max_weeks,
            default_weeks,
        }
    }

    /// Prompt for the four request fields. `Ok(None)` when the user cancels.
    fn prompt_request(&self) -> Result<Option<ScheduleRequest>, DomainError> {
        let project_name = match Text::new("Project name:")
            .with_validator(non_empty("Project name is required"))
            .prompt()
        {
            Ok(s) => s.trim().to_string(),
            Err(e) => return cancelled_or(e),
        };

        let location = match Text::new("Location:")
            .with_validator(non_empty("Location is required"))
            .prompt()
        {
            Ok(s) => s.trim().to_string(),
            Err(e) => return cancelled_or(e),
        };

        let max_weeks = self.max_weeks;
        let weeks_help = format!("1 to {}", max_weeks);
        let weeks = match CustomType::<u32>::new("Duration (weeks):")
            .with_default(self.default_weeks)
            .with_error_message("Please type a whole number of weeks")
            .with_help_message(&weeks_help)
            .with_validator(move |w: &u32| -> Result<Validation, inquire::CustomUserError> {
                if (1..=max_weeks).contains(w) {
                    Ok(Validation::Valid)
                } else {
                    Ok(Validation::Invalid(
                        format!("Duration must be between 1 and {} weeks", max_weeks).into(),
                    ))
                }
            })
            .prompt()
        {
            Ok(w) => w,
            Err(e) => return cancelled_or(e),
        };

        let today = chrono::Local::now().date_naive();
        let start_date = match CustomType::<NaiveDate>::new("Start date:")
            .with_default(today)
            .with_error_message("Please use the YYYY-MM-DD format")
            .with_help_message("YYYY-MM-DD")
            .prompt()
        {
            Ok(d) => d,
            Err(e) => return cancelled_or(e),
        };

        Ok(Some(ScheduleRequest::new(
            project_name,
            location,
            weeks,
            start_date,
        )))
    }

    /// One full submission: generate, display, save, maybe deliver.
    /// Failures are reported to the user and do not end the session.
    async fn run_once(&self, request: ScheduleRequest) -> Result<(), DomainError> {
        let spinner = progress::spinner("Generating construction schedule...");
        let generated = self.schedule_service.generate(request).await;
        spinner.finish_and_clear();

        let outcome = match generated {
            Ok(o) => o,
            Err(e) => {
                println!("{}", format!("Error: {}", e.user_message()).red());
                return Ok(());
            }
        };

        let artifacts = match self.export_service.render(&outcome.schedule) {
            Ok(a) => a,
            Err(e) => {
                println!("{}", format!("Error: {}", e.user_message()).red());
                return Ok(());
            }
        };

        println!();
        print_table(&artifacts.rows);
        if outcome.skipped_count() > 0 {
            println!(
                "{}",
                format!(
                    "Note: {} malformed entr{} from the model were skipped.",
                    outcome.skipped_count(),
                    if outcome.skipped_count() == 1 { "y" } else { "ies" }
                )
                .yellow()
            );
        }
        println!();
        gantt::print_gantt(&artifacts.intervals, GANTT_WIDTH);
        println!();

        match self
            .export_service
            .save(&outcome.schedule, &artifacts)
            .await
        {
            Ok(saved) => {
                println!("{} {}", "CSV saved:".green(), saved.csv_path.display());
                println!("{} {}", "PDF saved:".green(), saved.pdf_path.display());
            }
            Err(e) => println!("{}", format!("Could not save files: {}", e.user_message()).red()),
        }

        if !self.export_service.is_delivery_configured() {
            return Ok(());
        }
        let send = match Confirm::new("Finalize & send by email?")
            .with_default(false)
            .prompt()
        {
            Ok(b) => b,
            Err(e) => return cancelled_or::<()>(e).map(|_| ()),
        };
        if send {
            match self
                .export_service
                .deliver(&outcome.schedule, &artifacts)
                .await
            {
                Ok(_) => println!("{}", "Sent to email & automation system!".green()),
                Err(e) => println!("{}", format!("Failed to send: {}", e.user_message()).red()),
            }
        }
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let choice = match Select::new("What next?", vec![MENU_GENERATE, MENU_QUIT]).prompt() {
                Ok(c) => c,
                Err(e) => return cancelled_or::<()>(e).map(|_| ()),
            };
            if choice == MENU_QUIT {
                return Ok(());
            }

            let Some(request) = self.prompt_request()? else {
                continue;
            };
            self.run_once(request).await?;
        }
    }
}

fn non_empty(
    message: &'static str,
) -> impl Fn(&str) -> Result<Validation, inquire::CustomUserError> + Clone {
    move |s: &str| {
        if s.trim().is_empty() {
            Ok(Validation::Invalid(message.into()))
        } else {
            Ok(Validation::Valid)
        }
    }
}

/// Esc / Ctrl-C end the current prompt flow quietly; anything else is an input error.
fn cancelled_or<T>(e: InquireError) -> Result<Option<T>, DomainError> {
    match e {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => Ok(None),
        other => Err(DomainError::Input(other.to_string())),
    }
}

fn print_table(rows: &[TableRow]) {
    let task_width = rows
        .iter()
        .map(|r| r.task.chars().count())
        .max()
        .unwrap_or(4)
        .clamp(4, 60);
    println!(
        "{:>4}  {:<tw$}  {:<10}  {:<10}",
        "Week",
        "Task",
        "Start",
        "End",
        tw = task_width
    );
    println!("{}", "-".repeat(4 + 2 + task_width + 2 + 10 + 2 + 10));
    for r in rows {
        let task: String = if r.task.chars().count() > task_width {
            let mut t: String = r.task.chars().take(task_width - 1).collect();
            t.push('…');
            t
        } else {
            r.task.clone()
        };
        println!(
            "{:>4}  {:<tw$}  {}  {}",
            r.week,
            task,
            r.start_date.format("%Y-%m-%d"),
            r.end_date.format("%Y-%m-%d"),
            tw = task_width
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAiAdapter;

    #[tokio::test]
    async fn test_unwritable_export_dir_keeps_session_alive() {
        let dir = tempfile::tempdir().unwrap();
        // A plain file where the export directory should be.
        let blocked = dir.path().join("schedules");
        std::fs::write(&blocked, "not a directory").unwrap();

        let tui = TuiInputPort::new(
            Arc::new(ScheduleService::new(Arc::new(MockAiAdapter::with_delay(0)))),
            Arc::new(ExportService::new(blocked.join("nested"), None)),
            20,
            4,
        );
        let request = ScheduleRequest::new(
            "Harbour Depot",
            "Leeds",
            4,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        );

        assert!(tui.run_once(request).await.is_ok());
        assert!(!blocked.join("nested").exists());
    }
}
