//! Application use cases. Orchestrate domain logic via ports.

pub mod export_service;
pub mod schedule_service;

pub use export_service::{ExportArtifacts, ExportService, SavedExport};
pub use schedule_service::ScheduleService;
