//! Filesystem output for generated schedules.

pub mod fs_export;

pub use fs_export::FsExport;
