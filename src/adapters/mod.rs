//! Infrastructure adapters. Implement outbound ports.
//!
//! LLM, export renderers, filesystem, delivery webhook, terminal UI. Map errors to DomainError.

pub mod ai;
pub mod export;
pub mod integrations;
pub mod persistence;
pub mod ui;
