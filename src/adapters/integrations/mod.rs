//! Third-party integrations. Delivery of finished schedules.

pub mod webhook;

pub use webhook::WebhookDelivery;
