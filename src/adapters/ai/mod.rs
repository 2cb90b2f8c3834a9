//! AI adapter module. Implements LlmPort for schedule generation.
//!
//! Provides OpenAI-compatible adapter and mock adapter for testing.

pub mod mock_adapter;
pub mod openai_adapter;
pub mod prompt;

pub use mock_adapter::MockAiAdapter;
pub use openai_adapter::OpenAiAdapter;
