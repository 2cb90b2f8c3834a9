//! OpenAI-compatible adapter for schedule generation.
//!
//! Supports OpenAI API, Azure OpenAI, and local Ollama instances.
//! Returns the model's message content untouched; parsing belongs to the domain.

use crate::adapters::ai::prompt;
use crate::domain::{DomainError, RawModelResponse, ScheduleRequest};
use crate::ports::LlmPort;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// OpenAI-compatible LLM adapter.
///
/// Can be configured to work with:
/// - OpenAI API (api.openai.com)
/// - Azure OpenAI
/// - Ollama (localhost)
/// - Any OpenAI-compatible API
pub struct OpenAiAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiAdapter {
    /// Create a new OpenAI adapter.
    ///
    /// # Arguments
    /// * `api_url` - API endpoint (e.g., "https://api.openai.com/v1/chat/completions")
    /// * `api_key` - API key (can be empty for local Ollama)
    /// * `model` - Model name (e.g., "gpt-4o-mini", "llama3.2")
    /// * `temperature` - Sampling temperature
    /// * `timeout` - Whole-request timeout
    pub fn new(
        api_url: String,
        api_key: String,
        model: String,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Llm(format!("HTTP client init failed: {}", e)))?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
            temperature,
        })
    }
}

/// OpenAI API request structure.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// OpenAI API response structure.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait::async_trait]
impl LlmPort for OpenAiAdapter {
    async fn generate_schedule(
        &self,
        request: &ScheduleRequest,
    ) -> Result<RawModelResponse, DomainError> {
        info!(
            project = %request.project_name,
            weeks = request.duration_weeks,
            model = %self.model,
            "requesting schedule from AI"
        );

        // No `response_format: json_object` here: it forces a top-level object,
        // while the schedule is a list.
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: prompt::system_prompt().to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt::user_prompt(request),
                },
            ],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::Llm(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "AI API returned error");
            return Err(DomainError::Llm(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Llm(format!("Failed to parse API response: {}", e)))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| DomainError::Llm("No response choices returned".to_string()))?;

        debug!(raw_len = content.len(), "received AI response");

        Ok(RawModelResponse::new(content.trim()))
    }
}
