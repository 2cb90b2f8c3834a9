//! Application configuration. API credentials, paths, input limits.
//!
//! Loaded once at startup and passed by value into the adapters that need it.

use serde::Deserialize;

/// Default OpenAI-compatible chat completions endpoint.
pub const DEFAULT_AI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Upper bound offered for the schedule duration (weeks).
pub const DEFAULT_MAX_WEEKS: u32 = 20;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // LLM Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// AI API key. Read from CONSCHED_AI_API_KEY (fallback OPENAI_API_KEY).
    #[serde(default)]
    pub ai_api_key: Option<String>,

    /// AI API URL. Defaults to OpenAI. Read from CONSCHED_AI_API_URL.
    #[serde(default)]
    pub ai_api_url: Option<String>,

    /// AI model name. Defaults to "gpt-4o-mini". Read from CONSCHED_AI_MODEL.
    #[serde(default)]
    pub ai_model: Option<String>,

    /// Sampling temperature. Defaults to 0.5. Read from CONSCHED_AI_TEMPERATURE.
    #[serde(default)]
    pub ai_temperature: Option<f32>,

    /// Request timeout in seconds for LLM and webhook calls. Read from CONSCHED_AI_TIMEOUT_SECS.
    #[serde(default)]
    pub ai_timeout_secs: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // Delivery Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// Mail/automation webhook. Read from CONSCHED_WEBHOOK_URL (fallback ZAPIER_WEBHOOK_URL).
    #[serde(default)]
    pub webhook_url: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Paths and input limits
    // ─────────────────────────────────────────────────────────────────────────
    /// Where CSV downloads go (under `schedules/`). Read from CONSCHED_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Largest duration the prompt accepts. Read from CONSCHED_MAX_WEEKS.
    #[serde(default)]
    pub max_weeks: Option<u32>,

    /// Pre-filled duration. Read from CONSCHED_DEFAULT_WEEKS.
    #[serde(default)]
    pub default_weeks: Option<u32>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("CONSCHED"));
        if let Ok(path) = std::env::var("CONSCHED_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let cfg: Self = c.build()?.try_deserialize()?;
        Ok(cfg)
    }

    /// Returns the AI API key if configured. Reads from config or OPENAI_API_KEY env.
    pub fn ai_api_key(&self) -> Option<String> {
        self.ai_api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }

    /// Returns the AI API URL. Defaults to OpenAI chat completions endpoint.
    pub fn ai_api_url_or_default(&self) -> String {
        self.ai_api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_AI_API_URL.to_string())
    }

    /// Returns the AI model name. Defaults to "gpt-4o-mini".
    pub fn ai_model_or_default(&self) -> String {
        self.ai_model
            .clone()
            .unwrap_or_else(|| "gpt-4o-mini".to_string())
    }

    /// Returns sampling temperature clamped to [0.0, 2.0]. Defaults to 0.5.
    pub fn ai_temperature_or_default(&self) -> f32 {
        self.ai_temperature.unwrap_or(0.5).clamp(0.0, 2.0)
    }

    /// Returns request timeout in seconds. Defaults to 120.
    pub fn ai_timeout_secs_or_default(&self) -> u64 {
        self.ai_timeout_secs.unwrap_or(120).max(1)
    }

    /// Returns the delivery webhook from config or ZAPIER_WEBHOOK_URL env.
    pub fn webhook_url(&self) -> Option<String> {
        self.webhook_url
            .clone()
            .or_else(|| std::env::var("ZAPIER_WEBHOOK_URL").ok())
            .filter(|u| !u.trim().is_empty())
    }

    /// Returns data directory. Defaults to "./data".
    pub fn data_dir_or_default(&self) -> String {
        self.data_dir.clone().unwrap_or_else(|| "./data".to_string())
    }

    /// Returns max weeks (at least 1). Defaults to 20.
    pub fn max_weeks_or_default(&self) -> u32 {
        self.max_weeks.unwrap_or(DEFAULT_MAX_WEEKS).max(1)
    }

    /// Returns the pre-filled duration, kept within 1..=max_weeks. Defaults to 10.
    pub fn default_weeks_or_default(&self) -> u32 {
        self.default_weeks
            .unwrap_or(10)
            .clamp(1, self.max_weeks_or_default())
    }
}
