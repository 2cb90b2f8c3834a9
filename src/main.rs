//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use consched::adapters::ai::{MockAiAdapter, OpenAiAdapter};
use consched::adapters::integrations::webhook::WebhookDelivery;
use consched::adapters::ui::tui::TuiInputPort;
use consched::ports::{DeliveryPort, InputPort, LlmPort};
use consched::shared::config::AppConfig;
use consched::usecases::{ExportService, ScheduleService};
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;
    let timeout = Duration::from_secs(cfg.ai_timeout_secs_or_default());
    for url in [Some(cfg.ai_api_url_or_default()), cfg.webhook_url()]
        .into_iter()
        .flatten()
    {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("Endpoint must be an http(s) URL, got {:?}", url);
        }
    }

    consched::adapters::ui::init_ui();

    // --- LLM collaborator ---
    let llm: Arc<dyn LlmPort> = if let Some(api_key) = cfg.ai_api_key() {
        info!(
            model = %cfg.ai_model_or_default(),
            url = %cfg.ai_api_url_or_default(),
            "schedule generation enabled with OpenAI adapter"
        );
        Arc::new(
            OpenAiAdapter::new(
                cfg.ai_api_url_or_default(),
                api_key,
                cfg.ai_model_or_default(),
                cfg.ai_temperature_or_default(),
                timeout,
            )
            .map_err(|e| anyhow::anyhow!("{}", e))?,
        )
    } else {
        warn!("CONSCHED_AI_API_KEY / OPENAI_API_KEY not set, using mock AI adapter");
        Arc::new(MockAiAdapter::new())
    };

    // --- Delivery collaborator (optional) ---
    let delivery: Option<Arc<dyn DeliveryPort>> = match cfg.webhook_url() {
        Some(url) => {
            info!("schedule delivery enabled (webhook)");
            Some(Arc::new(
                WebhookDelivery::new(url, timeout).map_err(|e| anyhow::anyhow!("{}", e))?,
            ))
        }
        None => {
            info!("CONSCHED_WEBHOOK_URL not set; email delivery disabled");
            None
        }
    };

    let data_path = PathBuf::from(cfg.data_dir_or_default());
    let export_dir = data_path.join("schedules");
    info!(path = %export_dir.display(), "CSV export directory");

    // --- Services ---
    let schedule_service = Arc::new(ScheduleService::new(llm));
    let export_service = Arc::new(ExportService::new(export_dir, delivery));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        schedule_service,
        export_service,
        cfg.max_weeks_or_default(),
        cfg.default_weeks_or_default(),
    ));

    // --- Run (main menu -> Generate / Quit) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
