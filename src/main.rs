use ai_llm_service::{config_review_model, telemetry};
use mr_reviewer::{RelayConfig, ReviewRelay};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the process environment may already be complete.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(telemetry::env_filter("info"))
        .with(telemetry::layer())
        .init();

    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!(error = %e, ".env could not be loaded");
        }
    }

    let config = RelayConfig::from_env()?;
    let llm = config_review_model()?;
    info!(model = %llm.model, provider = %llm.provider, ?config, "configuration loaded");

    let relay = ReviewRelay::new(config, llm)?;
    api::start(relay).await?;

    Ok(())
}
