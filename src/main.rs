use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use prompt_relay::adapters::ai::{GroqConfig, GroqProvider};
use prompt_relay::adapters::http::{app_router, OriginAllowlist, PromptAppState};
use prompt_relay::adapters::storage::InMemoryConversationStore;
use prompt_relay::application::SendPromptHandler;
use prompt_relay::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match AppConfig::load_validated() {
        Ok(config) => config,
        Err(e) => {
            init_tracing("info", false);
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    init_tracing(&config.server.log_level, config.is_production());
    tracing::info!(environment = ?config.server.environment, "Starting prompt relay");

    // Validation guarantees both are present
    let (Some(base_url), Some(api_key)) = (config.ai.base_url(), config.ai.api_key()) else {
        tracing::error!("AI base URL and API key are required");
        std::process::exit(1);
    };
    let provider = GroqProvider::new(
        GroqConfig::new(api_key)
            .with_base_url(base_url)
            .with_model(config.ai.model.clone())
            .with_timeout(config.ai.timeout()),
    )?;

    let store = Arc::new(InMemoryConversationStore::with_max_turns(
        config.conversation.max_turns,
    ));
    let handler = Arc::new(SendPromptHandler::new(store, Arc::new(provider)));

    if let Some(ttl) = config.conversation.idle_ttl() {
        spawn_idle_sweeper(Arc::clone(&handler), ttl, config.conversation.sweep_interval());
    }

    let allowlist = OriginAllowlist::new(config.server.cors_origins_list());
    let app = app_router(PromptAppState::new(handler), allowlist);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(default_filter: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if json {
        builder.json().init();
    } else {
        builder.pretty().init();
    }
}

fn spawn_idle_sweeper(handler: Arc<SendPromptHandler>, ttl: Duration, every: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // First tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(e) = handler.sweep_idle(ttl).await {
                tracing::warn!(error = %e, "Idle sweep failed");
            }
        }
    });
}
