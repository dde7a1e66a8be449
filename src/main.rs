use std::sync::Arc;

use anyhow::Context;
use synthsearch::api::create_router;
use synthsearch::config::Config;
use synthsearch::provider::OpenAiClient;
use synthsearch::synthesizer::ResultSynthesizer;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string())),
        )
        .with_target(true)
        .init();

    let config = Config::from_env()?;

    let provider = OpenAiClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.openai_model.clone(),
        config.search_timeout,
    )?;
    let synthesizer = Arc::new(ResultSynthesizer::new(Arc::new(provider)));
    let app = create_router(synthesizer);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!("listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
