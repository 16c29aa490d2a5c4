use std::net::SocketAddr;
use std::sync::Arc;

use pdfchat_core::{AgentConfig, GeminiAgent};
use pdfchat_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Missing GEMINI_API_KEY is fatal: refuse to serve rather than fail on
    // the first chat submit.
    let config = AgentConfig::from_env()
        .map_err(|e| anyhow::anyhow!("configuration error: {e}"))?;
    tracing::info!(model = %config.model, timeout_secs = config.timeout.as_secs(), "agent configured");

    let agent = Arc::new(GeminiAgent::from_config(&config));
    let state = AppState::new(config, agent);
    let app = pdfchat_web::router(state);

    let port: u16 = std::env::var("PDFCHAT_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5001);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
