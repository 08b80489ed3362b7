use std::sync::Arc;

use code_review::{build_router, config, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "code_review=info,tower_http=info".into()),
        )
        .init();

    let config = Arc::new(config::Config::from_env()?);
    if config.inference_token.is_empty() {
        tracing::warn!("HUGGINGFACE_TOKEN is not set; inference calls will be unauthorized");
    }

    let state = Arc::new(AppState::from_config(config.clone()).await?);
    let app = build_router(state.clone());

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Code review API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.store.close().await;
    tracing::info!("Review store closed, shutting down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
