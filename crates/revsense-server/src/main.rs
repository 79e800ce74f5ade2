mod api;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use revsense_sentiment::ReviewPipeline;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = revsense_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pipeline = Arc::new(ReviewPipeline::from_app_config(&config)?);

    // Warm the model in the background so the first request does not pay for
    // the load. A failure here is retried by the first real request.
    let warm = Arc::clone(&pipeline);
    tokio::spawn(async move {
        if let Err(e) = warm.classifier().ensure_loaded().await {
            tracing::warn!(error = %e, "sentiment model warm-up failed");
        }
    });

    let app = build_app(AppState {
        pipeline,
        analysis_timeout: Duration::from_secs(config.analysis_timeout_secs),
        sample_size: config.sample_size,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "revsense server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
