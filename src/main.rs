//! ordering-helper-backend — LINE-integrated bilingual ordering assistant.
//!
//! Receives cart submissions from a LIFF client, resolves stores and menu
//! items, renders bilingual order summaries, synthesizes Mandarin voice
//! audio for staff, and pushes everything back over LINE.

mod api;
mod config;
mod db;
pub mod error;
mod external;
mod models;
mod services;
mod state;

use config::Config;
use state::AppState;
use tokio::signal;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ordering_helper_backend=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env();
    tracing::info!(env = %config.environment, "starting ordering-helper-backend");

    let state = AppState::new(config).await?;
    let app = api::create_router(state.clone());

    let addr = format!("0.0.0.0:{}", state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {addr}");

    // Periodic scratch-voice eviction (spec.md §4.12), independent of the
    // per-synthesis eviction `services::voice::synthesize` already does.
    let sweep_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(600));
        loop {
            interval.tick().await;
            match services::lifecycle::evict_default(&sweep_state.config.voice_scratch_dir).await {
                Ok(n) if n > 0 => tracing::debug!(evicted = n, "swept stale voice scratch files"),
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "voice scratch sweep failed"),
            }
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("ordering-helper-backend shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to listen for SIGTERM")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
