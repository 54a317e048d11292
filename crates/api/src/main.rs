use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clothswap_api::config::{ForwardMode, ServerConfig};
use clothswap_api::router::build_app_router;
use clothswap_api::state::AppState;
use clothswap_n8n::{
    ForwardStrategy, HttpObjectStorage, N8nApi, ObjectStorage, RawForwarder, UrlForwarder,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clothswap_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        webhook_url = %config.webhook_url,
        forward_mode = ?config.forward_mode,
        "Loaded server configuration"
    );

    // --- Forwarding strategy ---
    let forwarder = build_forwarder(&config);

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        forwarder,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Construct the deployed forwarding strategy from configuration.
///
/// `ServerConfig::from_env` already guarantees the storage URL is
/// present in URL mode.
fn build_forwarder(config: &ServerConfig) -> Arc<dyn ForwardStrategy> {
    let api = N8nApi::new(config.webhook_url.clone());

    match config.forward_mode {
        ForwardMode::Raw => Arc::new(RawForwarder::new(api)),
        ForwardMode::Url => {
            let upload_url = config
                .storage_upload_url
                .clone()
                .expect("STORAGE_UPLOAD_URL must be set when FORWARD_STRATEGY=url");
            let storage: Arc<dyn ObjectStorage> = Arc::new(HttpObjectStorage::new(
                upload_url,
                config.storage_api_key.clone(),
            ));
            Arc::new(UrlForwarder::new(api, storage))
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
