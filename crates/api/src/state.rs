use std::sync::Arc;

use clothswap_n8n::ForwardStrategy;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). The forwarding
/// strategy is injected at construction time so tests can substitute a
/// stub without touching the environment.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The deployed forwarding strategy (raw or URL).
    pub forwarder: Arc<dyn ForwardStrategy>,
}
