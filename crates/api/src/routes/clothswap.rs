//! Clothswap submission route. Mounted at `/clothswap` by `api_routes()`.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::clothswap::submit;
use crate::state::AppState;

/// Two 10 MiB images plus multipart overhead fit comfortably here.
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clothswap", post(submit))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
