//! Route registration.
//!
//! `health` is mounted at the root; everything else is mounted under
//! `/api` by `api_routes()`.

pub mod clothswap;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// All routes mounted under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(clothswap::router())
}
