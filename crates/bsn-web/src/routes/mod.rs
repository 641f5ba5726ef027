//! HTTP routes for the JSON API.

pub mod api;

use crate::AppState;
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/accounts", get(api::list_accounts))
        .route("/api/accounts/:address", get(api::get_account))
        .route("/api/tags", get(api::list_tags))
        .route("/api/tags/:name", get(api::get_tag))
        .route("/api/volunteers", get(api::list_volunteers))
        .route("/api/balances", get(api::list_balances))
        .route("/api/tokens", get(api::list_tokens))
        .route("/api/graph", get(api::get_graph))
        // CORS for browser clients
        .layer(CorsLayer::permissive())
        // State
        .with_state(state)
}
