pub mod config;
pub mod error;
pub mod state;
pub mod auth;
pub mod db;
pub mod models;
pub mod money;
pub mod revalidate;
pub mod routes;
pub mod seed;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::revalidate::Revalidations;
use crate::state::{AppState, SharedState};

/// Assemble the router over an already-connected store. The state
/// handle is returned alongside so callers can reach the registries
/// behind the running app.
pub fn build_app(store: Store, config: Config) -> (Router, SharedState) {
    let state: SharedState = Arc::new(AppState {
        store,
        config,
        revalidations: Revalidations::new(),
    });

    let router = Router::new()
        .merge(routes::app_routes())
        .route("/health", axum::routing::get(health))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state.clone());

    (router, state)
}

async fn health() -> &'static str {
    "ok"
}
