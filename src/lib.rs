//! Ruua: a small embedded-finance API.
//!
//! Decides loan offers, records payments against approved offers and scores
//! transactions for fraud with fixed threshold rules. Records go to a
//! [`database::Store`], either PostgreSQL or in memory.

pub mod cli;
pub mod config;
pub mod database;
pub mod dtos;
pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod migrate;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{
    http::Method,
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{dashboard::dashboard, health};
use crate::middleware::auth::require_admin;
use crate::state::AppState;

pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_credentials(false);

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_check))
        .route(
            "/dashboard",
            get(dashboard).route_layer(from_fn_with_state(app_state.clone(), require_admin)),
        )
        .nest("/api", routes::api::api_routes())
        .nest("/admin", routes::admin::admin_routes(app_state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
