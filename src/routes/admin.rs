use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers::admin::*;
use crate::middleware::auth::require_admin;
use crate::state::AppState;

pub fn admin_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        // GET /admin/offers?skip=0&limit=100
        .route("/offers", get(list_offers))
        .route("/transactions", get(list_transactions))
        .route("/fraud-checks", get(list_fraud_checks))
        .route("/users", get(list_users))
        .route("/summary", get(summary))
        // GET /admin/export/offers - CSV download
        .route("/export/offers", get(export_offers))
        .route("/export/transactions", get(export_transactions))
        .route("/export/fraud-checks", get(export_fraud_checks))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/login", post(login))
        .merge(protected)
}
