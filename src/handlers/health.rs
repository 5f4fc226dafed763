use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Ruua API is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let db_status = match state.store.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!("Store ping failed: {}", e);
            "disconnected"
        }
    };

    Json(json!({
        "status": "healthy",
        "store": state.store.backend(),
        "database": db_status,
        "admin_auth_required": state.config.admin_auth_required,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
