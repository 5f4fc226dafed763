use axum::{routing::post, Router};

use crate::handlers::{fraud::fraud_check, offers::create_offer, payments::pay, users::create_user};
use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // POST /api/offer - Decide a loan offer
        .route("/offer", post(create_offer))
        // POST /api/pay - Pay an approved offer
        .route("/pay", post(pay))
        // POST /api/fraud-check - Score a transaction
        .route("/fraud-check", post(fraud_check))
        .route("/users", post(create_user))
}
