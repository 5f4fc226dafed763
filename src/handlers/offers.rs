use axum::{extract::State, response::Json};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    dtos::offer_dtos::OfferRequest,
    errors::Result,
    extractors::ValidatedJson,
    models::{offer::Offer, user::User},
    services::offer_rules,
    state::AppState,
};

// Decide and store a loan offer
pub async fn create_offer(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<OfferRequest>,
) -> Result<Json<Offer>> {
    tracing::info!(
        "🎯 Offer request from {} - Amount: {:.2}, recent payments: {}, failed (30d): {}, employer enrolled: {}",
        payload.user_id,
        payload.order_amount,
        payload.recent_payments,
        payload.failed_payments_last_30_days,
        payload.employer_enrolled
    );

    let decision = offer_rules::decide_offer(&payload);
    let now = Utc::now();

    state
        .store
        .ensure_user(&User::stub(&payload.user_id, &payload.billing_country, now))
        .await?;

    let offer = Offer::from_decision(
        Uuid::new_v4().to_string(),
        payload.user_id,
        payload.order_amount,
        decision,
        now,
    );
    state.store.insert_offer(&offer).await?;

    tracing::info!(
        "✅ Offer {} decided: {} (offered {:.2} over {} months)",
        offer.offer_id,
        offer.status,
        offer.amount_offered,
        offer.term_months
    );
    Ok(Json(offer))
}
