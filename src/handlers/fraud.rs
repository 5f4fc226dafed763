use axum::{extract::State, response::Json};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    dtos::fraud_dtos::FraudRequest,
    errors::Result,
    extractors::ValidatedJson,
    models::{fraud_check::FraudCheck, user::User},
    services::fraud_rules::{self, FraudSignals},
    state::AppState,
};

// Score a transaction for fraud and keep the result
pub async fn fraud_check(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<FraudRequest>,
) -> Result<Json<FraudCheck>> {
    let assessment = fraud_rules::score(&FraudSignals::from(&payload));
    let now = Utc::now();

    state
        .store
        .ensure_user(&User::stub(&payload.user_id, &payload.billing_country, now))
        .await?;

    let check = FraudCheck::from_assessment(
        Uuid::new_v4().to_string(),
        payload.user_id,
        payload.transaction_amount,
        assessment,
        now,
    );
    state.store.insert_fraud_check(&check).await?;

    if check.flags.is_empty() {
        tracing::info!("🕵️ Fraud check {} clean", check.fraud_check_id);
    } else {
        tracing::warn!(
            "🚩 Fraud check {} scored {} ({}/{}): {}",
            check.fraud_check_id,
            check.fraud_score,
            check.status,
            check.action,
            check.flags.join(", ")
        );
    }
    Ok(Json(check))
}
