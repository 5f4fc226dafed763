use axum::{extract::State, response::Json};

use crate::{
    dtos::payment_dtos::{PayRequest, PayResponse},
    errors::Result,
    extractors::ValidatedJson,
    services::payments::process_payment,
    state::AppState,
};

// Pay an approved offer
pub async fn pay(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<PayRequest>,
) -> Result<Json<PayResponse>> {
    let transaction = process_payment(state.store.as_ref(), &payload.offer_id).await?;

    Ok(Json(PayResponse {
        success: true,
        transaction_id: transaction.transaction_id,
        message: "Payment processed successfully".to_string(),
    }))
}
