use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Json},
};
use chrono::Utc;

use crate::{
    database::Page,
    dtos::admin_dtos::{ListQuery, LoginRequest, LoginResponse},
    errors::Result,
    extractors::{ValidatedJson, ValidatedQuery},
    models::{
        fraud_check::{FraudCheck, FraudCheckRow},
        offer::Offer,
        summary::Summary,
        transaction::Transaction,
        user::User,
    },
    services::{admin_auth, export::to_csv},
    state::AppState,
};

pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let response = admin_auth::login(
        state.store.as_ref(),
        &state.config,
        &payload.username,
        &payload.password,
    )
    .await?;
    Ok(Json(response))
}

pub async fn list_offers(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> Result<Json<Vec<Offer>>> {
    let offers = state.store.list_offers(query.page()).await?;
    tracing::debug!("Fetched {} offers", offers.len());
    Ok(Json(offers))
}

pub async fn list_transactions(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> Result<Json<Vec<Transaction>>> {
    let transactions = state.store.list_transactions(query.page()).await?;
    tracing::debug!("Fetched {} transactions", transactions.len());
    Ok(Json(transactions))
}

pub async fn list_fraud_checks(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> Result<Json<Vec<FraudCheck>>> {
    let checks = state.store.list_fraud_checks(query.page()).await?;
    tracing::debug!("Fetched {} fraud checks", checks.len());
    Ok(Json(checks))
}

pub async fn list_users(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> Result<Json<Vec<User>>> {
    Ok(Json(state.store.list_users(query.page()).await?))
}

pub async fn summary(State(state): State<AppState>) -> Result<Json<Summary>> {
    Ok(Json(state.store.summary().await?))
}

fn csv_download(entity: &str, body: Vec<u8>) -> impl IntoResponse {
    let filename = format!("{}_{}.csv", entity, Utc::now().format("%Y%m%d_%H%M%S"));
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
}

pub async fn export_offers(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let offers = state.store.list_offers(Page::all()).await?;
    tracing::info!("📤 Exporting {} offers", offers.len());
    Ok(csv_download("offers", to_csv(&offers)?))
}

pub async fn export_transactions(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let transactions = state.store.list_transactions(Page::all()).await?;
    tracing::info!("📤 Exporting {} transactions", transactions.len());
    Ok(csv_download("transactions", to_csv(&transactions)?))
}

pub async fn export_fraud_checks(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let checks = state.store.list_fraud_checks(Page::all()).await?;
    tracing::info!("📤 Exporting {} fraud checks", checks.len());
    Ok(csv_download(
        "fraud_checks",
        to_csv(checks.iter().map(FraudCheckRow::from))?,
    ))
}
