use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Utc;

use crate::{
    dtos::user_dtos::CreateUserRequest,
    errors::Result,
    extractors::ValidatedJson,
    models::user::User,
    state::AppState,
};

// Register a user
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let user = User {
        user_id: payload.user_id,
        email: Some(payload.email),
        phone: payload.phone.filter(|p| !p.trim().is_empty()),
        country: payload.country,
        is_verified: false,
        created_at: Utc::now(),
    };

    state.store.insert_user(&user).await?;

    tracing::info!("👤 Registered user {}", user.user_id);
    Ok((StatusCode::CREATED, Json(user)))
}
