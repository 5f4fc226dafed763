use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::errors::AppError;
use crate::services::admin_auth::verify_token;
use crate::state::AppState;

/// Guards the admin listings. A pass-through unless `ADMIN_AUTH_REQUIRED`
/// is set, in which case a valid bearer token is needed.
pub async fn require_admin(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !state.config.admin_auth_required {
        return Ok(next.run(request).await);
    }

    let token = headers
        .get("authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or(AppError::AuthError)?;

    let claims = verify_token(token, &state.config)?;

    // Insert claims into request extensions
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
