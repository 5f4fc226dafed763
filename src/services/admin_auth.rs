use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::database::Store;
use crate::dtos::admin_dtos::LoginResponse;
use crate::errors::{AppError, Result};
use crate::models::user::{AdminUser, Claims};

/// Creates the configured admin account if it does not exist yet.
/// Does nothing when no `ADMIN_PASSWORD` is configured.
pub async fn seed_admin(store: &dyn Store, config: &AppConfig) -> Result<()> {
    let Some(password) = config.admin_password.as_deref() else {
        tracing::info!("No ADMIN_PASSWORD configured, skipping admin seed");
        return Ok(());
    };

    if store
        .find_admin_by_username(&config.admin_username)
        .await?
        .is_some()
    {
        tracing::debug!("Admin '{}' already present", config.admin_username);
        return Ok(());
    }

    let admin = AdminUser {
        admin_id: Uuid::new_v4().to_string(),
        username: config.admin_username.clone(),
        email: config.admin_email.clone(),
        password_hash: hash(password, DEFAULT_COST)?,
        is_active: true,
        created_at: Utc::now(),
        last_login: None,
    };
    store.insert_admin(&admin).await?;

    tracing::info!("✅ Seeded admin user '{}'", admin.username);
    Ok(())
}

pub async fn login(
    store: &dyn Store,
    config: &AppConfig,
    username: &str,
    password: &str,
) -> Result<LoginResponse> {
    let admin = store
        .find_admin_by_username(username)
        .await?
        .ok_or(AppError::AuthError)?;

    if !admin.is_active || !verify(password, &admin.password_hash)? {
        tracing::warn!("Failed admin login for '{}'", username);
        return Err(AppError::AuthError);
    }

    store.touch_admin_login(&admin.admin_id).await?;

    let expires_at = Duration::try_hours(config.token_ttl_hours)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .ok_or_else(|| {
            AppError::configuration(format!(
                "TOKEN_TTL_HOURS {} is out of range",
                config.token_ttl_hours
            ))
        })?;
    let token = issue_token(&admin, config, expires_at.timestamp())?;

    tracing::info!("🔑 Admin '{}' logged in", admin.username);
    Ok(LoginResponse {
        success: true,
        token,
        token_type: "Bearer".to_string(),
        expires_at: expires_at.to_rfc3339(),
    })
}

pub fn issue_token(admin: &AdminUser, config: &AppConfig, expires_at: i64) -> Result<String> {
    let claims = Claims {
        sub: admin.admin_id.clone(),
        username: admin.username.clone(),
        exp: usize::try_from(expires_at)
            .map_err(|_| AppError::service(format!("token expiry {} out of range", expires_at)))?,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_ref()),
    )?)
}

pub fn verify_token(token: &str, config: &AppConfig) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_ref()),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(token_data.claims)
}
