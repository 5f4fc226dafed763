// config.rs
use std::env;
use std::str::FromStr;

use crate::errors::{AppError, Result};

const DEV_JWT_SECRET: &str = "your-secret-key-change-in-production";
/// One year.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs on the in-memory store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub admin_username: String,
    pub admin_email: String,
    /// The default admin is only seeded when a password is configured.
    pub admin_password: Option<String>,
    pub admin_auth_required: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
            database_url: None,
            database_max_connections: 5,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_hours: 24,
            admin_username: "admin".to_string(),
            admin_email: "admin@ruua.local".to_string(),
            admin_password: None,
            admin_auth_required: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to the defaults
    /// for keys that are absent or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = AppConfig::default();

        let config = AppConfig {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or(get("PORT"), "PORT", defaults.port)?,
            database_url: get("DATABASE_URL"),
            database_max_connections: parse_or(
                get("DATABASE_MAX_CONNECTIONS"),
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            )?,
            jwt_secret: get("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            token_ttl_hours: parse_or(
                get("TOKEN_TTL_HOURS"),
                "TOKEN_TTL_HOURS",
                defaults.token_ttl_hours,
            )?,
            admin_username: get("ADMIN_USERNAME").unwrap_or(defaults.admin_username),
            admin_email: get("ADMIN_EMAIL").unwrap_or(defaults.admin_email),
            admin_password: get("ADMIN_PASSWORD"),
            admin_auth_required: parse_or(
                get("ADMIN_AUTH_REQUIRED"),
                "ADMIN_AUTH_REQUIRED",
                defaults.admin_auth_required,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.database_max_connections == 0 {
            return Err(AppError::configuration(
                "DATABASE_MAX_CONNECTIONS must be at least 1",
            ));
        }
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&self.token_ttl_hours) {
            return Err(AppError::configuration(format!(
                "TOKEN_TTL_HOURS must be between 1 and {}",
                MAX_TOKEN_TTL_HOURS
            )));
        }
        if self.admin_auth_required && self.admin_password.is_none() {
            return Err(AppError::configuration(
                "ADMIN_AUTH_REQUIRED needs ADMIN_PASSWORD so an admin can log in",
            ));
        }
        if self.admin_auth_required && self.jwt_secret == DEV_JWT_SECRET {
            tracing::warn!("⚠️ Admin auth is enabled with the development JWT secret");
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> Result<T> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| AppError::configuration(format!("{} has an invalid value '{}'", key, value))),
        None => Ok(default),
    }
}
