use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Placeholder row for a requester that was never registered, so that
    /// offers and fraud checks can still reference it.
    pub fn stub(user_id: &str, country: &str, created_at: DateTime<Utc>) -> Self {
        User {
            user_id: user_id.to_string(),
            email: None,
            phone: None,
            country: country.to_string(),
            is_verified: false,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub admin_id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub exp: usize,
}
