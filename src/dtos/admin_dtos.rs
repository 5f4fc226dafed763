use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::database::Page;

pub const DEFAULT_PAGE_LIMIT: i64 = 100;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListQuery {
    #[validate(range(min = 0, message = "skip cannot be negative"))]
    pub skip: Option<i64>,

    #[validate(range(min = 1, max = 1000, message = "limit must be between 1 and 1000"))]
    pub limit: Option<i64>,
}

impl ListQuery {
    pub fn page(&self) -> Page {
        Page {
            skip: self.skip.unwrap_or(0),
            limit: self.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub token_type: String,
    pub expires_at: String,
}
