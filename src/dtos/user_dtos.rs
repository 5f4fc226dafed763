use serde::Deserialize;
use validator::Validate;

use super::not_blank;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(custom(function = "not_blank", message = "user_id is required"))]
    pub user_id: String,

    #[validate(email(message = "email must be a valid address"))]
    pub email: String,

    pub phone: Option<String>,

    #[validate(custom(function = "not_blank", message = "country is required"))]
    pub country: String,
}
