use serde::Deserialize;
use validator::Validate;

use super::not_blank;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FraudRequest {
    #[validate(custom(function = "not_blank", message = "user_id is required"))]
    pub user_id: String,

    #[validate(range(exclusive_min = 0.0, message = "transaction_amount must be positive"))]
    pub transaction_amount: f64,

    #[validate(custom(function = "not_blank", message = "device_country is required"))]
    pub device_country: String,

    #[validate(custom(function = "not_blank", message = "billing_country is required"))]
    pub billing_country: String,

    #[validate(range(min = 1, message = "device_count must be at least 1"))]
    pub device_count: i64,

    #[validate(range(min = 0, message = "failed_payments_last_30_days cannot be negative"))]
    pub failed_payments_last_30_days: i64,
}
