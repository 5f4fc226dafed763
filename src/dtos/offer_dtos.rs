use serde::Deserialize;
use validator::Validate;

use super::not_blank;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OfferRequest {
    #[validate(custom(function = "not_blank", message = "user_id is required"))]
    pub user_id: String,

    #[validate(range(exclusive_min = 0.0, message = "order_amount must be positive"))]
    pub order_amount: f64,

    #[validate(range(min = 0, message = "recent_payments cannot be negative"))]
    pub recent_payments: i64,

    #[validate(range(min = 0, message = "failed_payments_last_30_days cannot be negative"))]
    pub failed_payments_last_30_days: i64,

    #[validate(custom(function = "not_blank", message = "device_country is required"))]
    pub device_country: String,

    #[validate(custom(function = "not_blank", message = "billing_country is required"))]
    pub billing_country: String,

    pub employer_enrolled: bool,

    #[validate(range(min = 0.0, message = "salary_monthly cannot be negative"))]
    pub salary_monthly: Option<f64>,
}
