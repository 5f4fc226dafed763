use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PayRequest {
    #[validate(length(min = 1, message = "offer_id is required"))]
    pub offer_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PayResponse {
    pub success: bool,
    pub transaction_id: String,
    pub message: String,
}
