pub mod admin_dtos;
pub mod fraud_dtos;
pub mod offer_dtos;
pub mod payment_dtos;
pub mod user_dtos;

use std::borrow::Cow;

use validator::ValidationError;

/// Rejects empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(
            ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")),
        );
    }
    Ok(())
}
