pub mod admin_auth;
pub mod export;
pub mod fraud_rules;
pub mod offer_rules;
pub mod payments;
