pub mod fraud_check;
pub mod offer;
pub mod summary;
pub mod transaction;
pub mod user;
