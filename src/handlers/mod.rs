pub mod admin;
pub mod dashboard;
pub mod fraud;
pub mod health;
pub mod offers;
pub mod payments;
pub mod users;
