//! Record store for users, offers, transactions, fraud checks and admins.
//!
//! Every entity kind is append-only and listed in arrival order. Two
//! backends implement [`Store`]: [`MemoryStore`] for tests and database-less
//! runs, and [`PgStore`] over one PostgreSQL table per entity.

pub mod connection;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{
    fraud_check::FraudCheck,
    offer::Offer,
    summary::Summary,
    transaction::Transaction,
    user::{AdminUser, User},
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Offset/limit window over a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Page {
    pub fn all() -> Self {
        Page {
            skip: 0,
            limit: i64::MAX,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Page {
            skip: 0,
            limit: crate::dtos::admin_dtos::DEFAULT_PAGE_LIMIT,
        }
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Short backend name for logs and the health endpoint.
    fn backend(&self) -> &'static str;

    async fn ping(&self) -> Result<()>;

    /// Fails with `DuplicateKey` if the id or email is taken. A stub row
    /// left by `ensure_user` (no email) is completed instead.
    async fn insert_user(&self, user: &User) -> Result<()>;
    async fn get_user(&self, user_id: &str) -> Result<Option<User>>;
    /// Inserts `user` only when no row with its id exists yet.
    async fn ensure_user(&self, user: &User) -> Result<()>;
    async fn list_users(&self, page: Page) -> Result<Vec<User>>;

    async fn insert_offer(&self, offer: &Offer) -> Result<()>;
    async fn get_offer(&self, offer_id: &str) -> Result<Option<Offer>>;
    async fn list_offers(&self, page: Page) -> Result<Vec<Offer>>;

    async fn insert_transaction(&self, transaction: &Transaction) -> Result<()>;
    async fn list_transactions(&self, page: Page) -> Result<Vec<Transaction>>;

    async fn insert_fraud_check(&self, check: &FraudCheck) -> Result<()>;
    async fn list_fraud_checks(&self, page: Page) -> Result<Vec<FraudCheck>>;

    async fn insert_admin(&self, admin: &AdminUser) -> Result<()>;
    async fn find_admin_by_username(&self, username: &str) -> Result<Option<AdminUser>>;
    async fn touch_admin_login(&self, admin_id: &str) -> Result<()>;

    async fn summary(&self) -> Result<Summary>;
}
