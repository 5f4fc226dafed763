use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{Page, Store};
use crate::errors::{AppError, Result};
use crate::models::{
    fraud_check::FraudCheck,
    offer::Offer,
    summary::Summary,
    transaction::{Transaction, TransactionStatus},
    user::{AdminUser, User},
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    offers: Vec<Offer>,
    offer_index: HashMap<String, usize>,
    transactions: Vec<Transaction>,
    fraud_checks: Vec<FraudCheck>,
    admins: Vec<AdminUser>,
}

/// In-process store. Vectors keep arrival order; offers are also indexed by id
/// since payments look them up.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn window<T: Clone>(items: &[T], page: Page) -> Vec<T> {
    let skip = usize::try_from(page.skip).unwrap_or(0);
    let limit = usize::try_from(page.limit).unwrap_or(usize::MAX);
    items.iter().skip(skip).take(limit).cloned().collect()
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn insert_user(&self, user: &User) -> Result<()> {
        let mut tables = self.tables.write().await;
        if let Some(email) = user.email.as_deref() {
            let email_taken = tables
                .users
                .iter()
                .any(|u| u.user_id != user.user_id && u.email.as_deref() == Some(email));
            if email_taken {
                return Err(AppError::DuplicateKey(format!("email {}", email)));
            }
        }

        match tables.users.iter_mut().find(|u| u.user_id == user.user_id) {
            // A stub left behind by ensure_user gets completed in place.
            Some(existing) if existing.email.is_none() && user.email.is_some() => {
                existing.email = user.email.clone();
                existing.phone = user.phone.clone();
                existing.country = user.country.clone();
                existing.is_verified = user.is_verified;
            }
            Some(_) => return Err(AppError::DuplicateKey(format!("user {}", user.user_id))),
            None => tables.users.push(user.clone()),
        }
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.user_id == user_id).cloned())
    }

    async fn ensure_user(&self, user: &User) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.user_id == user.user_id) {
            tables.users.push(user.clone());
        }
        Ok(())
    }

    async fn list_users(&self, page: Page) -> Result<Vec<User>> {
        Ok(window(&self.tables.read().await.users, page))
    }

    async fn insert_offer(&self, offer: &Offer) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.offer_index.contains_key(&offer.offer_id) {
            return Err(AppError::DuplicateKey(format!("offer {}", offer.offer_id)));
        }
        let position = tables.offers.len();
        tables.offers.push(offer.clone());
        tables.offer_index.insert(offer.offer_id.clone(), position);
        Ok(())
    }

    async fn get_offer(&self, offer_id: &str) -> Result<Option<Offer>> {
        let tables = self.tables.read().await;
        Ok(tables
            .offer_index
            .get(offer_id)
            .and_then(|&i| tables.offers.get(i))
            .cloned())
    }

    async fn list_offers(&self, page: Page) -> Result<Vec<Offer>> {
        Ok(window(&self.tables.read().await.offers, page))
    }

    async fn insert_transaction(&self, transaction: &Transaction) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.offer_index.contains_key(&transaction.offer_id) {
            return Err(AppError::OfferNotFound(transaction.offer_id.clone()));
        }
        tables.transactions.push(transaction.clone());
        Ok(())
    }

    async fn list_transactions(&self, page: Page) -> Result<Vec<Transaction>> {
        Ok(window(&self.tables.read().await.transactions, page))
    }

    async fn insert_fraud_check(&self, check: &FraudCheck) -> Result<()> {
        self.tables.write().await.fraud_checks.push(check.clone());
        Ok(())
    }

    async fn list_fraud_checks(&self, page: Page) -> Result<Vec<FraudCheck>> {
        Ok(window(&self.tables.read().await.fraud_checks, page))
    }

    async fn insert_admin(&self, admin: &AdminUser) -> Result<()> {
        let mut tables = self.tables.write().await;
        let taken = tables
            .admins
            .iter()
            .any(|a| a.username == admin.username || a.email == admin.email);
        if taken {
            return Err(AppError::DuplicateKey(format!("admin {}", admin.username)));
        }
        tables.admins.push(admin.clone());
        Ok(())
    }

    async fn find_admin_by_username(&self, username: &str) -> Result<Option<AdminUser>> {
        let tables = self.tables.read().await;
        Ok(tables.admins.iter().find(|a| a.username == username).cloned())
    }

    async fn touch_admin_login(&self, admin_id: &str) -> Result<()> {
        let mut tables = self.tables.write().await;
        let admin = tables
            .admins
            .iter_mut()
            .find(|a| a.admin_id == admin_id)
            .ok_or(AppError::DocumentNotFound)?;
        admin.last_login = Some(Utc::now());
        Ok(())
    }

    async fn summary(&self) -> Result<Summary> {
        let tables = self.tables.read().await;
        let mut summary = Summary {
            total_users: tables.users.len() as i64,
            total_offers: tables.offers.len() as i64,
            total_transactions: tables.transactions.len() as i64,
            total_fraud_checks: tables.fraud_checks.len() as i64,
            ..Summary::default()
        };

        summary.total_processed = tables
            .transactions
            .iter()
            .filter(|t| t.status == TransactionStatus::Completed)
            .map(|t| t.amount)
            .sum();

        for offer in &tables.offers {
            *summary
                .offer_status_counts
                .entry(offer.status.to_string())
                .or_insert(0) += 1;
        }
        for check in &tables.fraud_checks {
            *summary
                .fraud_status_counts
                .entry(check.status.to_string())
                .or_insert(0) += 1;
        }

        if !tables.fraud_checks.is_empty() {
            let total: i64 = tables
                .fraud_checks
                .iter()
                .map(|c| i64::from(c.fraud_score))
                .sum();
            summary.average_fraud_score = total as f64 / tables.fraud_checks.len() as f64;
        }

        Ok(summary)
    }
}
