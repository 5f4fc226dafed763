use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;

use super::{Page, Store};
use crate::errors::{AppError, Result};
use crate::models::{
    fraud_check::FraudCheck,
    offer::Offer,
    summary::Summary,
    transaction::Transaction,
    user::{AdminUser, User},
};

/// PostgreSQL-backed store. Status enums are stored as their snake_case text.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(err: sqlx::Error, what: impl Into<String>) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::DuplicateKey(what.into())
        }
        _ => AppError::Database(err),
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: String,
    email: Option<String>,
    phone: Option<String>,
    country: String,
    is_verified: bool,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            user_id: row.user_id,
            email: row.email,
            phone: row.phone,
            country: row.country,
            is_verified: row.is_verified,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OfferRow {
    offer_id: String,
    user_id: String,
    order_amount: f64,
    status: String,
    amount_offered: f64,
    term_months: i32,
    interest_rate: f64,
    monthly_payment: f64,
    reason: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OfferRow> for Offer {
    type Error = AppError;

    fn try_from(row: OfferRow) -> Result<Self> {
        Ok(Offer {
            offer_id: row.offer_id,
            user_id: row.user_id,
            order_amount: row.order_amount,
            status: row.status.parse().map_err(AppError::service)?,
            amount_offered: row.amount_offered,
            term_months: row.term_months,
            interest_rate: row.interest_rate,
            monthly_payment: row.monthly_payment,
            reason: row.reason,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TransactionRow {
    transaction_id: String,
    offer_id: String,
    user_id: String,
    amount: f64,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = AppError;

    fn try_from(row: TransactionRow) -> Result<Self> {
        Ok(Transaction {
            transaction_id: row.transaction_id,
            offer_id: row.offer_id,
            user_id: row.user_id,
            amount: row.amount,
            status: row.status.parse().map_err(AppError::service)?,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct FraudCheckRow {
    fraud_check_id: String,
    user_id: String,
    transaction_amount: f64,
    fraud_score: i32,
    status: String,
    flags: Vec<String>,
    action: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<FraudCheckRow> for FraudCheck {
    type Error = AppError;

    fn try_from(row: FraudCheckRow) -> Result<Self> {
        Ok(FraudCheck {
            fraud_check_id: row.fraud_check_id,
            user_id: row.user_id,
            transaction_amount: row.transaction_amount,
            fraud_score: row.fraud_score,
            status: row.status.parse().map_err(AppError::service)?,
            flags: row.flags,
            action: row.action.parse().map_err(AppError::service)?,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AdminRow {
    admin_id: String,
    username: String,
    email: String,
    hashed_password: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    last_login: Option<DateTime<Utc>>,
}

impl From<AdminRow> for AdminUser {
    fn from(row: AdminRow) -> Self {
        AdminUser {
            admin_id: row.admin_id,
            username: row.username,
            email: row.email,
            password_hash: row.hashed_password,
            is_active: row.is_active,
            created_at: row.created_at,
            last_login: row.last_login,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TotalsRow {
    total_users: i64,
    total_offers: i64,
    total_transactions: i64,
    total_fraud_checks: i64,
    total_processed: f64,
    average_fraud_score: f64,
}

const USER_COLUMNS: &str = "user_id, email, phone, country, is_verified, created_at";
const OFFER_COLUMNS: &str = "offer_id, user_id, order_amount, status, amount_offered, \
     term_months, interest_rate, monthly_payment, reason, created_at";
const TRANSACTION_COLUMNS: &str = "transaction_id, offer_id, user_id, amount, status, created_at";
const FRAUD_CHECK_COLUMNS: &str = "fraud_check_id, user_id, transaction_amount, fraud_score, \
     status, flags, action, created_at";
const ADMIN_COLUMNS: &str =
    "admin_id, username, email, hashed_password, is_active, created_at, last_login";

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert_user(&self, user: &User) -> Result<()> {
        // Stub rows from ensure_user have no email and are completed in place.
        let result = sqlx::query(
            "INSERT INTO users (user_id, email, phone, country, is_verified, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (user_id) DO UPDATE SET \
             email = EXCLUDED.email, phone = EXCLUDED.phone, \
             country = EXCLUDED.country, is_verified = EXCLUDED.is_verified \
             WHERE users.email IS NULL AND EXCLUDED.email IS NOT NULL",
        )
        .bind(&user.user_id)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.country)
        .bind(user.is_verified)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, format!("user {}", user.user_id)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::DuplicateKey(format!("user {}", user.user_id)));
        }
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE user_id = $1",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(User::from))
    }

    async fn ensure_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            "INSERT INTO users (user_id, country, created_at) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(&user.user_id)
        .bind(&user.country)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_users(&self, page: Page) -> Result<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users ORDER BY seq OFFSET $1 LIMIT $2",
            USER_COLUMNS
        ))
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn insert_offer(&self, offer: &Offer) -> Result<()> {
        sqlx::query(
            "INSERT INTO offers (offer_id, user_id, order_amount, status, amount_offered, \
             term_months, interest_rate, monthly_payment, reason, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(&offer.offer_id)
        .bind(&offer.user_id)
        .bind(offer.order_amount)
        .bind(offer.status.as_str())
        .bind(offer.amount_offered)
        .bind(offer.term_months)
        .bind(offer.interest_rate)
        .bind(offer.monthly_payment)
        .bind(&offer.reason)
        .bind(offer.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, format!("offer {}", offer.offer_id)))?;
        Ok(())
    }

    async fn get_offer(&self, offer_id: &str) -> Result<Option<Offer>> {
        let row: Option<OfferRow> = sqlx::query_as(&format!(
            "SELECT {} FROM offers WHERE offer_id = $1",
            OFFER_COLUMNS
        ))
        .bind(offer_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Offer::try_from).transpose()
    }

    async fn list_offers(&self, page: Page) -> Result<Vec<Offer>> {
        let rows: Vec<OfferRow> = sqlx::query_as(&format!(
            "SELECT {} FROM offers ORDER BY seq OFFSET $1 LIMIT $2",
            OFFER_COLUMNS
        ))
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Offer::try_from).collect()
    }

    async fn insert_transaction(&self, transaction: &Transaction) -> Result<()> {
        let result = sqlx::query(
            "INSERT INTO transactions (transaction_id, offer_id, user_id, amount, status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&transaction.transaction_id)
        .bind(&transaction.offer_id)
        .bind(&transaction.user_id)
        .bind(transaction.amount)
        .bind(transaction.status.as_str())
        .bind(transaction.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                Err(AppError::OfferNotFound(transaction.offer_id.clone()))
            }
            Err(e) => Err(map_write_error(
                e,
                format!("transaction {}", transaction.transaction_id),
            )),
        }
    }

    async fn list_transactions(&self, page: Page) -> Result<Vec<Transaction>> {
        let rows: Vec<TransactionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM transactions ORDER BY seq OFFSET $1 LIMIT $2",
            TRANSACTION_COLUMNS
        ))
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Transaction::try_from).collect()
    }

    async fn insert_fraud_check(&self, check: &FraudCheck) -> Result<()> {
        sqlx::query(
            "INSERT INTO fraud_checks (fraud_check_id, user_id, transaction_amount, fraud_score, \
             status, flags, action, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(&check.fraud_check_id)
        .bind(&check.user_id)
        .bind(check.transaction_amount)
        .bind(check.fraud_score)
        .bind(check.status.as_str())
        .bind(&check.flags)
        .bind(check.action.as_str())
        .bind(check.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, format!("fraud check {}", check.fraud_check_id)))?;
        Ok(())
    }

    async fn list_fraud_checks(&self, page: Page) -> Result<Vec<FraudCheck>> {
        let rows: Vec<FraudCheckRow> = sqlx::query_as(&format!(
            "SELECT {} FROM fraud_checks ORDER BY seq OFFSET $1 LIMIT $2",
            FRAUD_CHECK_COLUMNS
        ))
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(FraudCheck::try_from).collect()
    }

    async fn insert_admin(&self, admin: &AdminUser) -> Result<()> {
        sqlx::query(
            "INSERT INTO admin_users (admin_id, username, email, hashed_password, is_active, \
             created_at, last_login) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&admin.admin_id)
        .bind(&admin.username)
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(admin.is_active)
        .bind(admin.created_at)
        .bind(admin.last_login)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, format!("admin {}", admin.username)))?;
        Ok(())
    }

    async fn find_admin_by_username(&self, username: &str) -> Result<Option<AdminUser>> {
        let row: Option<AdminRow> = sqlx::query_as(&format!(
            "SELECT {} FROM admin_users WHERE username = $1",
            ADMIN_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(AdminUser::from))
    }

    async fn touch_admin_login(&self, admin_id: &str) -> Result<()> {
        let result = sqlx::query("UPDATE admin_users SET last_login = $1 WHERE admin_id = $2")
            .bind(Utc::now())
            .bind(admin_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::DocumentNotFound);
        }
        Ok(())
    }

    async fn summary(&self) -> Result<Summary> {
        let totals: TotalsRow = sqlx::query_as(
            "SELECT \
             (SELECT COUNT(*) FROM users) AS total_users, \
             (SELECT COUNT(*) FROM offers) AS total_offers, \
             (SELECT COUNT(*) FROM transactions) AS total_transactions, \
             (SELECT COUNT(*) FROM fraud_checks) AS total_fraud_checks, \
             (SELECT COALESCE(SUM(amount), 0)::float8 FROM transactions \
              WHERE status = 'completed') AS total_processed, \
             (SELECT COALESCE(AVG(fraud_score), 0)::float8 FROM fraud_checks) \
              AS average_fraud_score",
        )
        .fetch_one(&self.pool)
        .await?;

        let offer_status_counts: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM offers GROUP BY status")
                .fetch_all(&self.pool)
                .await?;
        let fraud_status_counts: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM fraud_checks GROUP BY status")
                .fetch_all(&self.pool)
                .await?;

        Ok(Summary {
            total_users: totals.total_users,
            total_offers: totals.total_offers,
            total_transactions: totals.total_transactions,
            total_fraud_checks: totals.total_fraud_checks,
            total_processed: totals.total_processed,
            offer_status_counts: offer_status_counts.into_iter().collect(),
            fraud_status_counts: fraud_status_counts.into_iter().collect(),
            average_fraud_score: totals.average_fraud_score,
        })
    }
}
