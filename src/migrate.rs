// migrate.rs
use sqlx::PgPool;

/// One table per entity. `seq` carries arrival order for listings.
const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS users (
        user_id     TEXT PRIMARY KEY,
        seq         BIGSERIAL NOT NULL,
        email       TEXT UNIQUE,
        phone       TEXT,
        country     TEXT NOT NULL,
        is_verified BOOLEAN NOT NULL DEFAULT FALSE,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS offers (
        offer_id        TEXT PRIMARY KEY,
        seq             BIGSERIAL NOT NULL,
        user_id         TEXT NOT NULL REFERENCES users (user_id),
        order_amount    DOUBLE PRECISION NOT NULL,
        status          TEXT NOT NULL,
        amount_offered  DOUBLE PRECISION NOT NULL,
        term_months     INTEGER NOT NULL,
        interest_rate   DOUBLE PRECISION NOT NULL,
        monthly_payment DOUBLE PRECISION NOT NULL,
        reason          TEXT NOT NULL,
        created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS transactions (
        transaction_id TEXT PRIMARY KEY,
        seq            BIGSERIAL NOT NULL,
        offer_id       TEXT NOT NULL REFERENCES offers (offer_id),
        user_id        TEXT NOT NULL REFERENCES users (user_id),
        amount         DOUBLE PRECISION NOT NULL,
        status         TEXT NOT NULL,
        payment_method TEXT,
        created_at     TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS fraud_checks (
        fraud_check_id     TEXT PRIMARY KEY,
        seq                BIGSERIAL NOT NULL,
        user_id            TEXT NOT NULL REFERENCES users (user_id),
        transaction_amount DOUBLE PRECISION NOT NULL,
        fraud_score        INTEGER NOT NULL CHECK (fraud_score BETWEEN 0 AND 100),
        status             TEXT NOT NULL,
        flags              TEXT[] NOT NULL DEFAULT '{}',
        action             TEXT NOT NULL,
        created_at         TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS admin_users (
        admin_id        TEXT PRIMARY KEY,
        username        TEXT NOT NULL UNIQUE,
        email           TEXT NOT NULL UNIQUE,
        hashed_password TEXT NOT NULL,
        is_active       BOOLEAN NOT NULL DEFAULT TRUE,
        created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        last_login      TIMESTAMPTZ
    )"#,
    "CREATE INDEX IF NOT EXISTS offers_user_id_idx ON offers (user_id)",
    "CREATE INDEX IF NOT EXISTS transactions_offer_id_idx ON transactions (offer_id)",
    "CREATE INDEX IF NOT EXISTS fraud_checks_user_id_idx ON fraud_checks (user_id)",
];

/// Creates any missing tables. Safe to run on every start.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Applying schema ({} statements)...", SCHEMA.len());

    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!("Schema up to date");
    Ok(())
}
