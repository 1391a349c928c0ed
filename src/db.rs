//! Database connection management and schema
//!
//! PostgreSQL is the single source of truth for all money state. The
//! schema is created idempotently at startup.

use anyhow::Result;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::DatabaseConfig;

/// PostgreSQL database connection pool
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(&config.url)
            .await?;

        tracing::info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Initialize the ledger schema
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    tracing::info!("Initializing ledger schema...");

    for (name, ddl) in [
        ("accounts", CREATE_ACCOUNTS_TABLE),
        ("transactions", CREATE_TRANSACTIONS_TABLE),
        ("credits", CREATE_CREDITS_TABLE),
        ("payment_schedules", CREATE_PAYMENT_SCHEDULES_TABLE),
        ("overdue index", CREATE_OVERDUE_INDEX),
    ] {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {}", name, e))?;
    }

    tracing::info!("Ledger schema initialized successfully");
    Ok(())
}

// Balance is NUMERIC with a non-negative CHECK; the debit statement never
// relies on the constraint, it is a last line of defense only.
const CREATE_ACCOUNTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    id      UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL,
    balance NUMERIC(20, 2) NOT NULL DEFAULT 0 CHECK (balance >= 0)
)
"#;

// Append-only: rows are never updated or deleted.
const CREATE_TRANSACTIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS transactions (
    id           UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    from_account UUID NOT NULL REFERENCES accounts(id),
    to_account   UUID NOT NULL REFERENCES accounts(id),
    amount       NUMERIC(20, 2) NOT NULL CHECK (amount > 0),
    created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    signature    TEXT NOT NULL
)
"#;

const CREATE_CREDITS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS credits (
    id            UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    account_id    UUID NOT NULL REFERENCES accounts(id),
    amount        NUMERIC(20, 2) NOT NULL,
    interest_rate NUMERIC(8, 4) NOT NULL,
    term_months   INT NOT NULL,
    start_date    TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_PAYMENT_SCHEDULES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS payment_schedules (
    id        UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    credit_id UUID NOT NULL REFERENCES credits(id),
    due_date  TIMESTAMPTZ NOT NULL,
    amount    NUMERIC(20, 2) NOT NULL,
    paid      BOOLEAN NOT NULL DEFAULT FALSE,
    paid_date TIMESTAMPTZ,
    penalty   NUMERIC(20, 2) NOT NULL DEFAULT 0
)
"#;

// The sweep only ever scans unpaid entries, so a partial index keeps it
// cheap no matter how much history accumulates.
const CREATE_OVERDUE_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_payment_schedules_unpaid
    ON payment_schedules (due_date) WHERE paid = FALSE
"#;
