//! Analytics Aggregator
//!
//! Read-only rollup of a user's sent/received transaction volume. One
//! aggregate query over the transaction log joined to the user's accounts
//! on both sides; a user with no history gets zeros, not an error.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use crate::core_types::UserId;
use crate::error::BankError;

#[derive(Debug, Clone, Default, Serialize, sqlx::FromRow)]
pub struct UserStats {
    pub sent_count: i64,
    pub sent_total: Decimal,
    pub received_count: i64,
    pub received_total: Decimal,
}

pub struct AnalyticsService {
    pool: PgPool,
}

impl AnalyticsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn user_stats(&self, user: UserId) -> Result<UserStats, BankError> {
        let stats = sqlx::query_as::<_, UserStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM transactions t
                    JOIN accounts a ON t.from_account = a.id
                    WHERE a.user_id = $1) AS sent_count,
                COALESCE((SELECT SUM(t.amount) FROM transactions t
                    JOIN accounts a ON t.from_account = a.id
                    WHERE a.user_id = $1), 0) AS sent_total,
                (SELECT COUNT(*) FROM transactions t
                    JOIN accounts b ON t.to_account = b.id
                    WHERE b.user_id = $1) AS received_count,
                COALESCE((SELECT SUM(t.amount) FROM transactions t
                    JOIN accounts b ON t.to_account = b.id
                    WHERE b.user_id = $1), 0) AS received_total
            "#,
        )
        .bind(user)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
