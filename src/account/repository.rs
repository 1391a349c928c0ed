//! Repository layer for account rows

use sqlx::PgPool;

use super::models::Account;
use crate::core_types::{AccountId, UserId};

pub struct AccountRepository;

impl AccountRepository {
    /// Create a new account with zero balance
    pub async fn create(pool: &PgPool, user_id: UserId) -> Result<Account, sqlx::Error> {
        sqlx::query_as::<_, Account>(
            r#"INSERT INTO accounts (user_id, balance) VALUES ($1, 0)
               RETURNING id, user_id, balance"#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Get account by ID
    pub async fn get_by_id(
        pool: &PgPool,
        account_id: AccountId,
    ) -> Result<Option<Account>, sqlx::Error> {
        sqlx::query_as::<_, Account>(
            r#"SELECT id, user_id, balance FROM accounts WHERE id = $1"#,
        )
        .bind(account_id)
        .fetch_optional(pool)
        .await
    }
}
