//! Account opening and authorized balance reads

use std::sync::Arc;

use rust_decimal::Decimal;
use sqlx::PgPool;

use super::models::Account;
use super::repository::AccountRepository;
use crate::core_types::{AccountId, UserId};
use crate::error::BankError;
use crate::notify::Notifier;

pub struct AccountService {
    pool: PgPool,
    notifier: Arc<dyn Notifier>,
}

impl AccountService {
    pub fn new(pool: PgPool, notifier: Arc<dyn Notifier>) -> Self {
        Self { pool, notifier }
    }

    /// Open a new account for the caller.
    ///
    /// The welcome notification is fire-and-forget: the account exists
    /// whether or not delivery succeeds.
    pub async fn create_account(&self, user: UserId) -> Result<Account, BankError> {
        let account = AccountRepository::create(&self.pool, user).await?;
        tracing::info!(account_id = %account.id, user_id = %user, "Account created");

        if let Err(e) = self.notifier.account_opened(user, account.id).await {
            tracing::warn!(account_id = %account.id, "Welcome notification failed: {}", e);
        }

        Ok(account)
    }

    /// Read the balance of an account the caller owns.
    pub async fn balance(&self, user: UserId, account: AccountId) -> Result<Decimal, BankError> {
        let acc = AccountRepository::get_by_id(&self.pool, account)
            .await?
            .ok_or(BankError::AccountNotFound)?;

        if acc.user_id != user {
            return Err(BankError::Forbidden);
        }

        Ok(acc.balance)
    }
}
