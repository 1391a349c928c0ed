//! Account Ledger - balance mutation primitives
//!
//! Every balance change in the system goes through these two statements.
//! Both are relative adjustments ("balance = balance ± amount"), so the
//! row lock taken by PostgreSQL serializes concurrent updates without an
//! application-level retry loop. The debit carries its sufficiency check
//! in the same statement, which makes it race-free: two concurrent debits
//! can never both pass a stale balance check.
//!
//! The primitives take a `PgConnection` so they work the same on a plain
//! pooled connection and inside a `sqlx::Transaction`.

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use crate::core_types::AccountId;
use crate::error::BankError;

pub struct Ledger;

impl Ledger {
    /// Subtract `amount` from the account balance.
    ///
    /// Fails with `InsufficientFunds` when the balance does not cover the
    /// amount, checked atomically inside the UPDATE itself.
    pub async fn debit(
        conn: &mut PgConnection,
        account: AccountId,
        amount: Decimal,
    ) -> Result<(), BankError> {
        if amount <= Decimal::ZERO {
            return Err(BankError::InvalidAmount);
        }

        let result = sqlx::query(
            "UPDATE accounts SET balance = balance - $1 WHERE id = $2 AND balance >= $1",
        )
        .bind(amount)
        .bind(account)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            // Distinguish a missing account from a covered-check failure.
            let exists = sqlx::query_scalar::<_, Decimal>(
                "SELECT balance FROM accounts WHERE id = $1",
            )
            .bind(account)
            .fetch_optional(&mut *conn)
            .await?;

            return match exists {
                Some(_) => Err(BankError::InsufficientFunds),
                None => Err(BankError::AccountNotFound),
            };
        }

        Ok(())
    }

    /// Add `amount` to the account balance.
    pub async fn credit(
        conn: &mut PgConnection,
        account: AccountId,
        amount: Decimal,
    ) -> Result<(), BankError> {
        if amount <= Decimal::ZERO {
            return Err(BankError::InvalidAmount);
        }

        let result = sqlx::query("UPDATE accounts SET balance = balance + $1 WHERE id = $2")
            .bind(amount)
            .bind(account)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BankError::AccountNotFound);
        }

        Ok(())
    }

    /// Read the current balance.
    pub async fn balance(pool: &PgPool, account: AccountId) -> Result<Decimal, BankError> {
        sqlx::query_scalar::<_, Decimal>("SELECT balance FROM accounts WHERE id = $1")
            .bind(account)
            .fetch_optional(pool)
            .await?
            .ok_or(BankError::AccountNotFound)
    }
}
