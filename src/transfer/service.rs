//! Transfer execution
//!
//! Validation happens before any mutation; the debit, the credit and the
//! transaction-log insert then run inside a single database transaction.
//! Any failure after the debit rolls all three back, so a partial
//! transfer is never visible.

use rust_decimal::Decimal;
use sqlx::PgPool;

use super::models::Transaction;
use crate::account::AccountRepository;
use crate::core_types::{AccountId, TransactionId, UserId};
use crate::error::BankError;
use crate::ledger::Ledger;
use crate::signature::TransactionSigner;

pub struct TransferService {
    pool: PgPool,
    signer: TransactionSigner,
}

impl TransferService {
    pub fn new(pool: PgPool, signer: TransactionSigner) -> Self {
        Self { pool, signer }
    }

    /// Move `amount` from `from` to `to` on behalf of `user`.
    ///
    /// The caller must own the source account. The destination only has
    /// to exist: any account may receive funds from anyone, which is a
    /// product decision, not a missing check.
    pub async fn transfer(
        &self,
        user: UserId,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<TransactionId, BankError> {
        if amount <= Decimal::ZERO {
            return Err(BankError::InvalidAmount);
        }

        let source = AccountRepository::get_by_id(&self.pool, from)
            .await?
            .ok_or(BankError::SourceAccountNotFound)?;

        if source.user_id != user {
            return Err(BankError::Forbidden);
        }

        if AccountRepository::get_by_id(&self.pool, to).await?.is_none() {
            return Err(BankError::DestinationAccountNotFound);
        }

        // Early rejection on a stale read; the debit below re-checks
        // atomically, so a concurrent spender cannot slip past this.
        if source.balance < amount {
            return Err(BankError::InsufficientFunds);
        }

        // One atomic unit. Every `?` below drops the transaction, which
        // rolls back all prior statements.
        let mut tx = self.pool.begin().await?;

        Ledger::debit(&mut *tx, from, amount).await?;
        Ledger::credit(&mut *tx, to, amount).await?;

        let signature = self.signer.sign(from, to, amount);
        let id = sqlx::query_scalar::<_, TransactionId>(
            r#"INSERT INTO transactions (from_account, to_account, amount, signature)
               VALUES ($1, $2, $3, $4) RETURNING id"#,
        )
        .bind(from)
        .bind(to)
        .bind(amount)
        .bind(&signature)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            transaction_id = %id,
            from = %from,
            to = %to,
            %amount,
            "Transfer committed"
        );

        Ok(id)
    }

    /// Fetch a transaction record from the log.
    pub async fn get(&self, id: TransactionId) -> Result<Option<Transaction>, BankError> {
        let record = sqlx::query_as::<_, Transaction>(
            r#"SELECT id, from_account, to_account, amount, created_at, signature
               FROM transactions WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Recompute a record's signature from its own fields.
    ///
    /// A mismatch means the row was altered outside this system.
    pub fn verify(&self, record: &Transaction) -> bool {
        self.signer.verify(
            record.from_account,
            record.to_account,
            record.amount,
            &record.signature,
        )
    }
}
