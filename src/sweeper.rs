//! Overdue Sweeper
//!
//! Periodic background task that settles or penalizes overdue
//! installments. `run_pass` takes the current time as a parameter and can
//! be driven directly in tests; `spawn` puts it on a timer.
//!
//! Each entry is processed independently: a failure on one is logged and
//! the pass moves on. Settlement reuses the same atomic debit primitive
//! as the Transfer Engine, so the sweep is safe against concurrent
//! transfers on the same account.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::core_types::AccountId;
use crate::credit::models::ScheduleEntry;
use crate::credit::repository::{CreditRepository, ScheduleRepository};
use crate::error::BankError;
use crate::ledger::Ledger;

/// Penalty is 1% of the installment, accrued once per entry.
const PENALTY_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 2); // 0.01

/// Outcome counters of one sweep pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepSummary {
    pub scanned: usize,
    pub settled: usize,
    pub penalized: usize,
    pub skipped: usize,
    pub failed: usize,
}

enum Outcome {
    Settled,
    Penalized,
    Skipped,
}

pub struct OverdueSweeper {
    pool: PgPool,
    period: Duration,
}

impl OverdueSweeper {
    pub fn new(pool: PgPool, period: Duration) -> Self {
        Self { pool, period }
    }

    /// Run one sweep over everything due before `now`.
    pub async fn run_pass(&self, now: DateTime<Utc>) -> SweepSummary {
        let mut summary = SweepSummary::default();

        let overdue = match ScheduleRepository::list_overdue(&self.pool, now).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!("Failed to list overdue payments: {}", e);
                summary.failed += 1;
                return summary;
            }
        };

        summary.scanned = overdue.len();

        for entry in &overdue {
            match self.process_entry(entry, now).await {
                Ok(Outcome::Settled) => summary.settled += 1,
                Ok(Outcome::Penalized) => summary.penalized += 1,
                Ok(Outcome::Skipped) => summary.skipped += 1,
                Err(e) => {
                    // One bad row never aborts the pass.
                    tracing::error!(entry_id = %entry.id, "Sweep entry failed: {}", e);
                    summary.failed += 1;
                }
            }
        }

        summary
    }

    async fn process_entry(
        &self,
        entry: &ScheduleEntry,
        now: DateTime<Utc>,
    ) -> Result<Outcome, BankError> {
        let credit = CreditRepository::get_by_id(&self.pool, entry.credit_id)
            .await?
            .ok_or(BankError::CreditNotFound)?;

        let balance = Ledger::balance(&self.pool, credit.account_id).await?;

        if balance >= entry.amount {
            return self.settle(entry, credit.account_id, now).await;
        }

        if entry.penalty.is_zero() {
            let penalty = (entry.amount * PENALTY_RATE).round_dp(2);
            if ScheduleRepository::apply_penalty(&self.pool, entry.id, penalty).await? > 0 {
                tracing::warn!(
                    entry_id = %entry.id,
                    %penalty,
                    "Applied penalty for overdue payment"
                );
                return Ok(Outcome::Penalized);
            }
            // Lost the race to another pass.
            return Ok(Outcome::Skipped);
        }

        tracing::warn!(entry_id = %entry.id, "Payment still overdue; penalty already applied");
        Ok(Outcome::Skipped)
    }

    /// Debit the funding account and mark the entry paid, atomically.
    async fn settle(
        &self,
        entry: &ScheduleEntry,
        account: AccountId,
        now: DateTime<Utc>,
    ) -> Result<Outcome, BankError> {
        let mut tx = self.pool.begin().await?;

        match Ledger::debit(&mut *tx, account, entry.amount).await {
            Ok(()) => {}
            Err(BankError::InsufficientFunds) => {
                // A concurrent spender drained the account between the
                // balance read and the debit. Leave the entry for the
                // next pass.
                tx.rollback().await?;
                return Ok(Outcome::Skipped);
            }
            Err(e) => return Err(e),
        }

        if ScheduleRepository::mark_paid(&mut *tx, entry.id, now).await? == 0 {
            // Already settled concurrently; undo the debit.
            tx.rollback().await?;
            return Ok(Outcome::Skipped);
        }

        tx.commit().await?;
        tracing::info!(
            credit_id = %entry.credit_id,
            entry_id = %entry.id,
            amount = %entry.amount,
            account_id = %account,
            "Auto-paid credit installment"
        );
        Ok(Outcome::Settled)
    }

    /// Run the sweep forever on a fixed period. The first pass happens
    /// one full period after startup; a pass in flight always runs to
    /// completion before the task sleeps again.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.period);
            ticker.tick().await; // consume the immediate first tick
            loop {
                ticker.tick().await;
                let summary = self.run_pass(Utc::now()).await;
                tracing::info!(
                    scanned = summary.scanned,
                    settled = summary.settled,
                    penalized = summary.penalized,
                    skipped = summary.skipped,
                    failed = summary.failed,
                    "Overdue sweep finished"
                );
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penalty_rate_is_one_percent() {
        assert_eq!(PENALTY_RATE, Decimal::new(1, 2));
        let installment = Decimal::new(10_661_85, 2);
        assert_eq!(
            (installment * PENALTY_RATE).round_dp(2),
            Decimal::new(106_62, 2)
        );
    }
}
