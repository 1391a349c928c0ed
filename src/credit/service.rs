//! Credit origination and schedule reads

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::models::{Credit, ScheduleEntry};
use super::repository::{CreditRepository, ScheduleRepository};
use super::schedule;
use crate::account::AccountRepository;
use crate::core_types::{AccountId, CreditId, UserId};
use crate::error::BankError;
use crate::ledger::Ledger;
use crate::notify::Notifier;

pub struct CreditService {
    pool: PgPool,
    notifier: Arc<dyn Notifier>,
}

impl CreditService {
    pub fn new(pool: PgPool, notifier: Arc<dyn Notifier>) -> Self {
        Self { pool, notifier }
    }

    /// Originate a credit against an account the caller owns.
    ///
    /// The annuity is validated before anything is written. The credit
    /// row, the principal funding and the full schedule batch then land
    /// in one transaction; a failure anywhere rolls everything back and
    /// nothing of the credit is visible.
    pub async fn create_credit(
        &self,
        user: UserId,
        account: AccountId,
        principal: Decimal,
        annual_rate_percent: Decimal,
        term_months: u32,
    ) -> Result<Credit, BankError> {
        let acc = AccountRepository::get_by_id(&self.pool, account)
            .await?
            .ok_or(BankError::AccountNotFound)?;

        if acc.user_id != user {
            return Err(BankError::Forbidden);
        }

        let installment = schedule::annuity_payment(principal, annual_rate_percent, term_months)?;
        let start_date = Utc::now();
        let dates = schedule::due_dates(start_date, term_months)?;

        let mut tx = self.pool.begin().await?;

        let credit = CreditRepository::create(
            &mut *tx,
            account,
            principal,
            annual_rate_percent,
            term_months as i32,
            start_date,
        )
        .await?;
        Ledger::credit(&mut *tx, account, principal).await?;
        ScheduleRepository::insert_batch(&mut *tx, credit.id, &dates, installment).await?;

        tx.commit().await?;

        tracing::info!(
            credit_id = %credit.id,
            account_id = %account,
            %principal,
            term_months,
            %installment,
            "Credit originated"
        );

        if let Err(e) = self.notifier.credit_issued(user, credit.id, principal).await {
            tracing::warn!(credit_id = %credit.id, "Credit notification failed: {}", e);
        }

        Ok(credit)
    }

    /// Return the payment schedule of a credit the caller owns.
    pub async fn payment_schedule(
        &self,
        user: UserId,
        credit: CreditId,
    ) -> Result<Vec<ScheduleEntry>, BankError> {
        let cred = CreditRepository::get_by_id(&self.pool, credit)
            .await?
            .ok_or(BankError::CreditNotFound)?;

        let acc = AccountRepository::get_by_id(&self.pool, cred.account_id)
            .await?
            .ok_or(BankError::AccountNotFound)?;

        if acc.user_id != user {
            return Err(BankError::Forbidden);
        }

        Ok(ScheduleRepository::list_for_credit(&self.pool, credit).await?)
    }
}
