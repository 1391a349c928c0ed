//! Repository layer for credits and payment schedules

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use super::models::{Credit, ScheduleEntry};
use crate::core_types::{AccountId, CreditId, ScheduleEntryId};

const SCHEDULE_COLUMNS: &str = "id, credit_id, due_date, amount, paid, paid_date, penalty";

pub struct CreditRepository;

impl CreditRepository {
    /// Insert a credit row. Runs on a connection so origination can hold
    /// it inside the same transaction as the funding credit.
    pub async fn create(
        conn: &mut PgConnection,
        account_id: AccountId,
        amount: Decimal,
        interest_rate: Decimal,
        term_months: i32,
        start_date: DateTime<Utc>,
    ) -> Result<Credit, sqlx::Error> {
        sqlx::query_as::<_, Credit>(
            r#"INSERT INTO credits (account_id, amount, interest_rate, term_months, start_date)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, account_id, amount, interest_rate, term_months, start_date"#,
        )
        .bind(account_id)
        .bind(amount)
        .bind(interest_rate)
        .bind(term_months)
        .bind(start_date)
        .fetch_one(conn)
        .await
    }

    /// Get credit by ID
    pub async fn get_by_id(
        pool: &PgPool,
        credit_id: CreditId,
    ) -> Result<Option<Credit>, sqlx::Error> {
        sqlx::query_as::<_, Credit>(
            r#"SELECT id, account_id, amount, interest_rate, term_months, start_date
               FROM credits WHERE id = $1"#,
        )
        .bind(credit_id)
        .fetch_optional(pool)
        .await
    }
}

pub struct ScheduleRepository;

impl ScheduleRepository {
    /// Insert the full batch of installments for a credit. The caller
    /// holds the surrounding transaction, so either every row lands or
    /// none does.
    pub async fn insert_batch(
        conn: &mut PgConnection,
        credit_id: CreditId,
        due_dates: &[DateTime<Utc>],
        installment: Decimal,
    ) -> Result<(), sqlx::Error> {
        for due in due_dates {
            sqlx::query(
                r#"INSERT INTO payment_schedules (credit_id, due_date, amount, paid, penalty)
                   VALUES ($1, $2, $3, FALSE, 0)"#,
            )
            .bind(credit_id)
            .bind(*due)
            .bind(installment)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    /// All installments of one credit, earliest first.
    pub async fn list_for_credit(
        pool: &PgPool,
        credit_id: CreditId,
    ) -> Result<Vec<ScheduleEntry>, sqlx::Error> {
        sqlx::query_as::<_, ScheduleEntry>(&format!(
            "SELECT {SCHEDULE_COLUMNS} FROM payment_schedules WHERE credit_id = $1 ORDER BY due_date",
        ))
        .bind(credit_id)
        .fetch_all(pool)
        .await
    }

    /// Unpaid installments that were due before `now`.
    pub async fn list_overdue(
        pool: &PgPool,
        now: DateTime<Utc>,
    ) -> Result<Vec<ScheduleEntry>, sqlx::Error> {
        sqlx::query_as::<_, ScheduleEntry>(&format!(
            "SELECT {SCHEDULE_COLUMNS} FROM payment_schedules WHERE paid = FALSE AND due_date < $1",
        ))
        .bind(now)
        .fetch_all(pool)
        .await
    }

    /// Flip an entry to paid, guarded so it can only ever happen once.
    /// Returns the number of rows affected: 0 means the entry was already
    /// settled by someone else.
    pub async fn mark_paid(
        conn: &mut PgConnection,
        entry: ScheduleEntryId,
        paid_date: DateTime<Utc>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"UPDATE payment_schedules SET paid = TRUE, paid_date = $1
               WHERE id = $2 AND paid = FALSE"#,
        )
        .bind(paid_date)
        .bind(entry)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Accrue a late penalty, guarded so re-accrual is blocked once a
    /// penalty exists. Returns rows affected (0 = already penalized).
    pub async fn apply_penalty(
        pool: &PgPool,
        entry: ScheduleEntryId,
        penalty: Decimal,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"UPDATE payment_schedules SET penalty = $1
               WHERE id = $2 AND penalty = 0 AND paid = FALSE"#,
        )
        .bind(penalty)
        .bind(entry)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
