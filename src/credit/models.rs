//! Credit and payment schedule models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core_types::{AccountId, CreditId, ScheduleEntryId};

/// A credit issued against a funding account. Immutable after origination.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Credit {
    pub id: CreditId,
    pub account_id: AccountId,
    pub amount: Decimal,
    pub interest_rate: Decimal,
    pub term_months: i32,
    pub start_date: DateTime<Utc>,
}

/// One monthly installment of a credit.
///
/// `paid` flips false -> true exactly once; `penalty` starts at zero and
/// is accrued at most once while the entry stays unpaid.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ScheduleEntry {
    pub id: ScheduleEntryId,
    pub credit_id: CreditId,
    pub due_date: DateTime<Utc>,
    pub amount: Decimal,
    pub paid: bool,
    pub paid_date: Option<DateTime<Utc>>,
    pub penalty: Decimal,
}
