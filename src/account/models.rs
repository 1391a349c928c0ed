//! Account data model

use rust_decimal::Decimal;
use serde::Serialize;

use crate::core_types::{AccountId, UserId};

/// A user-owned account. The balance is only ever mutated through the
/// Ledger primitives and is non-negative by invariant.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Account {
    pub id: AccountId,
    pub user_id: UserId,
    pub balance: Decimal,
}
