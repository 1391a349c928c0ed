//! Transaction record model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core_types::{AccountId, TransactionId};

/// An immutable entry in the append-only transaction log.
///
/// The signature is an HMAC over the record's own fields; see
/// [`crate::signature::TransactionSigner`].
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Transaction {
    pub id: TransactionId,
    pub from_account: AccountId,
    pub to_account: AccountId,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub signature: String,
}
