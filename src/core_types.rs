//! Core identifier types
//!
//! Every persisted entity gets its own opaque ID newtype so that an
//! `AccountId` can never be passed where a `CreditId` is expected.
//! All of them wrap a UUID, matching the `gen_random_uuid()` primary
//! keys in the schema.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated user identifier, resolved by the identity layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct UserId(Uuid);

/// Account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct AccountId(Uuid);

/// Transaction record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct TransactionId(Uuid);

/// Credit identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct CreditId(Uuid);

/// Payment schedule entry identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct ScheduleEntryId(Uuid);

macro_rules! id_impls {
    ($($name:ident),+) => {
        $(
            impl $name {
                /// Wrap an existing UUID.
                pub fn from_uuid(id: Uuid) -> Self {
                    Self(id)
                }

                /// Generate a fresh random identifier.
                pub fn new() -> Self {
                    Self(Uuid::new_v4())
                }

                /// Get the inner UUID value.
                pub fn as_uuid(&self) -> Uuid {
                    self.0
                }
            }

            impl Default for $name {
                fn default() -> Self {
                    Self::new()
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl FromStr for $name {
                type Err = uuid::Error;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Ok(Self(Uuid::from_str(s)?))
                }
            }
        )+
    };
}

id_impls!(UserId, AccountId, TransactionId, CreditId, ScheduleEntryId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_roundtrip() {
        let id = AccountId::new();
        let parsed: AccountId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(CreditId::new(), CreditId::new());
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!("not-a-uuid".parse::<UserId>().is_err());
    }
}
