//! Outbound notification seam
//!
//! Delivery (email, push, ...) lives outside this core. Callers treat
//! notifications as fire-and-forget: a delivery failure is logged by the
//! originating service and never fails the operation that triggered it.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::core_types::{AccountId, CreditId, UserId};

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn account_opened(&self, user: UserId, account: AccountId) -> anyhow::Result<()>;

    async fn credit_issued(
        &self,
        user: UserId,
        credit: CreditId,
        amount: Decimal,
    ) -> anyhow::Result<()>;
}

/// Default implementation that only records deliveries in the log stream.
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn account_opened(&self, user: UserId, account: AccountId) -> anyhow::Result<()> {
        tracing::info!(user_id = %user, account_id = %account, "notify: account opened");
        Ok(())
    }

    async fn credit_issued(
        &self,
        user: UserId,
        credit: CreditId,
        amount: Decimal,
    ) -> anyhow::Result<()> {
        tracing::info!(user_id = %user, credit_id = %credit, %amount, "notify: credit issued");
        Ok(())
    }
}
