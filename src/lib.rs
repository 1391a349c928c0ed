//! bankcore - Ledger and credit-scheduling core of a banking backend
//!
//! PostgreSQL is the single source of truth for money state; no balance
//! is ever cached in memory. Every balance-affecting operation runs
//! inside one database transaction with rollback on any error exit.
//!
//! # Modules
//!
//! - [`core_types`] - Opaque identifier types per entity
//! - [`ledger`] - Balance mutation primitives (debit/credit)
//! - [`transfer`] - Atomic two-account transfers with signed records
//! - [`credit`] - Credit origination and annuity schedules
//! - [`sweeper`] - Periodic overdue settlement/penalty pass
//! - [`analytics`] - Sent/received volume rollups
//! - [`account`] - Account opening and authorized balance reads
//! - [`signature`] - HMAC-SHA256 transaction integrity
//! - [`notify`] - Fire-and-forget notification seam

pub mod account;
pub mod analytics;
pub mod config;
pub mod core_types;
pub mod credit;
pub mod db;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod notify;
pub mod signature;
pub mod sweeper;
pub mod transfer;

// Convenient re-exports at crate root
pub use account::{Account, AccountService};
pub use analytics::{AnalyticsService, UserStats};
pub use config::AppConfig;
pub use core_types::{AccountId, CreditId, ScheduleEntryId, TransactionId, UserId};
pub use credit::{Credit, CreditService, ScheduleEntry};
pub use db::Database;
pub use error::BankError;
pub use ledger::Ledger;
pub use notify::{Notifier, TracingNotifier};
pub use signature::TransactionSigner;
pub use sweeper::{OverdueSweeper, SweepSummary};
pub use transfer::{Transaction, TransferService};
