//! Credit Originator
//!
//! Creates a credit, funds the account with the principal and generates
//! the annuity payment schedule, all as one atomic unit.

pub mod models;
pub mod repository;
pub mod schedule;
pub mod service;

pub use models::{Credit, ScheduleEntry};
pub use repository::{CreditRepository, ScheduleRepository};
pub use service::CreditService;
