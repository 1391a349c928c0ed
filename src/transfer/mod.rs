//! Transfer Engine
//!
//! Moves money between two accounts as one atomic unit and appends a
//! signed, immutable transaction record.

pub mod models;
pub mod service;

pub use models::Transaction;
pub use service::TransferService;
