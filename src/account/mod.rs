//! Account management module

pub mod models;
pub mod repository;
pub mod service;

pub use models::Account;
pub use repository::AccountRepository;
pub use service::AccountService;
