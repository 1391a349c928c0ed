//! Error types for ledger and credit operations
//!
//! A closed taxonomy: validation and authorization failures are detected
//! before any mutation; `Storage` always means the whole atomic unit was
//! rolled back.

use thiserror::Error;

/// Bank core error types
#[derive(Error, Debug, Clone)]
pub enum BankError {
    #[error("Account not found")]
    AccountNotFound,

    #[error("Source account not found")]
    SourceAccountNotFound,

    #[error("Destination account not found")]
    DestinationAccountNotFound,

    #[error("Credit not found")]
    CreditNotFound,

    #[error("Resource is not owned by the caller")]
    Forbidden,

    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Schedule parameters produce no valid annuity")]
    InvalidScheduleParameters,

    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("Storage failure: {0}")]
    Storage(String),
}

impl BankError {
    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            BankError::AccountNotFound => "ACCOUNT_NOT_FOUND",
            BankError::SourceAccountNotFound => "SOURCE_ACCOUNT_NOT_FOUND",
            BankError::DestinationAccountNotFound => "DESTINATION_ACCOUNT_NOT_FOUND",
            BankError::CreditNotFound => "CREDIT_NOT_FOUND",
            BankError::Forbidden => "FORBIDDEN",
            BankError::InvalidAmount => "INVALID_AMOUNT",
            BankError::InvalidScheduleParameters => "INVALID_SCHEDULE_PARAMETERS",
            BankError::InsufficientFunds => "INSUFFICIENT_FUNDS",
            BankError::Storage(_) => "STORAGE_FAILURE",
        }
    }

    /// HTTP status code suggestion for the request layer
    pub fn http_status(&self) -> u16 {
        match self {
            BankError::AccountNotFound
            | BankError::SourceAccountNotFound
            | BankError::DestinationAccountNotFound
            | BankError::CreditNotFound => 404,
            BankError::Forbidden => 403,
            BankError::InvalidAmount | BankError::InvalidScheduleParameters => 400,
            BankError::InsufficientFunds => 422,
            BankError::Storage(_) => 500,
        }
    }
}

impl From<sqlx::Error> for BankError {
    fn from(e: sqlx::Error) -> Self {
        BankError::Storage(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(BankError::InsufficientFunds.code(), "INSUFFICIENT_FUNDS");
        assert_eq!(BankError::Forbidden.code(), "FORBIDDEN");
        assert_eq!(
            BankError::InvalidScheduleParameters.code(),
            "INVALID_SCHEDULE_PARAMETERS"
        );
    }

    #[test]
    fn test_http_status() {
        assert_eq!(BankError::Forbidden.http_status(), 403);
        assert_eq!(BankError::InvalidAmount.http_status(), 400);
        assert_eq!(BankError::InsufficientFunds.http_status(), 422);
        assert_eq!(BankError::SourceAccountNotFound.http_status(), 404);
        assert_eq!(BankError::Storage("boom".into()).http_status(), 500);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            BankError::InsufficientFunds.to_string(),
            "Insufficient funds"
        );
    }
}
