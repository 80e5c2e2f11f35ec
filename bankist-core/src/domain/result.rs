//! Result and error types for the core library

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User id already taken: {0}")]
    DuplicateUserId(String),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Session expired, log in to get started")]
    SessionExpired,

    #[error("Transfer rejected: {0}")]
    TransferRejected(String),

    #[error("Loan rejected: requested {requested}, limit {}", describe_limit(.limit))]
    LoanRejected {
        requested: Decimal,
        limit: Option<Decimal>,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a not found error
    pub fn not_found(user_id: impl Into<String>) -> Self {
        Self::AccountNotFound(user_id.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a rejected transfer error
    pub fn transfer_rejected(reason: impl Into<String>) -> Self {
        Self::TransferRejected(reason.into())
    }

    /// True for rejections caused by user input, as opposed to internal failures.
    /// These leave all state untouched.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::AccountNotFound(_)
                | Self::InvalidCredentials
                | Self::TransferRejected(_)
                | Self::LoanRejected { .. }
                | Self::Validation(_)
        )
    }
}

fn describe_limit(limit: &Option<Decimal>) -> String {
    limit
        .map(|l| l.to_string())
        .unwrap_or_else(|| "none".to_string())
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Operation result (for JSON output)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> OperationResult<T> {
    /// Create a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create a failed result
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

impl<T> From<Result<T>> for OperationResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::fail(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_result_ok() {
        let result: OperationResult<i32> = OperationResult::ok(42);
        assert!(result.success);
        assert_eq!(result.data, Some(42));
        assert!(result.error.is_none());
    }

    #[test]
    fn test_from_result() {
        let ok: Result<i32> = Ok(42);
        let result: OperationResult<i32> = ok.into();
        assert!(result.success);

        let err: Result<i32> = Err(Error::not_found("zz"));
        let result: OperationResult<i32> = err.into();
        assert!(!result.success);
        assert_eq!(result.error.unwrap(), "Account not found: zz");
    }

    #[test]
    fn test_operation_result_json() {
        let result: OperationResult<u32> = Err(Error::SessionExpired).into();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["data"].is_null());
        assert_eq!(json["error"], "Session expired, log in to get started");
    }

    #[test]
    fn test_loan_rejected_message() {
        let err = Error::LoanRejected {
            requested: Decimal::new(250001, 2),
            limit: Some(Decimal::new(2500, 0)),
        };
        assert_eq!(err.to_string(), "Loan rejected: requested 2500.01, limit 2500");

        let err = Error::LoanRejected {
            requested: Decimal::ONE,
            limit: None,
        };
        assert!(err.to_string().ends_with("limit none"));
        assert!(err.is_rejection());
        assert!(!Error::NotLoggedIn.is_rejection());
    }
}
