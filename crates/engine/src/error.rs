//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when a referenced participant or group is not found.
//! - [`InvalidExpense`] thrown when an [`Expense`] breaks a split invariant.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidExpense`]: EngineError::InvalidExpense
//!  [`Expense`]: super::expenses::Expense
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid expense: {0}")]
    InvalidExpense(String),
    #[error("Invalid group: {0}")]
    InvalidGroup(String),
    #[error("Invalid settlement: {0}")]
    InvalidSettlement(String),
    #[error("Currency mismatch: {0}")]
    CurrencyMismatch(String),
}
