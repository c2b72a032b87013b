//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidAmount`] thrown when an amount is zero, negative or malformed.
//! - [`InvalidKind`] thrown when a stored kind is neither income nor expense.
//! - [`InvalidText`] thrown when a category or description breaks its bounds.
//! - [`InvalidWindow`] thrown when a lookback window reaches before the
//!   representable time range.
//! - [`Overflow`] thrown when a total does not fit in `i64` cents.
//! - [`Database`] wraps every storage failure.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidKind`]: EngineError::InvalidKind
//!  [`InvalidText`]: EngineError::InvalidText
//!  [`InvalidWindow`]: EngineError::InvalidWindow
//!  [`Overflow`]: EngineError::Overflow
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid transaction kind: {0}")]
    InvalidKind(String),
    #[error("Invalid text: {0}")]
    InvalidText(String),
    #[error("Invalid window of {0} days")]
    InvalidWindow(u32),
    #[error("Totals are too large to compute: {0}")]
    Overflow(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Returns `true` when the error comes from the storage layer rather
    /// than from user input.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidKind(a), Self::InvalidKind(b)) => a == b,
            (Self::InvalidText(a), Self::InvalidText(b)) => a == b,
            (Self::InvalidWindow(a), Self::InvalidWindow(b)) => a == b,
            (Self::Overflow(a), Self::Overflow(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
