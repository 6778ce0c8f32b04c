//! Core error type.

use thiserror::Error;

/// Errors raised by the core types and by state validation.
///
/// Wrong codes and lockout are not errors; they are ordinary outcomes of
/// verification.
#[derive(Error, Debug)]
pub enum Error {
    // Code errors
    #[error("Access code must be {expected} symbols, got {actual}")]
    InvalidCodeLength { expected: usize, actual: usize },

    // Display errors
    #[error("Display position ({column}, {row}) outside {columns}x{rows} grid")]
    InvalidPosition {
        column: usize,
        row: usize,
        columns: usize,
        rows: usize,
    },

    // State errors
    #[error("Invalid phase transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
