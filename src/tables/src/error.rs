// astrars-tables/src/error.rs

//! Error types for the table codecs.

use thiserror::Error;

/// Result type alias for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors raised by the table codecs.
#[derive(Error, Debug)]
pub enum TableError {
    /// A particle row with the wrong column count or a non-numeric token.
    #[error("malformed particle row at line {line}: {reason}")]
    MalformedParticleRow { line: usize, reason: String },

    /// An emittance row with the wrong column count or a non-numeric token.
    #[error("malformed emittance row at line {line}: {reason}")]
    MalformedEmittanceRow { line: usize, reason: String },

    /// Columns of one table differ in length.
    #[error("table columns have unequal lengths: {0}")]
    LengthMismatch(String),

    /// I/O fault while reading or writing a table file.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
