// astrars-namelist/src/error.rs

//! Error types for field resolution and namelist rendering.

use thiserror::Error;

/// Result type alias for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Errors raised while resolving raw input into a field model or while
/// rendering a model to namelist text. All of these are caller-fixable and
/// never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// A field with neither a default nor a supplied value.
    #[error("missing required field `{field}`")]
    MissingRequiredField { field: &'static str },

    /// The same field was supplied under both its internal name and its
    /// public alias. Last-defined-wins would be silent data loss, so this
    /// is rejected outright.
    #[error("field `{field}` was supplied under both its name and its alias `{alias}`")]
    DuplicateField {
        field: &'static str,
        alias: &'static str,
    },

    /// A token that matches none of the accepted spellings of a closed
    /// enumeration.
    #[error("invalid value `{token}` for field `{field}`; accepted tokens: {accepted}")]
    InvalidEnumValue {
        field: &'static str,
        token: String,
        accepted: String,
    },

    /// A supplied value of the wrong kind (e.g. a string where an integer
    /// is expected).
    #[error("field `{field}` expects {expected}, got {got}")]
    InvalidFieldValue {
        field: &'static str,
        expected: &'static str,
        got: &'static str,
    },

    /// A value whose rendered form would corrupt the group structure
    /// (embedded quote, control character, non-finite number).
    #[error("field `{field}` cannot be rendered: {reason}")]
    UnrenderableValue { field: String, reason: &'static str },
}
