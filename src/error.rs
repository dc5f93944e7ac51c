//! Error taxonomy.
//!
//! Configuration errors fail fast at the call site; property-lookup misses
//! are recovered locally by the caller (skip and log), never fatal.

use thiserror::Error;

/// Result type for relay-ui operations.
pub type Result<T> = std::result::Result<T, UiError>;

/// Errors surfaced by the composition layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UiError {
    /// Grid cell indices outside the configured dimensions.
    #[error("grid index ({row}, {col}) out of bounds for a {rows}x{cols} grid")]
    GridIndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// A list item template that does not support `copy()`.
    #[error("list item template '{0}' does not support copying")]
    TemplateNotCopyable(&'static str),

    /// A property name with no entry in the target's accessor table.
    #[error("unknown property '{property}' on {target}")]
    UnknownProperty {
        target: &'static str,
        property: String,
    },

    /// A property value of the wrong type for the named property.
    #[error("property '{property}' on {target} expects {expected}, got {got}")]
    PropertyType {
        target: &'static str,
        property: String,
        expected: &'static str,
        got: &'static str,
    },
}
