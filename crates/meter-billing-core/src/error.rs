//! Error types for meter-billing.

use crate::ids::IdError;

/// Result type for meter-billing domain operations.
pub type Result<T> = std::result::Result<T, BillingError>;

/// Errors raised while building domain values from raw input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BillingError {
    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),

    /// A text field exceeds its column width.
    #[error("{field} is {len} characters long, maximum is {max}")]
    FieldTooLong {
        /// The offending field.
        field: &'static str,
        /// Length of the rejected value.
        len: usize,
        /// Maximum allowed length.
        max: usize,
    },

    /// A unit count is outside the range a meter can report.
    #[error("invalid unit count: {0}")]
    InvalidUnits(i64),
}
