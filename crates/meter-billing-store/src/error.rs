//! Error types for meter-billing storage.

use meter_billing_core::BillingError;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A write would violate a primary-key uniqueness constraint.
    #[error("duplicate key in {table}: {key}")]
    DuplicateKey {
        /// The table that already holds the key.
        table: &'static str,
        /// The rejected key.
        key: String,
    },

    /// A usage write references a meter with no customer.
    #[error("unknown customer: {meter_no}")]
    UnknownCustomer {
        /// The meter number that was not found.
        meter_no: String,
    },

    /// Malformed input was rejected before any write.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<BillingError> for StoreError {
    fn from(err: BillingError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
