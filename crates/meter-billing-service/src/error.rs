//! Service error types.

use meter_billing_core::{BillingError, IdError};
use meter_billing_store::StoreError;

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Service error type.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The ledger rejected or failed the operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Bad request - invalid input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A usage record exists without the customer that owns it.
    #[error("usage for {meter_no}/{month} has no customer record")]
    MissingCustomer {
        /// The meter on the usage record.
        meter_no: String,
        /// The billed month.
        month: String,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Reading input, writing output or preparing the data directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<BillingError> for ServiceError {
    fn from(err: BillingError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl From<IdError> for ServiceError {
    fn from(err: IdError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl ServiceError {
    /// Whether the console can report this error and keep going.
    ///
    /// Only I/O failures end the session; every other error affects the
    /// current command alone.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}
