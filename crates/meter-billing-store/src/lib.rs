//! Ledger storage for meter-billing.
//!
//! This crate provides constraint-checked storage for customers and their
//! monthly meter usage.
//!
//! # Architecture
//!
//! Two tables are kept, each in its own `RocksDB` column family:
//!
//! - `customers`: customer records, keyed by meter number
//! - `usage`: monthly usage records, keyed by `(meter number, month)`
//!
//! Every write enforces primary-key uniqueness on both tables and referential
//! integrity from usage to customers. A rejected write leaves the store
//! untouched.
//!
//! # Example
//!
//! ```no_run
//! use meter_billing_store::{RocksStore, Store};
//! use meter_billing_core::{Customer, MeterNo};
//!
//! let store = RocksStore::open("/tmp/meter-billing-db").unwrap();
//!
//! // Create a customer
//! let meter: MeterNo = "M001".parse().unwrap();
//! let customer = Customer::new(meter.clone(), "Asha", "12 Lane", "a@x.com").unwrap();
//! store.add_customer(&customer).unwrap();
//!
//! // Record a month of usage
//! store.record_usage(&meter, &"2024-01".parse().unwrap(), 250).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod memory;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksStore;

use meter_billing_core::{BillingMonth, Customer, MeterNo, UsageRecord};

/// The storage trait defining all ledger operations.
///
/// This trait abstracts the storage layer, allowing for different implementations
/// (e.g., `RocksDB`, in-memory for testing).
pub trait Store: Send + Sync {
    // =========================================================================
    // Customer Operations
    // =========================================================================

    /// Insert a new customer.
    ///
    /// # Errors
    ///
    /// - `StoreError::DuplicateKey` if a customer with this meter number exists.
    /// - `StoreError::Database` if the database operation fails.
    fn add_customer(&self, customer: &Customer) -> Result<()>;

    /// Get a customer by meter number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_customer(&self, meter_no: &MeterNo) -> Result<Option<Customer>>;

    // =========================================================================
    // Usage Operations
    // =========================================================================

    /// Record the units consumed by a meter in a month.
    ///
    /// Returns the stored record.
    ///
    /// # Errors
    ///
    /// - `StoreError::InvalidInput` if `units` is negative or out of range.
    /// - `StoreError::UnknownCustomer` if no customer owns `meter_no`.
    /// - `StoreError::DuplicateKey` if usage for `(meter_no, month)` exists.
    fn record_usage(&self, meter_no: &MeterNo, month: &BillingMonth, units: i64)
        -> Result<UsageRecord>;

    /// Get the usage record for a meter and month.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_usage(&self, meter_no: &MeterNo, month: &BillingMonth) -> Result<Option<UsageRecord>>;

    /// List all usage records of a meter, ordered by month key.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_usage(&self, meter_no: &MeterNo) -> Result<Vec<UsageRecord>>;
}
