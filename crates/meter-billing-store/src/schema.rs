//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Customer records, keyed by meter number.
    pub const CUSTOMERS: &str = "customers";

    /// Monthly usage records, keyed by `len(meter_no) || meter_no || month`.
    pub const USAGE: &str = "usage";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::CUSTOMERS, cf::USAGE]
}
