//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, Direction, IteratorMode,
    MultiThreaded, Options, WriteBatch,
};

use meter_billing_core::{BillingMonth, Customer, MeterNo, UsageRecord};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// RocksDB-backed storage implementation.
///
/// Writes are serialized through a store-wide lock so that the constraint
/// checks and the write they guard happen as one step.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    write_lock: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Mutex::new(()),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    fn lock_writes(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| StoreError::Database("write lock poisoned".into()))
    }

    fn exists(&self, name: &str, key: &[u8]) -> Result<bool> {
        let cf = self.cf(name)?;
        let found = self
            .db
            .get_pinned_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .is_some();
        Ok(found)
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

impl Store for RocksStore {
    // =========================================================================
    // Customer Operations
    // =========================================================================

    fn add_customer(&self, customer: &Customer) -> Result<()> {
        let _guard = self.lock_writes()?;
        let key = keys::customer_key(&customer.meter_no);

        if self.exists(cf::CUSTOMERS, &key)? {
            tracing::warn!(meter_no = %customer.meter_no, "Rejected duplicate customer");
            return Err(StoreError::DuplicateKey {
                table: cf::CUSTOMERS,
                key: customer.meter_no.to_string(),
            });
        }

        let cf = self.cf(cf::CUSTOMERS)?;
        let value = Self::serialize(customer)?;

        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(meter_no = %customer.meter_no, "Customer stored");
        Ok(())
    }

    fn get_customer(&self, meter_no: &MeterNo) -> Result<Option<Customer>> {
        let cf = self.cf(cf::CUSTOMERS)?;
        let key = keys::customer_key(meter_no);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    // =========================================================================
    // Usage Operations
    // =========================================================================

    fn record_usage(
        &self,
        meter_no: &MeterNo,
        month: &BillingMonth,
        units: i64,
    ) -> Result<UsageRecord> {
        let record = UsageRecord::new(meter_no.clone(), month.clone(), units)?;

        let _guard = self.lock_writes()?;

        if !self.exists(cf::CUSTOMERS, &keys::customer_key(meter_no))? {
            tracing::warn!(meter_no = %meter_no, "Rejected usage for unknown customer");
            return Err(StoreError::UnknownCustomer {
                meter_no: meter_no.to_string(),
            });
        }

        let usage_key = keys::usage_key(meter_no, month);
        if self.exists(cf::USAGE, &usage_key)? {
            tracing::warn!(meter_no = %meter_no, month = %month, "Rejected duplicate usage");
            return Err(StoreError::DuplicateKey {
                table: cf::USAGE,
                key: format!("{meter_no}/{month}"),
            });
        }

        let cf_usage = self.cf(cf::USAGE)?;
        let value = Self::serialize(&record)?;

        // Write atomically
        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_usage, &usage_key, &value);

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(
            meter_no = %meter_no,
            month = %month,
            units = record.units_consumed,
            "Usage stored"
        );
        Ok(record)
    }

    fn get_usage(&self, meter_no: &MeterNo, month: &BillingMonth) -> Result<Option<UsageRecord>> {
        let cf = self.cf(cf::USAGE)?;
        let key = keys::usage_key(meter_no, month);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn list_usage(&self, meter_no: &MeterNo) -> Result<Vec<UsageRecord>> {
        let cf = self.cf(cf::USAGE)?;
        let prefix = keys::usage_prefix(meter_no);

        let iter = self
            .db
            .iterator_cf(&cf, IteratorMode::From(&prefix, Direction::Forward));

        let mut records = Vec::new();
        for item in iter {
            let (key, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            records.push(Self::deserialize(&value)?);
        }

        Ok(records)
    }
}
