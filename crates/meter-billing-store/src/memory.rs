//! In-memory storage implementation.
//!
//! Nothing is persisted; records live as long as the `MemoryStore`.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use meter_billing_core::{BillingMonth, Customer, MeterNo, UsageRecord};

use crate::error::{Result, StoreError};
use crate::schema::cf;
use crate::Store;

#[derive(Default)]
struct Tables {
    customers: HashMap<MeterNo, Customer>,
    usage: BTreeMap<(MeterNo, BillingMonth), UsageRecord>,
}

/// In-memory storage implementation.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Database("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Database("memory store lock poisoned".into()))
    }
}

impl Store for MemoryStore {
    fn add_customer(&self, customer: &Customer) -> Result<()> {
        let mut tables = self.write()?;

        if tables.customers.contains_key(&customer.meter_no) {
            tracing::warn!(meter_no = %customer.meter_no, "Rejected duplicate customer");
            return Err(StoreError::DuplicateKey {
                table: cf::CUSTOMERS,
                key: customer.meter_no.to_string(),
            });
        }

        tables
            .customers
            .insert(customer.meter_no.clone(), customer.clone());
        tracing::debug!(meter_no = %customer.meter_no, "Customer stored in memory");
        Ok(())
    }

    fn get_customer(&self, meter_no: &MeterNo) -> Result<Option<Customer>> {
        Ok(self.read()?.customers.get(meter_no).cloned())
    }

    fn record_usage(
        &self,
        meter_no: &MeterNo,
        month: &BillingMonth,
        units: i64,
    ) -> Result<UsageRecord> {
        let record = UsageRecord::new(meter_no.clone(), month.clone(), units)?;
        let mut tables = self.write()?;

        if !tables.customers.contains_key(meter_no) {
            tracing::warn!(meter_no = %meter_no, "Rejected usage for unknown customer");
            return Err(StoreError::UnknownCustomer {
                meter_no: meter_no.to_string(),
            });
        }

        let key = (meter_no.clone(), month.clone());
        if tables.usage.contains_key(&key) {
            tracing::warn!(meter_no = %meter_no, month = %month, "Rejected duplicate usage");
            return Err(StoreError::DuplicateKey {
                table: cf::USAGE,
                key: format!("{meter_no}/{month}"),
            });
        }

        tables.usage.insert(key, record.clone());
        tracing::debug!(meter_no = %meter_no, month = %month, "Usage stored in memory");
        Ok(record)
    }

    fn get_usage(&self, meter_no: &MeterNo, month: &BillingMonth) -> Result<Option<UsageRecord>> {
        let key = (meter_no.clone(), month.clone());
        Ok(self.read()?.usage.get(&key).cloned())
    }

    fn list_usage(&self, meter_no: &MeterNo) -> Result<Vec<UsageRecord>> {
        Ok(self
            .read()?
            .usage
            .values()
            .filter(|record| &record.meter_no == meter_no)
            .cloned()
            .collect())
    }
}
