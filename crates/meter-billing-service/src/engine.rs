//! Billing engine.
//!
//! Reads usage and customer records from the ledger, prices them with the
//! tariff and assembles invoices. The engine never writes to the ledger.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use meter_billing_core::{BillingMonth, Invoice, MeterNo, Tariff};
use meter_billing_store::Store;

use crate::error::{Result, ServiceError};

/// Result of a bill request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillResult {
    /// The invoice for the requested month.
    Issued(Invoice),
    /// Nothing was recorded for the meter in that month, so there is nothing to bill.
    NoUsageRecord {
        /// The requested meter.
        meter_no: MeterNo,
        /// The requested month.
        month: BillingMonth,
    },
}

impl BillResult {
    /// The invoice, if one was issued.
    #[must_use]
    pub fn invoice(&self) -> Option<&Invoice> {
        match self {
            Self::Issued(invoice) => Some(invoice),
            Self::NoUsageRecord { .. } => None,
        }
    }
}

/// One billed month in a meter's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The billed month.
    pub month: BillingMonth,
    /// Units consumed.
    pub units: u32,
    /// Amount due for the month.
    pub total_cents: i64,
}

/// Computes invoices from ledger records.
#[derive(Clone)]
pub struct BillingEngine {
    store: Arc<dyn Store>,
    tariff: Tariff,
}

impl BillingEngine {
    /// Create an engine that reads from `store` and prices with the standard tariff.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            tariff: Tariff::standard(),
        }
    }

    /// Generate the bill for a meter and month, dated today.
    ///
    /// # Errors
    ///
    /// See [`BillingEngine::generate_bill_on`].
    pub fn generate_bill(&self, meter_no: &MeterNo, month: &BillingMonth) -> Result<BillResult> {
        self.generate_bill_on(meter_no, month, Local::now().date_naive())
    }

    /// Generate the bill for a meter and month, dated `date`.
    ///
    /// # Errors
    ///
    /// - `ServiceError::Store` if the ledger cannot be read.
    /// - `ServiceError::MissingCustomer` if the usage record has no owning
    ///   customer, which the ledger's referential integrity should prevent.
    pub fn generate_bill_on(
        &self,
        meter_no: &MeterNo,
        month: &BillingMonth,
        date: NaiveDate,
    ) -> Result<BillResult> {
        let Some(usage) = self.store.get_usage(meter_no, month)? else {
            tracing::debug!(meter_no = %meter_no, month = %month, "No usage record to bill");
            return Ok(BillResult::NoUsageRecord {
                meter_no: meter_no.clone(),
                month: month.clone(),
            });
        };

        let customer = self.store.get_customer(meter_no)?.ok_or_else(|| {
            tracing::error!(meter_no = %meter_no, month = %month, "Usage record without customer");
            ServiceError::MissingCustomer {
                meter_no: meter_no.to_string(),
                month: month.to_string(),
            }
        })?;

        let invoice = Invoice::assemble(&customer, &usage, &self.tariff, date);

        tracing::info!(
            meter_no = %meter_no,
            month = %month,
            units = invoice.units,
            total_cents = invoice.total_cents,
            "Bill generated"
        );

        Ok(BillResult::Issued(invoice))
    }

    /// Price every recorded month of a meter, in month-key order.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Store` if the ledger cannot be read.
    pub fn usage_history(&self, meter_no: &MeterNo) -> Result<Vec<HistoryEntry>> {
        let records = self.store.list_usage(meter_no)?;

        Ok(records
            .into_iter()
            .map(|record| HistoryEntry {
                total_cents: self.tariff.charges(record.units_consumed).total_cents,
                units: record.units_consumed,
                month: record.month,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meter_billing_core::Customer;
    use meter_billing_store::MemoryStore;

    fn meter() -> MeterNo {
        "M001".parse().unwrap()
    }

    fn month(s: &str) -> BillingMonth {
        s.parse().unwrap()
    }

    fn seeded(units: &[(&str, i64)]) -> BillingEngine {
        let store = Arc::new(MemoryStore::new());
        store
            .add_customer(&Customer::new(meter(), "Asha", "12 Lane", "a@x.com").unwrap())
            .unwrap();
        for (m, u) in units {
            store.record_usage(&meter(), &month(m), *u).unwrap();
        }
        BillingEngine::new(store)
    }

    #[test]
    fn bill_is_stamped_with_given_date() {
        let engine = seeded(&[("2024-01", 250)]);
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

        let result = engine.generate_bill_on(&meter(), &month("2024-01"), date).unwrap();
        let invoice = result.invoice().unwrap();
        assert_eq!(invoice.date, date);
        assert_eq!(invoice.total_cents, 167_750);
    }

    #[test]
    fn missing_usage_yields_no_invoice() {
        let engine = seeded(&[]);
        let result = engine.generate_bill(&meter(), &month("2024-01")).unwrap();
        assert!(result.invoice().is_none());
        assert!(matches!(result, BillResult::NoUsageRecord { .. }));
    }

    #[test]
    fn history_prices_each_month() {
        let engine = seeded(&[("2024-02", 400), ("2024-01", 50)]);
        let history = engine.usage_history(&meter()).unwrap();

        assert_eq!(
            history,
            vec![
                HistoryEntry {
                    month: month("2024-01"),
                    units: 50,
                    total_cents: 31_250,
                },
                HistoryEntry {
                    month: month("2024-02"),
                    units: 400,
                    total_cents: 309_500,
                },
            ]
        );
    }
}
