//! End-to-end billing tests.

mod common;

use std::sync::Arc;

use common::{issue_date, TestHarness};

use meter_billing_core::{BillingMonth, Customer, MeterNo, UsageRecord};
use meter_billing_service::{BillResult, Command, Outcome, ServiceError};
use meter_billing_store::{Result as StoreResult, Store};

fn meter() -> MeterNo {
    "M001".parse().unwrap()
}

fn month(s: &str) -> BillingMonth {
    s.parse().unwrap()
}

fn bill(harness: &TestHarness, units: i64) -> meter_billing_core::Invoice {
    harness.add_asha();
    harness.record("2024-01", units);

    let result = harness
        .state
        .engine
        .generate_bill_on(&meter(), &month("2024-01"), issue_date())
        .unwrap();
    match result {
        BillResult::Issued(invoice) => invoice,
        BillResult::NoUsageRecord { .. } => panic!("expected an invoice"),
    }
}

// ============================================================================
// Worked examples
// ============================================================================

#[test]
fn bill_for_250_units() {
    let invoice = bill(&TestHarness::new(), 250);

    assert_eq!(invoice.name, "Asha");
    assert_eq!(invoice.address, "12 Lane");
    assert_eq!(invoice.email, "a@x.com");
    assert_eq!(invoice.units, 250);
    assert_eq!(invoice.base_amount_cents, 155_000);
    assert_eq!(invoice.fixed_charge_cents, 5_000);
    assert_eq!(invoice.tax_cents, 7_750);
    assert_eq!(invoice.total_cents, 167_750);
}

#[test]
fn bill_for_50_units() {
    let invoice = bill(&TestHarness::new(), 50);

    assert_eq!(invoice.base_amount_cents, 25_000);
    assert_eq!(invoice.tax_cents, 1_250);
    assert_eq!(invoice.total_cents, 31_250);
}

#[test]
fn bill_for_400_units() {
    let invoice = bill(&TestHarness::new(), 400);

    assert_eq!(invoice.base_amount_cents, 290_000);
    assert_eq!(invoice.tax_cents, 14_500);
    assert_eq!(invoice.total_cents, 309_500);
}

#[test]
fn printed_bill_shows_two_decimal_amounts() {
    let invoice = bill(&TestHarness::new(), 250);
    let printed = invoice.to_string();

    assert!(printed.contains("Date         : 05-02-2024"));
    assert!(printed.contains("Tax (5%)     : ₹77.50"));
    assert!(printed.contains("Total Amount : ₹1677.50"));
    assert!(printed.ends_with("Thank you for using our service!"));
}

#[test]
fn rebilling_gives_same_invoice() {
    let harness = TestHarness::new();
    let first = bill(&harness, 250);
    let second = harness
        .state
        .engine
        .generate_bill_on(&meter(), &month("2024-01"), issue_date())
        .unwrap();
    assert_eq!(second, BillResult::Issued(first));
}

// ============================================================================
// Missing records
// ============================================================================

#[test]
fn no_usage_record_yields_no_invoice() {
    let harness = TestHarness::new();
    harness.add_asha();

    let outcome = harness.run(Command::GenerateBill {
        meter_no: "M001".into(),
        month: "2024-03".into(),
    });

    assert!(matches!(
        outcome,
        Outcome::Bill(BillResult::NoUsageRecord { .. })
    ));
    assert_eq!(outcome.to_string(), "No usage record found for given month.");
}

/// A ledger that has lost its customer table.
struct OrphanedUsage;

impl Store for OrphanedUsage {
    fn add_customer(&self, _customer: &Customer) -> StoreResult<()> {
        Ok(())
    }

    fn get_customer(&self, _meter_no: &MeterNo) -> StoreResult<Option<Customer>> {
        Ok(None)
    }

    fn record_usage(
        &self,
        meter_no: &MeterNo,
        month: &BillingMonth,
        units: i64,
    ) -> StoreResult<UsageRecord> {
        Ok(UsageRecord::new(meter_no.clone(), month.clone(), units)?)
    }

    fn get_usage(
        &self,
        meter_no: &MeterNo,
        month: &BillingMonth,
    ) -> StoreResult<Option<UsageRecord>> {
        Ok(Some(UsageRecord::new(meter_no.clone(), month.clone(), 120)?))
    }

    fn list_usage(&self, _meter_no: &MeterNo) -> StoreResult<Vec<UsageRecord>> {
        Ok(Vec::new())
    }
}

#[test]
fn usage_without_customer_is_an_internal_error() {
    let harness = TestHarness::with_store(Arc::new(OrphanedUsage));

    let err = harness
        .state
        .engine
        .generate_bill(&meter(), &month("2024-01"))
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::MissingCustomer { ref meter_no, ref month }
            if meter_no == "M001" && month == "2024-01"
    ));
}

// ============================================================================
// History
// ============================================================================

#[test]
fn history_lists_months_with_totals() {
    let harness = TestHarness::new();
    harness.add_asha();
    harness.record("2024-01", 50);
    harness.record("2024-02", 250);

    let printed = harness
        .run(Command::UsageHistory {
            meter_no: "M001".into(),
        })
        .to_string();
    let lines: Vec<&str> = printed.lines().collect();

    assert_eq!(lines[0], "Usage history for meter M001");
    assert!(lines[1].starts_with("2024-01"));
    assert!(lines[1].ends_with("50 units  ₹312.50"));
    assert!(lines[2].ends_with("250 units  ₹1677.50"));
}

// ============================================================================
// Durable ledger
// ============================================================================

#[cfg(feature = "rocksdb-backend")]
#[test]
fn rocksdb_ledger_bills_end_to_end() {
    let invoice = bill(&TestHarness::rocks(), 400);
    assert_eq!(invoice.total_cents, 309_500);
}
