//! Common test utilities for meter-billing integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;

use meter_billing_service::{dispatch, AppState, Command, Outcome, ServiceConfig, StoreBackend};
use meter_billing_store::{MemoryStore, Store};

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// Application state under test.
    pub state: AppState,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: Option<TempDir>,
}

impl TestHarness {
    /// Create a new test harness with an empty in-memory ledger.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Create a harness around a caller-supplied store.
    pub fn with_store(store: Arc<dyn Store>) -> Self {
        Self {
            state: AppState::new(store),
            _temp_dir: None,
        }
    }

    /// Create a harness backed by a fresh `RocksDB` database.
    pub fn rocks() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config = ServiceConfig {
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            store_backend: StoreBackend::RocksDb,
        };
        let state = AppState::open(&config).expect("Failed to open store");
        Self {
            state,
            _temp_dir: Some(temp_dir),
        }
    }

    /// Dispatch a command, panicking on failure.
    pub fn run(&self, command: Command) -> Outcome {
        dispatch(&self.state, command).expect("command failed")
    }

    /// Register the customer used throughout the tests (meter `M001`).
    pub fn add_asha(&self) {
        self.run(Command::AddCustomer {
            meter_no: "M001".into(),
            name: "Asha".into(),
            address: "12 Lane".into(),
            email: "a@x.com".into(),
        });
    }

    /// Record usage for `M001`.
    pub fn record(&self, month: &str, units: i64) {
        self.run(Command::RecordUsage {
            meter_no: "M001".into(),
            month: month.into(),
            units,
        });
    }
}

/// A fixed issue date for deterministic invoices.
pub fn issue_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 5).expect("valid date")
}
