//! Application state.

use std::sync::Arc;

use meter_billing_store::{MemoryStore, Store};

use crate::config::{ServiceConfig, StoreBackend};
use crate::engine::BillingEngine;
use crate::error::Result;

/// Application state shared by every command.
#[derive(Clone)]
pub struct AppState {
    /// The ledger.
    pub store: Arc<dyn Store>,

    /// The billing engine, reading from the same ledger.
    pub engine: BillingEngine,
}

impl AppState {
    /// Create application state around an existing store.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        let engine = BillingEngine::new(Arc::clone(&store));
        Self { store, engine }
    }

    /// Open the backend named in `config` and build state around it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened, or if `RocksDB` was
    /// requested from a build without the `rocksdb-backend` feature.
    pub fn open(config: &ServiceConfig) -> Result<Self> {
        let store: Arc<dyn Store> = match config.store_backend {
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory ledger - records are lost on exit");
                Arc::new(MemoryStore::new())
            }
            StoreBackend::RocksDb => open_rocks(&config.data_dir)?,
        };

        Ok(Self::new(store))
    }
}

#[cfg(feature = "rocksdb-backend")]
fn open_rocks(data_dir: &str) -> Result<Arc<dyn Store>> {
    tracing::info!(path = %data_dir, "Opening RocksDB ledger");
    std::fs::create_dir_all(data_dir)?;
    let store = meter_billing_store::RocksStore::open(data_dir)?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "rocksdb-backend"))]
fn open_rocks(_data_dir: &str) -> Result<Arc<dyn Store>> {
    Err(crate::error::ServiceError::Configuration(
        "built without the rocksdb-backend feature; use the memory backend".into(),
    ))
}
