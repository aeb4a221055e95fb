//! Service configuration.

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Result, ServiceError};

/// Default location of the ledger database.
pub const DEFAULT_DATA_DIR: &str = "./data/meter-billing";

/// Environment variable naming the config file.
pub const CONFIG_PATH_VAR: &str = "METER_BILLING_CONFIG";

/// Config file looked up in the working directory when `METER_BILLING_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "meter-billing.json";

/// Which ledger backend to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Durable `RocksDB` database under `data_dir`.
    #[default]
    RocksDb,
    /// In-process store, discarded on exit.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rocksdb" | "rocks" => Ok(Self::RocksDb),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(format!("unknown store backend: {other}")),
        }
    }
}

/// Service configuration loaded from a config file and environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Path to the `RocksDB` data directory (default: "./data/meter-billing").
    pub data_dir: String,

    /// Ledger backend (default: `rocksdb`).
    pub store_backend: StoreBackend,
}

/// Config file structure. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    data_dir: Option<String>,
    #[serde(default)]
    store_backend: Option<StoreBackend>,
}

impl ServiceConfig {
    /// Load configuration from the config file, then apply environment overrides.
    ///
    /// The file is read from `METER_BILLING_CONFIG` if set, else from
    /// `meter-billing.json` in the working directory. `DATA_DIR` and
    /// `STORE_BACKEND` override the file.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Configuration` if the config file cannot be read
    /// or parsed, if `METER_BILLING_CONFIG` names a file that does not exist,
    /// or if `STORE_BACKEND` is not a known backend.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        // An explicitly named file must exist; the default one is optional
        let loaded = match var(CONFIG_PATH_VAR) {
            Some(path) => {
                let file = load_config_file(&path)?.ok_or_else(|| {
                    ServiceError::Configuration(format!(
                        "{CONFIG_PATH_VAR} names a missing file: {path}"
                    ))
                })?;
                Some((path, file))
            }
            None => load_config_file(DEFAULT_CONFIG_FILE)?
                .map(|file| (DEFAULT_CONFIG_FILE.to_owned(), file)),
        };

        match loaded {
            Some((path, file)) => {
                tracing::info!(path = %path, "Loaded configuration file");
                config.apply_file(file);
            }
            None => tracing::debug!("No configuration file, using defaults"),
        }

        if let Some(dir) = var("DATA_DIR") {
            config.data_dir = dir;
        }
        if let Some(backend) = var("STORE_BACKEND") {
            config.store_backend = backend
                .parse()
                .map_err(|e| ServiceError::Configuration(format!("STORE_BACKEND: {e}")))?;
        }

        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(dir) = file.data_dir {
            self.data_dir = dir;
        }
        if let Some(backend) = file.store_backend {
            self.store_backend = backend;
        }
    }
}

/// Load the config file, returning `None` if it does not exist.
fn load_config_file(path: &str) -> Result<Option<FileConfig>> {
    let path = Path::new(path);
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path).map_err(|e| {
        ServiceError::Configuration(format!("cannot read {}: {e}", path.display()))
    })?;
    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|e| ServiceError::Configuration(format!("invalid {}: {e}", path.display())))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.into(),
            store_backend: StoreBackend::default(),
        }
    }
}
