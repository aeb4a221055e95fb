//! Meter billing service.
//!
//! This crate wires the ledger to the billing engine and exposes them through
//! commands:
//!
//! - Customer registration
//! - Monthly usage recording
//! - Bill generation from the tiered tariff
//! - Priced usage history per meter
//!
//! # Front ends
//!
//! Commands are plain values passed to [`dispatch`], so any front end can drive
//! them:
//!
//! 1. **One-shot CLI** - each subcommand of the `meter-billing` binary runs one command
//! 2. **Console** - an interactive menu over any reader/writer pair

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod commands;
pub mod config;
pub mod console;
pub mod engine;
pub mod error;
pub mod state;

pub use commands::{dispatch, Command, Outcome};
pub use config::{ServiceConfig, StoreBackend};
pub use console::Console;
pub use engine::{BillResult, BillingEngine, HistoryEntry};
pub use error::{Result, ServiceError};
pub use state::AppState;
