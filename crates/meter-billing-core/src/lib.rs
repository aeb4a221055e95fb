//! Core types and utilities for meter-billing.
//!
//! This crate provides the foundational types used throughout the meter-billing tools:
//!
//! - **Identifiers**: `MeterNo`, `BillingMonth`
//! - **Customers**: `Customer`
//! - **Usage**: `UsageRecord`
//! - **Pricing**: `Tariff`, `RateTier`, `Charges`
//! - **Invoices**: `Invoice`
//!
//! # Amounts
//!
//! **100 minor units = 1 rupee**
//!
//! - 250 units → base amount 155000 (₹1550.00)
//! - Tax and totals are computed on integers, so 5% of ₹1550.00 is exactly ₹77.50
//! - Stored as `i64` to avoid floating point precision issues

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod customer;
pub mod error;
pub mod ids;
pub mod invoice;
pub mod pricing;
pub mod usage;

pub use customer::{Customer, ADDRESS_MAX_LEN, EMAIL_MAX_LEN, NAME_MAX_LEN};
pub use error::{BillingError, Result};
pub use ids::{BillingMonth, IdError, MeterNo, METER_NO_MAX_LEN, MONTH_MAX_LEN};
pub use invoice::{Invoice, CLOSING_MESSAGE, CURRENCY_SIGN, DATE_FORMAT};
pub use pricing::{
    format_cents, Charges, RateTier, Tariff, FIXED_CHARGE_CENTS, STANDARD_TIERS,
    TAX_RATE_BASIS_POINTS,
};
pub use usage::UsageRecord;
