//! Monthly meter usage records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BillingError, Result};
use crate::{BillingMonth, MeterNo};

/// Units consumed by one meter during one billing month.
///
/// A record is keyed by `(meter_no, month)`; at most one exists per pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// The meter that was read.
    pub meter_no: MeterNo,

    /// The billing month.
    pub month: BillingMonth,

    /// Units consumed (kWh).
    pub units_consumed: u32,

    /// When the reading was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl UsageRecord {
    /// Create a usage record from a raw unit count.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::InvalidUnits` if `units` is negative or does not fit
    /// in a `u32`.
    pub fn new(meter_no: MeterNo, month: BillingMonth, units: i64) -> Result<Self> {
        let units_consumed = u32::try_from(units).map_err(|_| BillingError::InvalidUnits(units))?;

        Ok(Self {
            meter_no,
            month,
            units_consumed,
            recorded_at: Utc::now(),
        })
    }
}
