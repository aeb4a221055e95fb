//! Customer records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BillingError, Result};
use crate::MeterNo;

/// Maximum length of a customer name, in characters.
pub const NAME_MAX_LEN: usize = 100;

/// Maximum length of a postal address, in characters.
pub const ADDRESS_MAX_LEN: usize = 200;

/// Maximum length of an email address, in characters.
pub const EMAIL_MAX_LEN: usize = 100;

/// An electricity customer, identified by their meter number.
///
/// Customers are create-only: once stored, none of their fields change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// The meter number (primary key).
    pub meter_no: MeterNo,

    /// Full name.
    pub name: String,

    /// Postal address.
    pub address: String,

    /// Contact email.
    pub email: String,

    /// When the customer was created.
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Create a new customer, checking each text field against its column width.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::FieldTooLong` if any field is wider than its column.
    pub fn new(
        meter_no: MeterNo,
        name: impl Into<String>,
        address: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self> {
        let name = bounded("name", name.into(), NAME_MAX_LEN)?;
        let address = bounded("address", address.into(), ADDRESS_MAX_LEN)?;
        let email = bounded("email", email.into(), EMAIL_MAX_LEN)?;

        Ok(Self {
            meter_no,
            name,
            address,
            email,
            created_at: Utc::now(),
        })
    }
}

fn bounded(field: &'static str, value: String, max: usize) -> Result<String> {
    let len = value.chars().count();
    if len > max {
        return Err(BillingError::FieldTooLong { field, len, max });
    }
    Ok(value)
}
