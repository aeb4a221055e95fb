//! Commands and their dispatch.
//!
//! A [`Command`] carries the raw fields an operator typed. [`dispatch`]
//! validates them, calls into the ledger or the billing engine, and returns an
//! [`Outcome`] whose `Display` is the text shown to the operator.

use std::fmt;

use meter_billing_core::{
    format_cents, BillingMonth, Customer, MeterNo, UsageRecord, CURRENCY_SIGN,
};

use crate::engine::{BillResult, HistoryEntry};
use crate::error::Result;
use crate::state::AppState;

/// A request from the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register a new customer.
    AddCustomer {
        /// Meter number.
        meter_no: String,
        /// Full name.
        name: String,
        /// Postal address.
        address: String,
        /// Contact email.
        email: String,
    },
    /// Record a month of usage.
    RecordUsage {
        /// Meter number.
        meter_no: String,
        /// Billing month.
        month: String,
        /// Units consumed.
        units: i64,
    },
    /// Compute the bill for a month.
    GenerateBill {
        /// Meter number.
        meter_no: String,
        /// Billing month.
        month: String,
    },
    /// List every billed month of a meter.
    UsageHistory {
        /// Meter number.
        meter_no: String,
    },
    /// End the session.
    Exit,
}

/// The result of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The customer was stored.
    CustomerAdded(Customer),
    /// The usage record was stored.
    UsageRecorded(UsageRecord),
    /// A bill was requested.
    Bill(BillResult),
    /// A meter's priced usage history.
    UsageHistory {
        /// The meter.
        meter_no: MeterNo,
        /// One entry per recorded month.
        entries: Vec<HistoryEntry>,
    },
    /// The session should end.
    Exit,
}

impl Outcome {
    /// Whether the session should end after this outcome.
    #[must_use]
    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Exit)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CustomerAdded(_) => write!(f, "Customer added successfully."),
            Self::UsageRecorded(_) => write!(f, "Usage recorded."),
            Self::Bill(BillResult::Issued(invoice)) => write!(f, "{invoice}"),
            Self::Bill(BillResult::NoUsageRecord { .. }) => {
                write!(f, "No usage record found for given month.")
            }
            Self::UsageHistory { meter_no, entries } if entries.is_empty() => {
                write!(f, "No usage recorded for meter {meter_no}.")
            }
            Self::UsageHistory { meter_no, entries } => {
                write!(f, "Usage history for meter {meter_no}")?;
                for entry in entries {
                    write!(
                        f,
                        "\n{:<20} {:>10} units  {CURRENCY_SIGN}{}",
                        entry.month.as_str(),
                        entry.units,
                        format_cents(entry.total_cents)
                    )?;
                }
                Ok(())
            }
            Self::Exit => write!(f, "Exiting..."),
        }
    }
}

/// Execute a command against the application state.
///
/// # Errors
///
/// - `ServiceError::InvalidInput` if a field fails validation.
/// - `ServiceError::Store` if the ledger rejects the write or cannot be read.
/// - `ServiceError::MissingCustomer` if a bill finds usage without a customer.
pub fn dispatch(state: &AppState, command: Command) -> Result<Outcome> {
    match command {
        Command::AddCustomer {
            meter_no,
            name,
            address,
            email,
        } => {
            let customer = Customer::new(meter_no.parse()?, name, address, email)?;
            state.store.add_customer(&customer)?;
            tracing::info!(meter_no = %customer.meter_no, "Customer added");
            Ok(Outcome::CustomerAdded(customer))
        }
        Command::RecordUsage {
            meter_no,
            month,
            units,
        } => {
            let meter_no: MeterNo = meter_no.parse()?;
            let month: BillingMonth = month.parse()?;
            let record = state.store.record_usage(&meter_no, &month, units)?;
            tracing::info!(meter_no = %meter_no, month = %month, units, "Usage recorded");
            Ok(Outcome::UsageRecorded(record))
        }
        Command::GenerateBill { meter_no, month } => {
            let meter_no: MeterNo = meter_no.parse()?;
            let month: BillingMonth = month.parse()?;
            Ok(Outcome::Bill(state.engine.generate_bill(&meter_no, &month)?))
        }
        Command::UsageHistory { meter_no } => {
            let meter_no: MeterNo = meter_no.parse()?;
            let entries = state.engine.usage_history(&meter_no)?;
            Ok(Outcome::UsageHistory { meter_no, entries })
        }
        Command::Exit => Ok(Outcome::Exit),
    }
}
