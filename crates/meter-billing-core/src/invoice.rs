//! Invoices computed from a usage record.
//!
//! Invoices are derived on demand and never stored.

use std::fmt;

use chrono::NaiveDate;

use crate::pricing::{format_cents, Tariff};
use crate::{BillingMonth, Customer, MeterNo, UsageRecord};

/// Currency sign printed in front of amounts.
pub const CURRENCY_SIGN: &str = "₹";

/// Closing line printed under every bill.
pub const CLOSING_MESSAGE: &str = "Thank you for using our service!";

/// Date format on printed bills (`dd-mm-yyyy`).
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// An electricity bill for one meter and month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    /// Date the bill was issued.
    pub date: NaiveDate,
    /// The billed meter.
    pub meter_no: MeterNo,
    /// Customer name.
    pub name: String,
    /// Customer address.
    pub address: String,
    /// Customer email.
    pub email: String,
    /// The billed month.
    pub month: BillingMonth,
    /// Units consumed.
    pub units: u32,
    /// Consumption charge.
    pub base_amount_cents: i64,
    /// Fixed charge.
    pub fixed_charge_cents: i64,
    /// Tax on the base amount.
    pub tax_cents: i64,
    /// Amount due.
    pub total_cents: i64,
    /// Printed tax rate, e.g. `5%`.
    pub tax_rate_label: String,
}

impl Invoice {
    /// Build the invoice for `usage`, owned by `customer`, dated `date`.
    ///
    /// This is a pure function: the same inputs always give the same invoice.
    #[must_use]
    pub fn assemble(
        customer: &Customer,
        usage: &UsageRecord,
        tariff: &Tariff,
        date: NaiveDate,
    ) -> Self {
        let charges = tariff.charges(usage.units_consumed);

        Self {
            date,
            meter_no: usage.meter_no.clone(),
            name: customer.name.clone(),
            address: customer.address.clone(),
            email: customer.email.clone(),
            month: usage.month.clone(),
            units: usage.units_consumed,
            base_amount_cents: charges.base_amount_cents,
            fixed_charge_cents: charges.fixed_charge_cents,
            tax_cents: charges.tax_cents,
            total_cents: charges.total_cents,
            tax_rate_label: tariff.tax_rate_label(),
        }
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tax_label = format!("Tax ({})", self.tax_rate_label);

        writeln!(f, "Electricity Bill")?;
        writeln!(f, "Date         : {}", self.date.format(DATE_FORMAT))?;
        writeln!(f, "Meter No     : {}", self.meter_no)?;
        writeln!(f, "Name         : {}", self.name)?;
        writeln!(f, "Address      : {}", self.address)?;
        writeln!(f, "Email        : {}", self.email)?;
        writeln!(f, "Month        : {}", self.month)?;
        writeln!(f, "Units        : {}", self.units)?;
        writeln!(
            f,
            "Base Amount  : {CURRENCY_SIGN}{}",
            format_cents(self.base_amount_cents)
        )?;
        writeln!(
            f,
            "Fixed Charge : {CURRENCY_SIGN}{}",
            format_cents(self.fixed_charge_cents)
        )?;
        writeln!(
            f,
            "{tax_label:<13}: {CURRENCY_SIGN}{}",
            format_cents(self.tax_cents)
        )?;
        writeln!(
            f,
            "Total Amount : {CURRENCY_SIGN}{}",
            format_cents(self.total_cents)
        )?;
        writeln!(f, "--------------------------------------")?;
        write!(f, "{CLOSING_MESSAGE}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(units: i64) -> (Customer, UsageRecord) {
        let meter: MeterNo = "M001".parse().unwrap();
        let customer = Customer::new(meter.clone(), "Asha", "12 Lane", "a@x.com").unwrap();
        let usage = UsageRecord::new(meter, "2024-01".parse().unwrap(), units).unwrap();
        (customer, usage)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 3).unwrap()
    }

    #[test]
    fn assemble_copies_customer_and_usage() {
        let (customer, usage) = fixture(250);
        let invoice = Invoice::assemble(&customer, &usage, &Tariff::default(), date());

        assert_eq!(invoice.meter_no.as_str(), "M001");
        assert_eq!(invoice.name, "Asha");
        assert_eq!(invoice.address, "12 Lane");
        assert_eq!(invoice.email, "a@x.com");
        assert_eq!(invoice.month.as_str(), "2024-01");
        assert_eq!(invoice.units, 250);
        assert_eq!(invoice.base_amount_cents, 155_000);
        assert_eq!(invoice.total_cents, 167_750);
    }

    #[test]
    fn assemble_is_deterministic() {
        let (customer, usage) = fixture(400);
        let tariff = Tariff::default();
        assert_eq!(
            Invoice::assemble(&customer, &usage, &tariff, date()),
            Invoice::assemble(&customer, &usage, &tariff, date())
        );
    }

    #[test]
    fn display_renders_labeled_lines() {
        let (customer, usage) = fixture(250);
        let rendered = Invoice::assemble(&customer, &usage, &Tariff::default(), date()).to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Electricity Bill",
                "Date         : 03-02-2024",
                "Meter No     : M001",
                "Name         : Asha",
                "Address      : 12 Lane",
                "Email        : a@x.com",
                "Month        : 2024-01",
                "Units        : 250",
                "Base Amount  : ₹1550.00",
                "Fixed Charge : ₹50.00",
                "Tax (5%)     : ₹77.50",
                "Total Amount : ₹1677.50",
                "--------------------------------------",
                "Thank you for using our service!",
            ]
        );
    }
}
