//! Tariff for electricity consumption.
//!
//! Consumption is charged in bands of increasing per-unit rate, then a fixed
//! charge and a percentage tax are added on top.
//!
//! All amounts are integer minor units (paise): 100 minor units = 1 rupee.

/// One consumption band of the tariff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateTier {
    /// Inclusive upper bound of the band in units, `None` for the open top band.
    pub up_to: Option<u32>,
    /// Price per unit within the band, in minor units.
    pub rate_per_unit_cents: i64,
}

/// The fixed tier table: 5/unit up to 100, 7/unit up to 300, 10/unit beyond.
pub const STANDARD_TIERS: [RateTier; 3] = [
    RateTier {
        up_to: Some(100),
        rate_per_unit_cents: 500,
    },
    RateTier {
        up_to: Some(300),
        rate_per_unit_cents: 700,
    },
    RateTier {
        up_to: None,
        rate_per_unit_cents: 1000,
    },
];

/// Fixed charge added to every bill (50.00).
pub const FIXED_CHARGE_CENTS: i64 = 5000;

/// Tax on the base amount, in basis points (5%).
pub const TAX_RATE_BASIS_POINTS: i64 = 500;

const BASIS_POINTS_PER_UNIT: i64 = 10_000;

/// The charges that make up one bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charges {
    /// Consumption charge from the tier table.
    pub base_amount_cents: i64,
    /// Fixed charge.
    pub fixed_charge_cents: i64,
    /// Tax on the base amount.
    pub tax_cents: i64,
    /// Base amount plus fixed charge plus tax.
    pub total_cents: i64,
}

/// The electricity tariff.
///
/// Only the standard tariff exists; it is obtained with [`Tariff::standard`] or
/// `Tariff::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tariff {
    tiers: &'static [RateTier],
    fixed_charge_cents: i64,
    tax_rate_basis_points: i64,
}

impl Default for Tariff {
    fn default() -> Self {
        Self::standard()
    }
}

impl Tariff {
    /// The standard residential tariff.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            tiers: &STANDARD_TIERS,
            fixed_charge_cents: FIXED_CHARGE_CENTS,
            tax_rate_basis_points: TAX_RATE_BASIS_POINTS,
        }
    }

    /// Calculate the consumption charge for `units`.
    ///
    /// Each band charges only the units that fall inside it, so the result is
    /// `5·min(u,100) + 7·clamp(u-100, 0, 200) + 10·max(0, u-300)` in rupees for
    /// the standard tariff.
    #[must_use]
    pub fn base_amount_cents(&self, units: u32) -> i64 {
        let mut lower = 0u32;
        let mut amount = 0i64;

        for tier in self.tiers {
            if units <= lower {
                break;
            }
            let upper = tier.up_to.map_or(units, |bound| bound.min(units));
            amount += i64::from(upper - lower) * tier.rate_per_unit_cents;
            match tier.up_to {
                Some(bound) => lower = bound,
                None => break,
            }
        }

        amount
    }

    /// Calculate the tax on a base amount, rounded half-up to the minor unit.
    #[must_use]
    pub fn tax_cents(&self, base_amount_cents: i64) -> i64 {
        let scaled = base_amount_cents * self.tax_rate_basis_points;
        (scaled + BASIS_POINTS_PER_UNIT / 2) / BASIS_POINTS_PER_UNIT
    }

    /// Calculate every charge on a bill for `units`.
    #[must_use]
    pub fn charges(&self, units: u32) -> Charges {
        let base_amount_cents = self.base_amount_cents(units);
        let tax_cents = self.tax_cents(base_amount_cents);

        Charges {
            base_amount_cents,
            fixed_charge_cents: self.fixed_charge_cents,
            tax_cents,
            total_cents: base_amount_cents + self.fixed_charge_cents + tax_cents,
        }
    }

    /// Human-readable tax rate, e.g. `5%` or `2.5%`.
    #[must_use]
    pub fn tax_rate_label(&self) -> String {
        let whole = self.tax_rate_basis_points / 100;
        let fraction = self.tax_rate_basis_points % 100;
        if fraction == 0 {
            format!("{whole}%")
        } else {
            let fraction = format!("{fraction:02}");
            format!("{whole}.{}%", fraction.trim_end_matches('0'))
        }
    }
}

/// Format minor units as a decimal amount with two places, e.g. `1677.50`.
#[must_use]
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}
