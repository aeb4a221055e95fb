//! Key encoding utilities for `RocksDB`.
//!
//! This module provides functions for encoding keys used in column families.

use meter_billing_core::{BillingMonth, MeterNo};

/// Create a customer key from a meter number.
#[must_use]
pub fn customer_key(meter_no: &MeterNo) -> Vec<u8> {
    meter_no.as_bytes().to_vec()
}

/// Create a usage key.
///
/// Format: `len(meter_no) (1 byte) || meter_no || month`
///
/// The length prefix keeps `("M1", "02024")` and `("M10", "2024")` apart, and
/// groups all months of one meter under a common prefix.
#[must_use]
pub fn usage_key(meter_no: &MeterNo, month: &BillingMonth) -> Vec<u8> {
    let mut key = usage_prefix(meter_no);
    key.extend_from_slice(month.as_bytes());
    key
}

/// Create a prefix for iterating all usage records of a meter.
#[must_use]
pub fn usage_prefix(meter_no: &MeterNo) -> Vec<u8> {
    let bytes = meter_no.as_bytes();
    let mut key = Vec::with_capacity(1 + bytes.len() + meter_billing_core::MONTH_MAX_LEN);
    // Meter numbers are at most 20 characters, so at most 80 bytes.
    key.push(u8::try_from(bytes.len()).unwrap_or(u8::MAX));
    key.extend_from_slice(bytes);
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter(s: &str) -> MeterNo {
        s.parse().unwrap()
    }

    fn month(s: &str) -> BillingMonth {
        s.parse().unwrap()
    }

    #[test]
    fn usage_key_format() {
        let key = usage_key(&meter("M001"), &month("2024-01"));
        assert_eq!(key[0], 4);
        assert_eq!(&key[1..5], b"M001");
        assert_eq!(&key[5..], b"2024-01");
    }

    #[test]
    fn usage_keys_do_not_collide_across_meters() {
        let a = usage_key(&meter("M1"), &month("02024"));
        let b = usage_key(&meter("M10"), &month("2024"));
        assert_ne!(a, b);
    }

    #[test]
    fn usage_key_starts_with_meter_prefix() {
        let m001 = meter("M001");
        let key = usage_key(&m001, &month("2024-01"));
        assert!(key.starts_with(&usage_prefix(&m001)));

        let longer = usage_key(&meter("M0011"), &month("2024-01"));
        assert!(!longer.starts_with(&usage_prefix(&m001)));
    }
}
