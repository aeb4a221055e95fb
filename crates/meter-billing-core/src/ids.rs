//! Identifier types for meter-billing.
//!
//! This module provides strongly-typed keys for customers and usage periods.
//!
//! # Macro-based Key Types
//!
//! The `bounded_key_type!` macro reduces boilerplate for string keys with a
//! maximum width, ensuring consistent implementation of serialization, parsing,
//! and display traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of a meter number, in characters.
pub const METER_NO_MAX_LEN: usize = 20;

/// Maximum length of a billing month label, in characters.
pub const MONTH_MAX_LEN: usize = 20;

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The identifier was empty or whitespace.
    #[error("{kind} must not be empty")]
    Empty {
        /// Which identifier was being parsed.
        kind: &'static str,
    },

    /// The identifier exceeds its column width.
    #[error("{kind} is {len} characters long, maximum is {max}")]
    TooLong {
        /// Which identifier was being parsed.
        kind: &'static str,
        /// Length of the rejected value.
        len: usize,
        /// Maximum allowed length.
        max: usize,
    },

    /// The identifier contains a control character.
    #[error("{kind} contains a control character")]
    ControlCharacter {
        /// Which identifier was being parsed.
        kind: &'static str,
    },
}

/// Macro to define a bounded string key type with standard trait implementations.
///
/// This macro generates a newtype wrapper around `String` with implementations for:
/// - `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `Serialize`, `Deserialize` (as string, validated)
/// - `FromStr`, `Display`, `Debug`
/// - `TryFrom<String>`, `Into<String>`
/// - `AsRef<str>`
///
/// Values are trimmed before validation.
///
/// # Example
///
/// ```ignore
/// bounded_key_type!(MyKey, "my key", 20, "A custom key type.");
/// let key: MyKey = "K-1".parse().unwrap();
/// ```
macro_rules! bounded_key_type {
    ($name:ident, $kind:expr, $max:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parse and validate a key.
            ///
            /// # Errors
            ///
            /// Returns an error if the value is empty, too long, or contains
            /// control characters.
            pub fn new(value: impl AsRef<str>) -> Result<Self, IdError> {
                let trimmed = value.as_ref().trim();
                if trimmed.is_empty() {
                    return Err(IdError::Empty { kind: $kind });
                }
                let len = trimmed.chars().count();
                if len > $max {
                    return Err(IdError::TooLong {
                        kind: $kind,
                        len,
                        max: $max,
                    });
                }
                if trimmed.chars().any(char::is_control) {
                    return Err(IdError::ControlCharacter { kind: $kind });
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Return the key as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Return the UTF-8 bytes of the key.
            #[must_use]
            pub fn as_bytes(&self) -> &[u8] {
                self.0.as_bytes()
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

bounded_key_type!(
    MeterNo,
    "meter number",
    METER_NO_MAX_LEN,
    "A customer's meter number.\n\nThe meter number is the primary key of a customer and never changes once the customer exists."
);
bounded_key_type!(
    BillingMonth,
    "month",
    MONTH_MAX_LEN,
    "A billing period label such as `2024-01`.\n\nThe label is free-form; together with a `MeterNo` it keys a usage record."
);
