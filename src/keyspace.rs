// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The keyspace: an immutable interval of exact integers.
//!
//! An [`ExactRange`] is created once at start-up and never changes. Every
//! [`Viewport`](crate::viewport::Viewport) is a sub-interval of one.
//!
//! # Examples
//!
//! ```
//! use keyspace_explorer::keyspace::ExactRange;
//! use num_bigint::BigInt;
//!
//! let range = ExactRange::default();
//! assert_eq!(range.size(), BigInt::from(1u8) << 72);
//! assert_eq!(format!("{:x}", range.low()), "1000000000000000000");
//! ```

use num_bigint::BigInt;
use num_traits::Num;
use std::fmt;
use thiserror::Error;

/// Lowest value of the default keyspace, `2^72`.
pub const DEFAULT_LOW_HEX: &str = "1000000000000000000";

/// Highest value of the default keyspace, `2^73 - 1`.
pub const DEFAULT_HIGH_HEX: &str = "1ffffffffffffffffff";

/// Errors raised when building a range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("range low {low:#x} is above range high {high:#x}")]
    Inverted { low: BigInt, high: BigInt },

    #[error("'{0}' is not a hexadecimal integer")]
    InvalidHex(String),
}

/// The full search interval `[low, high]`, both ends inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExactRange {
    low: BigInt,
    high: BigInt,
}

impl ExactRange {
    /// Create a range, rejecting `low > high`.
    pub fn new(low: BigInt, high: BigInt) -> Result<Self, RangeError> {
        if low > high {
            return Err(RangeError::Inverted { low, high });
        }
        Ok(Self { low, high })
    }

    /// Create a range from two hex strings (an optional `0x` prefix is accepted).
    pub fn from_hex(low: &str, high: &str) -> Result<Self, RangeError> {
        Self::new(parse_hex(low)?, parse_hex(high)?)
    }

    pub fn low(&self) -> &BigInt {
        &self.low
    }

    pub fn high(&self) -> &BigInt {
        &self.high
    }

    /// Number of integers in the range, `high - low + 1`.
    pub fn size(&self) -> BigInt {
        &self.high - &self.low + 1u8
    }

    /// Distance between the two ends, `high - low`.
    ///
    /// This is the widest extent a viewport can have.
    pub fn span(&self) -> BigInt {
        &self.high - &self.low
    }

    pub fn contains(&self, value: &BigInt) -> bool {
        &self.low <= value && value <= &self.high
    }

    /// Clamp `value` into `[low, high]`.
    pub fn clamp(&self, value: BigInt) -> BigInt {
        if value < self.low {
            self.low.clone()
        } else if value > self.high {
            self.high.clone()
        } else {
            value
        }
    }
}

impl Default for ExactRange {
    fn default() -> Self {
        Self {
            low: BigInt::from(1u8) << 72,
            high: (BigInt::from(1u8) << 73) - 1u8,
        }
    }
}

impl fmt::Display for ExactRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:#x}, {:#x}]", self.low, self.high)
    }
}

/// Parse a hexadecimal integer, with or without a `0x` prefix.
pub fn parse_hex(text: &str) -> Result<BigInt, RangeError> {
    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let digits = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
        .unwrap_or(unsigned);
    let value = BigInt::from_str_radix(digits, 16)
        .map_err(|_| RangeError::InvalidHex(text.to_string()))?;
    Ok(if negative { -value } else { value })
}
