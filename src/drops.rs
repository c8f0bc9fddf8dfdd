//! Drop amounts: the ledger's smallest currency unit.
//!
//! Amounts are decimal strings at every serialization boundary (channel
//! records, transactions, claim envelopes) and `u64` internally. All
//! arithmetic is integral; never floating point.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{ClaimError, Result};

/// A non-negative amount in drops.
///
/// Serializes as a decimal string, the wire form used by channel records
/// and claims. Parsing takes strict base-10 integers (no whitespace, no
/// radix prefixes); a signed zero is zero. Failures classify: a
/// well-formed negative integer is [`ClaimError::NegativeAmount`],
/// anything else outside `0..=u64::MAX` is
/// [`ClaimError::InvalidAmountFormat`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Drops(u64);

impl Drops {
    /// Create from a raw drop count.
    pub const fn new(drops: u64) -> Self {
        Self(drops)
    }

    /// The raw drop count.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Drops {
    fn from(drops: u64) -> Self {
        Self(drops)
    }
}

impl fmt::Display for Drops {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Drops {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self> {
        if let Ok(drops) = s.parse::<u64>() {
            return Ok(Self(drops));
        }
        let digits = s.strip_prefix('-').unwrap_or(s);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if s.starts_with('-') {
                // a signed zero is zero, not negative
                if digits.bytes().all(|b| b == b'0') {
                    return Ok(Self(0));
                }
                return Err(ClaimError::NegativeAmount(s.to_string()));
            }
            // a well-formed integer that does not fit the 64-bit claim encoding
            return Err(ClaimError::InvalidAmountFormat(format!(
                "{s} is out of range"
            )));
        }
        Err(ClaimError::InvalidAmountFormat(s.to_string()))
    }
}

impl Serialize for Drops {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Drops {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
