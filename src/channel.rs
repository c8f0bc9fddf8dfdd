//! Channel identifiers and the ledger's channel records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::drops::Drops;
use crate::errors::{ClaimError, Result};

/// Raw byte length of a channel identifier.
pub const CHANNEL_ID_LEN: usize = 32;

/// A 256-bit payment channel identifier.
///
/// Canonical text form is 64 hex characters. Parsing accepts either case;
/// display emits uppercase, the form signers and ledgers expect.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId([u8; CHANNEL_ID_LEN]);

impl ChannelId {
    /// Wrap raw identifier bytes.
    pub const fn new(bytes: [u8; CHANNEL_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// The raw identifier bytes.
    pub const fn as_bytes(&self) -> &[u8; CHANNEL_ID_LEN] {
        &self.0
    }

    /// Decode from hex, enforcing the 32-byte length.
    pub fn from_hex(hex_id: &str) -> Result<Self> {
        let bytes = hex::decode(hex_id)
            .map_err(|e| ClaimError::InvalidChannelId(format!("not valid hex: {e}")))?;
        let len = bytes.len();
        let bytes: [u8; CHANNEL_ID_LEN] = bytes
            .try_into()
            .map_err(|_| ClaimError::InvalidChannelId(format!("length {len}; must be 32 bytes")))?;
        Ok(Self(bytes))
    }

    /// Uppercase hex form of the identifier.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl fmt::Debug for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChannelId({})", self.to_hex())
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ChannelId {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for ChannelId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ChannelId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// An open payment channel as reported by the ledger's channel listing.
///
/// Listings carry more fields than these; only the ones claim issuance
/// reads are deserialized, and unknown fields are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Ledger-assigned channel identifier.
    pub channel_id: ChannelId,
    /// Total drops deposited into the channel so far. Monotonically
    /// non-decreasing over the channel's lifetime.
    pub amount: Drops,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let hex_id = "AB".repeat(32);
        let id = ChannelId::from_hex(&hex_id).unwrap();
        assert_eq!(id.to_hex(), hex_id);
        assert_eq!(id.as_bytes(), &[0xAB; 32]);
    }

    #[test]
    fn test_lowercase_accepted_uppercase_emitted() {
        let id = ChannelId::from_hex(&"ab".repeat(32)).unwrap();
        assert_eq!(id.to_hex(), "AB".repeat(32));
        assert_eq!(id.to_string(), "AB".repeat(32));
    }

    #[test]
    fn test_wrong_length_reports_decoded_length() {
        let err = ChannelId::from_hex(&"AB".repeat(31)).unwrap_err();
        assert!(matches!(err, ClaimError::InvalidChannelId(_)));
        assert!(err.to_string().contains("31"));
        assert!(err.to_string().contains("must be 32 bytes"));
    }

    #[test]
    fn test_non_hex_rejected() {
        let err = ChannelId::from_hex(&"ZZ".repeat(32)).unwrap_err();
        assert!(matches!(err, ClaimError::InvalidChannelId(_)));
    }

    #[test]
    fn test_channel_deserializes_from_listing_entry() {
        // shaped like one entry of an account_channels response, with
        // fields this crate does not read
        let json = format!(
            r#"{{
                "account": "rTESTADDRESS",
                "channel_id": "{}",
                "amount": "1000",
                "destination_account": "rDEST",
                "settle_delay": 1209600
            }}"#,
            "AB".repeat(32)
        );
        let channel: Channel = serde_json::from_str(&json).unwrap();
        assert_eq!(channel.channel_id.to_hex(), "AB".repeat(32));
        assert_eq!(channel.amount, Drops::new(1000));
    }
}
