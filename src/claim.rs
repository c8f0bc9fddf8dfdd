//! Claim message encoding and the portable claim envelope.
//!
//! The signable message is a fixed 44-byte layout: a 4-byte hash prefix,
//! the 32-byte channel id verbatim, and the cumulative drop amount as two
//! big-endian 32-bit words. Signers are handed the message as an uppercase
//! hex digest; counterparties receive the signed claim as a base64 token.

use std::fmt;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::channel::{ChannelId, CHANNEL_ID_LEN};
use crate::drops::Drops;
use crate::errors::{ClaimError, Result};

/// Hash prefix identifying a payment-channel claim ("CLM\0").
pub const HASH_PREFIX_PAYMENT_CHANNEL_CLAIM: u32 = 0x434C_4D00;

/// Serialized claim message length: prefix + channel id + amount.
pub const CLAIM_MESSAGE_LEN: usize = 4 + CHANNEL_ID_LEN + 8;

const BASE64: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;

/// Serialize the signable claim message authorizing `amount` drops against
/// a channel.
///
/// `channel_id` must be exactly 32 bytes. The amount is split into its
/// high and low 32-bit words, each written big-endian. Output is always
/// [`CLAIM_MESSAGE_LEN`] bytes and depends only on the inputs.
pub fn serialize_authorization(
    channel_id: &[u8],
    amount: Drops,
) -> Result<[u8; CLAIM_MESSAGE_LEN]> {
    if channel_id.len() != CHANNEL_ID_LEN {
        return Err(ClaimError::InvalidChannelId(format!(
            "length {}; must be 32 bytes",
            channel_id.len()
        )));
    }

    let drops = amount.as_u64();
    let high = (drops >> 32) as u32;
    let low = (drops & 0xFFFF_FFFF) as u32;

    let mut msg = [0u8; CLAIM_MESSAGE_LEN];
    msg[..4].copy_from_slice(&HASH_PREFIX_PAYMENT_CHANNEL_CLAIM.to_be_bytes());
    msg[4..4 + CHANNEL_ID_LEN].copy_from_slice(channel_id);
    msg[36..40].copy_from_slice(&high.to_be_bytes());
    msg[40..].copy_from_slice(&low.to_be_bytes());
    Ok(msg)
}

/// Build the uppercase hex digest a signer signs for a channel claim.
///
/// `channel_id_hex` is the 64-char channel id (either case); `amount` is a
/// base-10 drop count. The returned string is exactly what the raw-digest
/// signing primitive is given.
pub fn build_authorization_hex(channel_id_hex: &str, amount: &str) -> Result<String> {
    let channel_id = ChannelId::from_hex(channel_id_hex)?;
    let drops: Drops = amount.parse()?;
    let msg = serialize_authorization(channel_id.as_bytes(), drops)?;
    Ok(hex::encode_upper(msg))
}

/// Currency descriptor carried in the claim envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// Currency code, e.g. "XRP".
    pub code: String,
    /// Decimal scale: how many powers of ten separate a drop from one unit.
    pub scale: u8,
}

/// A portable payment claim.
///
/// Field order is the canonical serialization order and must stay stable:
/// the token a counterparty stores is the serialized form. The signature
/// covers exactly the (channel id, authorized amount) pair; a later claim
/// for a higher amount supersedes an earlier one rather than chaining onto
/// it. Claims are ephemeral and never persisted by this crate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Claim format version.
    pub version: String,
    /// Source account that funded the channel.
    pub account: String,
    /// Protocol identifier, e.g. "XRPL.MAINNET".
    pub protocol: String,
    /// Currency the amounts are denominated in.
    pub currency: Currency,
    /// Account entitled to redeem the claim.
    pub destination_account: String,
    /// Cumulative drops the bearer may claim.
    pub authorized_to_claim: Drops,
    /// Channel the claim draws on.
    pub channel_id: ChannelId,
    /// Signature over the claim digest. Opaque to this crate; it is never
    /// validated locally.
    pub signature: String,
}

/// A base64-encoded claim envelope, ready to hand to the counterparty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap an already-encoded token, e.g. one received over the wire.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Encode a claim into its token form.
    pub fn encode(claim: &Claim) -> Result<Self> {
        let json = serde_json::to_string(claim)?;
        Ok(Self(BASE64.encode(json)))
    }

    /// Decode the token back into the claim it carries.
    pub fn decode(&self) -> Result<Claim> {
        let bytes = BASE64
            .decode(&self.0)
            .map_err(|e| ClaimError::Serialization(format!("invalid base64 token: {e}")))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// The token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<AuthToken> for String {
    fn from(token: AuthToken) -> Self {
        token.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        let msg = serialize_authorization(&[0xAA; 32], Drops::new(0x1122_3344_5566_7788)).unwrap();

        assert_eq!(hex::encode(&msg[..4]), "434c4d00");
        assert_eq!(&msg[4..36], &[0xAA; 32]);
        assert_eq!(hex::encode(&msg[36..]), "1122334455667788");
    }

    #[test]
    fn test_message_is_always_44_bytes() {
        for amount in [0, 1, u32::MAX as u64, u64::MAX] {
            let msg = serialize_authorization(&[0x00; 32], Drops::new(amount)).unwrap();
            assert_eq!(msg.len(), CLAIM_MESSAGE_LEN);
            assert_eq!(msg.len(), 44);
        }
    }

    #[test]
    fn test_deterministic() {
        let a = serialize_authorization(&[0x5C; 32], Drops::new(123_456)).unwrap();
        let b = serialize_authorization(&[0x5C; 32], Drops::new(123_456)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_amount_words_round_trip() {
        for amount in [0u64, 1, 0xFFFF_FFFF, 0x1_0000_0000, u64::MAX] {
            let msg = serialize_authorization(&[0x00; 32], Drops::new(amount)).unwrap();
            let high = u32::from_be_bytes(msg[36..40].try_into().unwrap());
            let low = u32::from_be_bytes(msg[40..].try_into().unwrap());
            assert_eq!(((high as u64) << 32) | low as u64, amount);
        }
    }

    #[test]
    fn test_wrong_id_length_reports_length() {
        let err = serialize_authorization(&[0xAA; 31], Drops::new(1000)).unwrap_err();
        assert!(matches!(err, ClaimError::InvalidChannelId(_)));
        assert!(err.to_string().contains("31"));
        assert!(err.to_string().contains("must be 32 bytes"));
    }

    #[test]
    fn test_digest_is_uppercase_hex() {
        let digest = build_authorization_hex(&"aa".repeat(32), "123456").unwrap();
        assert_eq!(digest.len(), 88);
        assert_eq!(digest, digest.to_uppercase());
        assert!(digest.starts_with("434C4D00"));
        assert!(digest.contains(&"AA".repeat(32)));
    }

    #[test]
    fn test_digest_matches_serialized_message() {
        let channel_hex = "AB".repeat(32);
        let digest = build_authorization_hex(&channel_hex, "98765").unwrap();

        let id = ChannelId::from_hex(&channel_hex).unwrap();
        let msg = serialize_authorization(id.as_bytes(), Drops::new(98_765)).unwrap();
        assert_eq!(digest, hex::encode_upper(msg));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = build_authorization_hex(&"00".repeat(32), "-1").unwrap_err();
        assert!(matches!(err, ClaimError::NegativeAmount(_)));
    }

    #[test]
    fn test_non_numeric_amount_rejected() {
        let err = build_authorization_hex(&"00".repeat(32), "foo").unwrap_err();
        assert!(matches!(err, ClaimError::InvalidAmountFormat(_)));
    }

    fn sample_claim() -> Claim {
        Claim {
            version: "2".to_string(),
            account: "rTESTADDRESS".to_string(),
            protocol: "XRPL.MAINNET".to_string(),
            currency: Currency {
                code: "XRP".to_string(),
                scale: 6,
            },
            destination_account: "rLggTEwmTe3eJgyQbCSk4wQazow2TeKrtR".to_string(),
            authorized_to_claim: Drops::new(1001),
            channel_id: ChannelId::new([0xAB; 32]),
            signature: "SIGVALUE".to_string(),
        }
    }

    #[test]
    fn test_envelope_field_order() {
        let json = serde_json::to_string(&sample_claim()).unwrap();
        let expected = format!(
            concat!(
                "{{\"version\":\"2\",",
                "\"account\":\"rTESTADDRESS\",",
                "\"protocol\":\"XRPL.MAINNET\",",
                "\"currency\":{{\"code\":\"XRP\",\"scale\":6}},",
                "\"destination_account\":\"rLggTEwmTe3eJgyQbCSk4wQazow2TeKrtR\",",
                "\"authorized_to_claim\":\"1001\",",
                "\"channel_id\":\"{}\",",
                "\"signature\":\"SIGVALUE\"}}"
            ),
            "AB".repeat(32)
        );
        assert_eq!(json, expected);
    }

    #[test]
    fn test_token_round_trip() {
        let claim = sample_claim();
        let token = AuthToken::encode(&claim).unwrap();
        assert_eq!(token.decode().unwrap(), claim);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let err = AuthToken::new("not!base64!").decode().unwrap_err();
        assert!(matches!(err, ClaimError::Serialization(_)));
    }
}
