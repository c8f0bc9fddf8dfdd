//! Ledger collaborator seam and channel transaction requests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::channel::{Channel, ChannelId};
use crate::drops::Drops;
use crate::errors::Result;

/// A partial channel transaction, completed by the ledger's autofill and
/// signed by the wallet before submission.
///
/// Serializes to the ledger's transaction JSON: tagged by
/// `TransactionType`, PascalCase fields, drop amounts as decimal strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "TransactionType")]
pub enum ChannelTransaction {
    /// Add funds to an existing channel.
    #[serde(rename_all = "PascalCase")]
    PaymentChannelFund {
        account: String,
        channel: ChannelId,
        amount: Drops,
    },
    /// Open a new channel to a destination.
    #[serde(rename_all = "PascalCase")]
    PaymentChannelCreate {
        account: String,
        destination: String,
        amount: Drops,
        settle_delay: u32,
        public_key: String,
    },
}

/// Connection to a ledger node, scoped to what channel sessions need.
///
/// Implementations own transport, timeout, and retry policy; the session
/// manager treats every error from these methods as fatal to the
/// operation in flight.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Establish the connection. Called once per session, before any
    /// other method.
    async fn connect(&self) -> Result<()>;

    /// List open channels from `account` to `destination` in validated
    /// ledger state. Listing order is ledger-defined and must be
    /// preserved.
    async fn account_channels(&self, account: &str, destination: &str) -> Result<Vec<Channel>>;

    /// Complete a partial transaction with network-determined fields
    /// (sequence number, fee) and return the prepared transaction.
    async fn autofill(&self, tx: &ChannelTransaction) -> Result<serde_json::Value>;

    /// Submit a signed transaction blob and wait for the final ledger
    /// outcome, returning the outcome payload verbatim.
    async fn submit_and_wait(&self, tx_blob: &str) -> Result<serde_json::Value>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fund_wire_shape() {
        let tx = ChannelTransaction::PaymentChannelFund {
            account: "rTESTADDRESS".to_string(),
            channel: ChannelId::new([0xAB; 32]),
            amount: Drops::new(100),
        };
        assert_eq!(
            serde_json::to_value(&tx).unwrap(),
            json!({
                "TransactionType": "PaymentChannelFund",
                "Account": "rTESTADDRESS",
                "Channel": "AB".repeat(32),
                "Amount": "100",
            })
        );
    }

    #[test]
    fn test_create_wire_shape() {
        let tx = ChannelTransaction::PaymentChannelCreate {
            account: "rTESTADDRESS".to_string(),
            destination: "rLggTEwmTe3eJgyQbCSk4wQazow2TeKrtR".to_string(),
            amount: Drops::new(200),
            settle_delay: 86_400 * 14,
            public_key: "PUBKEY".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&tx).unwrap(),
            json!({
                "TransactionType": "PaymentChannelCreate",
                "Account": "rTESTADDRESS",
                "Destination": "rLggTEwmTe3eJgyQbCSk4wQazow2TeKrtR",
                "Amount": "200",
                "SettleDelay": 1_209_600,
                "PublicKey": "PUBKEY",
            })
        );
    }

    #[test]
    fn test_wire_round_trip() {
        let tx = ChannelTransaction::PaymentChannelFund {
            account: "rTESTADDRESS".to_string(),
            channel: ChannelId::new([0x11; 32]),
            amount: Drops::new(42),
        };
        let json = serde_json::to_string(&tx).unwrap();
        let back: ChannelTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }
}
