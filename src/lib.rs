//! Off-ledger payment-channel claims for XRPL-style ledgers.
//!
//! A payer funds a payment channel to a fixed service destination once,
//! then authorizes spend incrementally by signing claims over the channel
//! instead of submitting a ledger transaction per use. This crate builds
//! the deterministic 44-byte claim messages, formats their digests for a
//! signer, and packages signed claims into portable base64 tokens. A
//! [`ChannelManager`] drives the whole session: it finds or creates the
//! channel, deposits into it, and issues tokens, delegating all network
//! and key operations to injected [`LedgerClient`] and [`WalletSigner`]
//! collaborators.
//!
//! The claim encoding is pure and bit-exact:
//!
//! ```
//! # fn demo() -> claimkit::Result<()> {
//! use claimkit::build_authorization_hex;
//!
//! let digest = build_authorization_hex(&"AB".repeat(32), "1000")?;
//! assert!(digest.starts_with("434C4D00"));
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

pub mod channel;
pub mod claim;
pub mod config;
pub mod drops;
pub mod errors;
pub mod ledger;
pub mod manager;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
pub mod wallet;

pub use channel::{Channel, ChannelId, CHANNEL_ID_LEN};
pub use claim::{
    build_authorization_hex, serialize_authorization, AuthToken, Claim, Currency,
    CLAIM_MESSAGE_LEN, HASH_PREFIX_PAYMENT_CHANNEL_CLAIM,
};
pub use config::{ChannelConfig, DEFAULT_SETTLE_DELAY_SECS};
pub use drops::Drops;
pub use errors::{ClaimError, Result};
pub use ledger::{ChannelTransaction, LedgerClient};
pub use manager::{ChannelManager, SessionState};
pub use wallet::WalletSigner;
