//! Error taxonomy for claim encoding and channel sessions.
//!
//! Every violation is raised synchronously at the point of detection and
//! names the offending values. Nothing here is retried or recovered
//! locally; collaborator failures surface through [`ClaimError::Ledger`]
//! and [`ClaimError::Signing`] and are fatal to the operation in flight.

/// Result type for claim operations.
pub type Result<T> = std::result::Result<T, ClaimError>;

/// Errors produced by claim encoding and channel session management.
#[derive(thiserror::Error, Debug)]
pub enum ClaimError {
    /// Channel identifier was not valid hex or did not decode to 32 bytes.
    #[error("invalid channel id: {0}")]
    InvalidChannelId(String),
    /// Amount string was not a base-10 integer representable in 64 bits.
    #[error("invalid amount format: {0}")]
    InvalidAmountFormat(String),
    /// Amount string parsed as an integer below zero.
    #[error("amount cannot be negative: {0}")]
    NegativeAmount(String),
    /// No open channel exists between the account and the destination.
    #[error("no open payment channel from {account} to {destination}")]
    ChannelNotFound {
        account: String,
        destination: String,
    },
    /// Requested authorization exceeds the channel's deposited total.
    #[error("requested auth {requested} exceeds channel capacity {capacity}")]
    AuthorizationExceedsCapacity { requested: u64, capacity: u64 },
    /// Ledger collaborator failure (connection, query, or submission).
    #[error("ledger error: {0}")]
    Ledger(String),
    /// Wallet collaborator failure while signing.
    #[error("signing error: {0}")]
    Signing(String),
    /// Claim envelope could not be serialized or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ClaimError {
    fn from(e: serde_json::Error) -> Self {
        ClaimError::Serialization(e.to_string())
    }
}
