//! Wallet collaborator seam.

use crate::errors::Result;

/// Holder of the session account's key material.
///
/// Methods are synchronous: implementations operate on local keys, unlike
/// the networked ledger seam. Private keys never cross this boundary; the
/// session manager only ever sees addresses, public keys, and signatures.
pub trait WalletSigner: Send + Sync {
    /// Classic address of the account.
    fn address(&self) -> String;

    /// Hex public key, as placed in channel-create transactions.
    fn public_key(&self) -> String;

    /// Sign a prepared transaction, returning the signed blob to submit.
    fn sign_transaction(&self, prepared: &serde_json::Value) -> Result<String>;

    /// Sign a claim digest (the uppercase hex of the claim message),
    /// returning the signature in the signer's own encoding.
    fn sign_claim_digest(&self, digest_hex: &str) -> Result<String>;
}
