//! Mock collaborators for exercising channel sessions without a network.
//!
//! [`MockLedger`] is scriptable: tests seed its channel listing, script
//! connect and query failures, choose the submit outcome, and inspect
//! everything the manager sent it.
//! [`MockWallet`] is deterministic and records the digests it signs. Both
//! are cheaply cloneable handles over shared state, so a test can keep a
//! handle for inspection after the manager takes ownership of its copy.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use crate::channel::Channel;
use crate::errors::{ClaimError, Result};
use crate::ledger::{ChannelTransaction, LedgerClient};
use crate::wallet::WalletSigner;

/// In-memory ledger with scripted responses and call capture.
#[derive(Clone, Default)]
pub struct MockLedger {
    inner: Arc<MockLedgerInner>,
}

#[derive(Default)]
struct MockLedgerInner {
    channels: Mutex<Vec<Channel>>,
    submit_outcome: Mutex<Option<serde_json::Value>>,
    connect_calls: AtomicUsize,
    connect_failures: AtomicUsize,
    query_failures: AtomicUsize,
    channel_queries: Mutex<Vec<(String, String)>>,
    autofill_requests: Mutex<Vec<ChannelTransaction>>,
    submitted_blobs: Mutex<Vec<String>>,
}

impl MockLedger {
    /// Create a ledger with no channels and a trivial submit outcome.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a channel to the listing returned by `account_channels`.
    pub fn push_channel(&self, channel: Channel) {
        self.inner.channels.lock().unwrap().push(channel);
    }

    /// Make the next `n` connect attempts fail.
    pub fn fail_next_connects(&self, n: usize) {
        self.inner.connect_failures.store(n, Ordering::SeqCst);
    }

    /// Make the next `n` channel-listing queries fail.
    pub fn fail_next_queries(&self, n: usize) {
        self.inner.query_failures.store(n, Ordering::SeqCst);
    }

    /// Set the outcome payload `submit_and_wait` resolves with.
    pub fn set_submit_outcome(&self, outcome: serde_json::Value) {
        *self.inner.submit_outcome.lock().unwrap() = Some(outcome);
    }

    /// How many times `connect` has been called.
    pub fn connect_count(&self) -> usize {
        self.inner.connect_calls.load(Ordering::SeqCst)
    }

    /// Every (account, destination) pair queried so far.
    pub fn channel_queries(&self) -> Vec<(String, String)> {
        self.inner.channel_queries.lock().unwrap().clone()
    }

    /// Every transaction handed to `autofill` so far.
    pub fn autofill_requests(&self) -> Vec<ChannelTransaction> {
        self.inner.autofill_requests.lock().unwrap().clone()
    }

    /// Every signed blob handed to `submit_and_wait` so far.
    pub fn submitted_blobs(&self) -> Vec<String> {
        self.inner.submitted_blobs.lock().unwrap().clone()
    }
}

#[async_trait]
impl LedgerClient for MockLedger {
    async fn connect(&self) -> Result<()> {
        self.inner.connect_calls.fetch_add(1, Ordering::SeqCst);
        let failures = &self.inner.connect_failures;
        if failures.load(Ordering::SeqCst) > 0 {
            failures.fetch_sub(1, Ordering::SeqCst);
            return Err(ClaimError::Ledger("mock connect failure".to_string()));
        }
        Ok(())
    }

    async fn account_channels(&self, account: &str, destination: &str) -> Result<Vec<Channel>> {
        self.inner
            .channel_queries
            .lock()
            .unwrap()
            .push((account.to_string(), destination.to_string()));
        let failures = &self.inner.query_failures;
        if failures.load(Ordering::SeqCst) > 0 {
            failures.fetch_sub(1, Ordering::SeqCst);
            return Err(ClaimError::Ledger("mock query failure".to_string()));
        }
        Ok(self.inner.channels.lock().unwrap().clone())
    }

    async fn autofill(&self, tx: &ChannelTransaction) -> Result<serde_json::Value> {
        self.inner
            .autofill_requests
            .lock()
            .unwrap()
            .push(tx.clone());
        // echo the transaction with the fields a live node would assign
        let mut prepared = serde_json::to_value(tx)?;
        if let Some(obj) = prepared.as_object_mut() {
            obj.insert("Sequence".to_string(), json!(1));
            obj.insert("Fee".to_string(), json!("10"));
        }
        Ok(prepared)
    }

    async fn submit_and_wait(&self, tx_blob: &str) -> Result<serde_json::Value> {
        self.inner
            .submitted_blobs
            .lock()
            .unwrap()
            .push(tx_blob.to_string());
        let outcome = self.inner.submit_outcome.lock().unwrap().clone();
        Ok(outcome.unwrap_or_else(|| json!({ "validated": true })))
    }
}

/// Deterministic wallet with recognizable signatures.
///
/// Transaction blobs come back as `SIGNED:<TransactionType>` and claim
/// signatures as `SIGVALUE`, so assertions can trace exactly what was
/// signed and submitted.
#[derive(Clone)]
pub struct MockWallet {
    address: String,
    public_key: String,
    signed_digests: Arc<Mutex<Vec<String>>>,
}

impl MockWallet {
    pub fn new() -> Self {
        Self::with_identity("rTESTADDRESS", "PUBKEY")
    }

    /// Create a wallet with a specific address and public key.
    pub fn with_identity(address: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            public_key: public_key.into(),
            signed_digests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every claim digest handed to `sign_claim_digest` so far.
    pub fn signed_digests(&self) -> Vec<String> {
        self.signed_digests.lock().unwrap().clone()
    }
}

impl Default for MockWallet {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletSigner for MockWallet {
    fn address(&self) -> String {
        self.address.clone()
    }

    fn public_key(&self) -> String {
        self.public_key.clone()
    }

    fn sign_transaction(&self, prepared: &serde_json::Value) -> Result<String> {
        let tx_type = prepared
            .get("TransactionType")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                ClaimError::Signing("prepared transaction has no TransactionType".to_string())
            })?;
        Ok(format!("SIGNED:{tx_type}"))
    }

    fn sign_claim_digest(&self, digest_hex: &str) -> Result<String> {
        self.signed_digests
            .lock()
            .unwrap()
            .push(digest_hex.to_string());
        Ok("SIGVALUE".to_string())
    }
}
