//! Channel session management: discovery, funding, and claim issuance.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::channel::Channel;
use crate::claim::{build_authorization_hex, AuthToken, Claim, Currency};
use crate::config::ChannelConfig;
use crate::drops::Drops;
use crate::errors::{ClaimError, Result};
use crate::ledger::{ChannelTransaction, LedgerClient};
use crate::wallet::WalletSigner;

/// Connection state of a session. Advances monotonically from
/// `Uninitialized` through `Connected` to `Ready`; a failed connect
/// leaves the session `Uninitialized` and the next operation retries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Constructed; the ledger link has not been established.
    Uninitialized,
    /// The ledger link is up; session setup is completing.
    Connected,
    /// Operations may proceed.
    Ready,
}

/// Outcome of a channel lookup: the session's channel, or the definite
/// absence of one. Absence is ordinary data here, not an error; it is
/// what sends `deposit` down the create path.
enum ChannelLookup {
    Found(Channel),
    NotFound,
}

/// Manages one payment-channel session between a wallet's account and a
/// fixed destination: finds or creates the channel, deposits into it, and
/// issues signed claim tokens against it.
///
/// Construction does not touch the network. The first operation connects
/// the ledger collaborator exactly once, shared across concurrent callers.
/// Operations on one manager do not synchronize with each other beyond
/// that: the capacity check in [`get_auth_token`](Self::get_auth_token)
/// reads channel state that is not locked against concurrent funding or
/// issuance, so callers that must never oversubscribe a channel need an
/// external serialization point.
pub struct ChannelManager {
    config: ChannelConfig,
    ledger: Arc<Box<dyn LedgerClient>>,
    wallet: Arc<Box<dyn WalletSigner>>,
    session: OnceCell<()>,
    link_up: AtomicBool,
}

impl ChannelManager {
    pub fn new(
        config: ChannelConfig,
        ledger: Arc<Box<dyn LedgerClient>>,
        wallet: Arc<Box<dyn WalletSigner>>,
    ) -> Self {
        Self {
            config,
            ledger,
            wallet,
            session: OnceCell::new(),
            link_up: AtomicBool::new(false),
        }
    }

    /// The session's configuration.
    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        if self.session.initialized() {
            SessionState::Ready
        } else if self.link_up.load(Ordering::Acquire) {
            SessionState::Connected
        } else {
            SessionState::Uninitialized
        }
    }

    /// Drive the session to `Ready`, connecting the ledger collaborator on
    /// first use. Concurrent first calls share a single connect.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub async fn ready(&self) -> Result<()> {
        self.session
            .get_or_try_init(|| async {
                self.ledger.connect().await?;
                self.link_up.store(true, Ordering::Release);
                Ok::<(), ClaimError>(())
            })
            .await?;
        Ok(())
    }

    /// Locate the open channel from the wallet's account to the configured
    /// destination.
    ///
    /// The ledger may list several channels for the pair; the first listed
    /// is the session's channel. Errors with
    /// [`ClaimError::ChannelNotFound`] when none is open.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), fields(destination = %self.config.destination)))]
    pub async fn find_channel(&self) -> Result<Channel> {
        self.ready().await?;
        self.require_channel().await
    }

    /// Fund the session's channel with `amount` drops, opening the channel
    /// first if none exists.
    ///
    /// Blocks until the ledger reports a final outcome and returns that
    /// payload verbatim; ledger-level success or failure is the caller's
    /// to inspect. A failed deposit leaves ledger state exactly as the
    /// network left it.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), fields(amount = %amount)))]
    pub async fn deposit(&self, amount: Drops) -> Result<serde_json::Value> {
        self.ready().await?;
        let account = self.wallet.address();

        // 1. Fund the existing channel, or create one if none is open.
        let tx = match self.lookup_channel().await? {
            ChannelLookup::Found(channel) => ChannelTransaction::PaymentChannelFund {
                account,
                channel: channel.channel_id,
                amount,
            },
            ChannelLookup::NotFound => {
                tracing_debug(&format!(
                    "no open channel to {}; creating one",
                    self.config.destination
                ));
                ChannelTransaction::PaymentChannelCreate {
                    account,
                    destination: self.config.destination.clone(),
                    amount,
                    settle_delay: self.config.settle_delay_secs,
                    public_key: self.wallet.public_key(),
                }
            }
        };

        // 2. Autofill network-determined fields (sequence, fee).
        let prepared = self.ledger.autofill(&tx).await?;

        // 3. Sign, submit, and wait for the final ledger outcome.
        let tx_blob = self.wallet.sign_transaction(&prepared)?;
        self.ledger.submit_and_wait(&tx_blob).await
    }

    /// Issue a signed claim token for `amount` drops, or for the channel's
    /// full deposited amount when `amount` is `None`.
    ///
    /// Purely read-and-sign: no ledger writes. Errors with
    /// [`ClaimError::AuthorizationExceedsCapacity`] when the requested
    /// amount exceeds what the channel holds.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), fields(amount = ?amount)))]
    pub async fn get_auth_token(&self, amount: Option<Drops>) -> Result<AuthToken> {
        self.ready().await?;
        let channel = self.require_channel().await?;

        // 1. Default to the full deposited amount; never authorize past it.
        let allowed = amount.unwrap_or(channel.amount);
        if allowed > channel.amount {
            return Err(ClaimError::AuthorizationExceedsCapacity {
                requested: allowed.as_u64(),
                capacity: channel.amount.as_u64(),
            });
        }

        // 2. Sign the claim digest.
        let digest = build_authorization_hex(&channel.channel_id.to_hex(), &allowed.to_string())?;
        let signature = self.wallet.sign_claim_digest(&digest)?;

        // 3. Assemble the portable envelope.
        let claim = Claim {
            version: self.config.claim_version.clone(),
            account: self.wallet.address(),
            protocol: self.config.protocol.clone(),
            currency: Currency {
                code: self.config.currency_code.clone(),
                scale: self.config.currency_scale,
            },
            destination_account: self.config.destination.clone(),
            authorized_to_claim: allowed,
            channel_id: channel.channel_id,
            signature,
        };
        AuthToken::encode(&claim)
    }

    async fn lookup_channel(&self) -> Result<ChannelLookup> {
        let account = self.wallet.address();
        let channels = self
            .ledger
            .account_channels(&account, &self.config.destination)
            .await?;
        // the first listed channel is the session's channel
        Ok(match channels.into_iter().next() {
            Some(channel) => ChannelLookup::Found(channel),
            None => ChannelLookup::NotFound,
        })
    }

    async fn require_channel(&self) -> Result<Channel> {
        match self.lookup_channel().await? {
            ChannelLookup::Found(channel) => Ok(channel),
            ChannelLookup::NotFound => Err(ClaimError::ChannelNotFound {
                account: self.wallet.address(),
                destination: self.config.destination.clone(),
            }),
        }
    }
}

// Event helper; compiles away without the tracing feature
fn tracing_debug(_msg: &str) {
    #[cfg(feature = "tracing")]
    tracing::debug!("{}", _msg);
}
