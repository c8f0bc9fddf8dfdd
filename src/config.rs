//! Deployment configuration for channel sessions.

use serde::{Deserialize, Serialize};

/// Seconds a counterparty must wait between requesting settlement and
/// closing a newly created channel: 14 days.
pub const DEFAULT_SETTLE_DELAY_SECS: u32 = 86_400 * 14;

/// Protocol constants for a channel session: the fixed service destination
/// plus the values stamped into every claim envelope.
///
/// `Default` carries the published mainnet deployment values; use the
/// builders to target another deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Account claims are payable to.
    pub destination: String,
    /// Protocol identifier stamped into claims.
    #[serde(default = "default_protocol")]
    pub protocol: String,
    /// Claim format version.
    #[serde(default = "default_claim_version")]
    pub claim_version: String,
    /// Currency code stamped into claims.
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
    /// Decimal scale of the currency: drops per unit as a power of ten.
    #[serde(default = "default_currency_scale")]
    pub currency_scale: u8,
    /// Settle delay for newly created channels, in seconds.
    #[serde(default = "default_settle_delay")]
    pub settle_delay_secs: u32,
}

fn default_destination() -> String {
    "rLggTEwmTe3eJgyQbCSk4wQazow2TeKrtR".to_string()
}

fn default_protocol() -> String {
    "XRPL.MAINNET".to_string()
}

fn default_claim_version() -> String {
    "2".to_string()
}

fn default_currency_code() -> String {
    "XRP".to_string()
}

fn default_currency_scale() -> u8 {
    6
}

fn default_settle_delay() -> u32 {
    DEFAULT_SETTLE_DELAY_SECS
}

impl ChannelConfig {
    /// Create a configuration for a custom destination, with mainnet
    /// values for everything else.
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            protocol: default_protocol(),
            claim_version: default_claim_version(),
            currency_code: default_currency_code(),
            currency_scale: default_currency_scale(),
            settle_delay_secs: default_settle_delay(),
        }
    }

    /// Set the protocol identifier.
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Set the claim format version.
    pub fn with_claim_version(mut self, version: impl Into<String>) -> Self {
        self.claim_version = version.into();
        self
    }

    /// Set the currency code and scale.
    pub fn with_currency(mut self, code: impl Into<String>, scale: u8) -> Self {
        self.currency_code = code.into();
        self.currency_scale = scale;
        self
    }

    /// Set the settle delay for newly created channels.
    pub fn with_settle_delay(mut self, secs: u32) -> Self {
        self.settle_delay_secs = secs;
        self
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self::new(default_destination())
    }
}
