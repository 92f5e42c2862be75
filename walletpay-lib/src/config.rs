//! Configuration types for payment sessions and platform hints.

use serde::{Deserialize, Serialize};

/// Wallet environment selection.
///
/// `Test` routes the sheet to the vendor sandbox; `Production` is live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Environment {
    /// Vendor sandbox.
    #[default]
    Test,
    /// Live payments.
    Production,
}

impl Environment {
    /// Get the environment name as used in logs and native payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Test => "TEST",
            Self::Production => "PRODUCTION",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Google Pay specific hints carried on a [`PaymentRequest`](crate::PaymentRequest).
///
/// Apple Pay ignores these.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePayOptions {
    /// Environment override; falls back to the session environment.
    #[serde(default)]
    pub environment: Option<Environment>,

    /// Tokenization gateway name (e.g. "stripe").
    #[serde(default)]
    pub gateway: Option<String>,

    /// Merchant id registered with the gateway.
    #[serde(default)]
    pub gateway_merchant_id: Option<String>,
}

impl GooglePayOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the environment override.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Set the tokenization gateway.
    pub fn with_gateway(mut self, gateway: impl Into<String>) -> Self {
        self.gateway = Some(gateway.into());
        self
    }

    /// Set the gateway merchant id.
    pub fn with_gateway_merchant_id(mut self, id: impl Into<String>) -> Self {
        self.gateway_merchant_id = Some(id.into());
        self
    }
}

/// Configuration for a [`PaymentSession`](crate::session::PaymentSession).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Environment used when the request carries no override.
    #[serde(default)]
    pub environment: Environment,

    /// Log built native payloads at debug level (requires the `tracing` feature).
    #[serde(default = "default_log_payloads")]
    pub log_payloads: bool,
}

fn default_log_payloads() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            log_payloads: default_log_payloads(),
        }
    }
}

impl SessionConfig {
    /// Create a configuration for the given environment.
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            ..Self::default()
        }
    }

    /// Enable or disable payload logging.
    pub fn with_log_payloads(mut self, enabled: bool) -> Self {
        self.log_payloads = enabled;
        self
    }
}
