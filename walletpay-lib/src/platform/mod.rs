//! Platform adapters: request builders and response mappers.
//!
//! Each wallet gets a [`RequestBuilder`] (canonical request → native
//! payload) and a [`ResponseMapper`] (native result → canonical result),
//! bundled behind [`WalletPlatform`] for the session bridge. Builders and
//! mappers are pure and synchronous.
//!
//! ```text
//!  PaymentRequest ──► RequestBuilder ──► native payload ──► host sheet
//!                                                              │
//!  PaymentResult  ◄── ResponseMapper ◄── NativeOutcome ◄───────┘
//! ```

pub mod apple;
pub mod google;

use crate::config::Environment;
use crate::constants::messages;
use crate::model::{PaymentNetwork, PaymentRequest, PaymentResult};
use crate::Result;

/// Which wallet a platform adapter targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlatformKind {
    ApplePay,
    GooglePay,
}

impl PlatformKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApplePay => "apple_pay",
            Self::GooglePay => "google_pay",
        }
    }
}

impl std::fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translate a canonical request into a native payload.
pub trait RequestBuilder {
    type Payload;

    /// Build the native payload for `environment`.
    ///
    /// Fails only on configuration errors, before any native interaction.
    fn build(&self, request: &PaymentRequest, environment: Environment) -> Result<Self::Payload>;
}

/// Normalize native outcomes into canonical results. Never fails.
pub trait ResponseMapper {
    type Success;

    fn from_native_success(&self, payload: Self::Success) -> PaymentResult;

    fn from_native_failure(&self, reason: FailureReason) -> PaymentResult {
        reason.into_result()
    }
}

/// Why an attempt ended without authorization.
///
/// The display string is the human-readable `PaymentResult::error`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FailureReason {
    /// Shopper dismissed the sheet.
    #[error("{}", messages::PAYMENT_CANCELLED)]
    Cancelled,
    /// No window or activity to present on.
    #[error("{}", messages::UNABLE_TO_PRESENT)]
    NoHostSurface,
    /// The native sheet could not be constructed.
    #[error("{}", messages::UNABLE_TO_CREATE)]
    UnableToCreate,
    /// Vendor-reported error with an optional status message.
    #[error("Payment error: {}", .0.as_deref().unwrap_or(messages::UNKNOWN_ERROR))]
    PlatformError(Option<String>),
    /// Success signal without a payload.
    #[error("{}", messages::NO_PAYMENT_DATA)]
    NoPaymentData,
    /// Activity finished with a code we do not recognize.
    #[error("Payment failed with result code: {0}")]
    UnexpectedResultCode(i32),
    /// Success payload could not be parsed.
    #[error("Failed to parse payment data: {0}")]
    MalformedResponse(String),
    /// Request failed validation before presentation.
    #[error("Invalid payment request: {0}")]
    InvalidRequest(String),
    /// Another attempt is in flight on the same session.
    #[error("{}", messages::PAYMENT_BUSY)]
    Busy,
    /// The completion receiver went away without reporting.
    #[error("{}", messages::PAYMENT_INTERRUPTED)]
    Interrupted,
}

impl FailureReason {
    pub fn into_result(self) -> PaymentResult {
        PaymentResult::failure(self.to_string())
    }
}

/// What the native platform reported for one attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum NativeOutcome<S> {
    Authorized(S),
    Failed(FailureReason),
}

impl<S> NativeOutcome<S> {
    pub fn cancelled() -> Self {
        Self::Failed(FailureReason::Cancelled)
    }

    pub fn error(status_message: Option<String>) -> Self {
        Self::Failed(FailureReason::PlatformError(status_message))
    }
}

/// A wallet as seen by the session bridge.
pub trait WalletPlatform: Send + Sync + 'static {
    /// Payload handed to the host to present the sheet.
    type Request: Send + std::fmt::Debug + 'static;
    /// Payload the host reports on authorization.
    type Success: Send + 'static;

    fn kind(&self) -> PlatformKind;

    /// Networks this wallet can express, used by availability checks.
    fn supported_networks(&self) -> &'static [PaymentNetwork];

    /// Environment for `request`, given the session default.
    fn environment_for(&self, _request: &PaymentRequest, fallback: Environment) -> Environment {
        fallback
    }

    fn build_request(
        &self,
        request: &PaymentRequest,
        environment: Environment,
    ) -> Result<Self::Request>;

    fn map_success(&self, payload: Self::Success) -> PaymentResult;

    fn map_failure(&self, reason: FailureReason) -> PaymentResult {
        reason.into_result()
    }

    fn map_outcome(&self, outcome: NativeOutcome<Self::Success>) -> PaymentResult {
        match outcome {
            NativeOutcome::Authorized(payload) => self.map_success(payload),
            NativeOutcome::Failed(reason) => self.map_failure(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            FailureReason::Cancelled.to_string(),
            "Payment cancelled by user"
        );
        assert_eq!(
            FailureReason::NoHostSurface.to_string(),
            "Unable to present payment authorization"
        );
        assert_eq!(
            FailureReason::PlatformError(Some("DEVELOPER_ERROR".into())).to_string(),
            "Payment error: DEVELOPER_ERROR"
        );
        assert_eq!(
            FailureReason::PlatformError(None).to_string(),
            "Payment error: Unknown error"
        );
        assert_eq!(
            FailureReason::UnexpectedResultCode(42).to_string(),
            "Payment failed with result code: 42"
        );
    }

    #[test]
    fn test_failure_into_result() {
        let result = FailureReason::Cancelled.into_result();
        assert!(!result.success);
        assert!(result.token.is_none());
        assert!(result.transaction_id.is_none());
        assert_eq!(result.error.as_deref(), Some("Payment cancelled by user"));
    }
}
