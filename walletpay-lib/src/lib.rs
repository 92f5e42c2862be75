//! Walletpay library.
//!
//! Describe a purchase once as a vendor-neutral [`PaymentRequest`], run it
//! through Apple Pay or Google Pay, and get back one normalized
//! [`PaymentResult`]. The crate holds no UI code: the native sheet is driven
//! by a host shim (Swift or Kotlin) through the [`PaymentSheetHost`] trait.
//!
//! # Features
//!
//! - **Canonical model**: items, networks, capabilities and results shared by both wallets
//! - **Request builders**: canonical request → `PKPaymentRequest` / `PaymentDataRequest` payloads
//! - **Response mappers**: native outcomes → [`PaymentResult`], never failing
//! - **Session bridge**: one awaitable, at-most-once `start_payment` per attempt
//! - **Availability probing**: network membership and device capability snapshots
//!
//! # Example
//!
//! ```ignore
//! use walletpay_lib::prelude::*;
//!
//! let session = PaymentSession::new(GooglePay::new(), my_host, SessionConfig::default());
//!
//! let request = PaymentRequest::new("merchant.com.example", "US", "USD")
//!     .with_item(PaymentItem::final_item("Coffee", parse_amount("4.99")?))
//!     .with_item(PaymentItem::final_item("Tax", parse_amount("0.50")?))
//!     .with_supported_networks(CommonNetworks::all());
//!
//! let result = session.start_payment(&request).await;
//! if result.success {
//!     forward_to_processor(result.token.unwrap().payment_data);
//! }
//! ```

pub mod availability;
pub mod config;
pub mod constants;
pub mod errors;
pub mod model;
pub mod platform;
pub mod prelude;
pub mod session;

/// Mock hosts, fixtures and assertions for payment testing.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use availability::{AvailabilityProber, PlatformProber, WalletAvailability};
pub use config::{Environment, GooglePayOptions, SessionConfig};
pub use errors::{WalletPayError, WalletPayErrorCode};
pub use model::{
    PayServiceStatus, PaymentItem, PaymentItemType, PaymentMethod, PaymentMethodType,
    PaymentNetwork, PaymentRequest, PaymentResult, PaymentToken,
};
pub use platform::{FailureReason, NativeOutcome, PlatformKind, WalletPlatform};
pub use session::{NativeCompletion, PaymentService, PaymentSession, PaymentSheetHost};

/// Common result alias for walletpay operations.
pub type Result<T> = std::result::Result<T, WalletPayError>;
