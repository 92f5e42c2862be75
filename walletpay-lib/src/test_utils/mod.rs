//! Test utilities for walletpay.
//!
//! Mock hosts that stand in for the Swift/Kotlin shims, request and payload
//! fixtures, and assertion helpers for [`PaymentResult`](crate::PaymentResult).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use walletpay_lib::test_utils::{coffee_request, HostBehavior, MockSheetHost};
//!
//! let host = Arc::new(MockSheetHost::<ApplePay>::new());
//! let session = PaymentSession::new(ApplePay::new(), host.clone(), SessionConfig::default());
//!
//! let task = tokio::spawn(async move { session.start_payment(&coffee_request()).await });
//! host.wait_for_completion().await.complete(NativeOutcome::cancelled());
//! assert_payment_failed(&task.await?, "Payment cancelled by user");
//! ```

mod assertions;
mod fixtures;
mod mock_host;

pub use assertions::{assert_payment_failed, assert_payment_succeeded};
pub use fixtures::{
    apple_payment, coffee_request, google_payment_data, GOOGLE_PAYMENT_DATA_JSON,
};
pub use mock_host::{HostBehavior, MockAvailability, MockSheetHost};
