//! Host FFI Bindings for the Native Wallet Sheets
//!
//! The Swift and Kotlin shims implement [`ApplePayHostFFI`] and
//! [`GooglePayHostFFI`]. Bridges adapt them to the core
//! [`PaymentSheetHost`] trait so a `PaymentSession` can drive them.
//!
//! ```text
//! ┌───────────────────────────────┐      present(json, completion)
//! │  PaymentSession (Rust)        │ ───────────────────────────────┐
//! └───────────────────────────────┘                                ▼
//!                ▲                          ┌─────────────────────────────────┐
//!                │ one PaymentResult        │  Swift / Kotlin shim            │
//!                │                          │  PKPaymentAuthorizationController│
//! ┌───────────────────────────────┐         │  / AutoResolveHelper            │
//! │  ApplePayCompletion /         │ ◄────── └─────────────────────────────────┘
//! │  GooglePayCompletion          │   delegate / onActivityResult
//! └───────────────────────────────┘
//! ```
//!
//! # Example (Swift)
//!
//! ```swift
//! final class PassKitHost: ApplePayHostFFI {
//!     func present(requestJson: String, completion: ApplePayCompletion) throws {
//!         let request = try PKPaymentRequest.decode(requestJson)
//!         let delegate = PaymentDelegate(completion: completion)
//!         let controller = PKPaymentAuthorizationController(paymentRequest: request)
//!         controller.delegate = delegate
//!         controller.present { presented in
//!             if !presented { completion.didFailToPresent() }
//!         }
//!     }
//!     // ... availability methods
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use walletpay_lib::platform::apple::{ApplePay, ApplePayRequest};
use walletpay_lib::platform::google::{GoogleActivityResult, GooglePay, GooglePayRequest};
use walletpay_lib::{
    FailureReason, NativeCompletion, NativeOutcome, PaymentSheetHost, WalletAvailability,
    WalletPayError,
};

use crate::{ApplePayPaymentFFI, EnvironmentFFI, WalletPayMobileError};

// ============================================================================
// Apple Pay
// ============================================================================

/// Apple Pay host implemented in Swift.
#[uniffi::export(callback_interface)]
pub trait ApplePayHostFFI: Send + Sync {
    /// `PKPaymentAuthorizationController.canMakePayments()`.
    fn can_make_payments(&self) -> Result<bool, WalletPayMobileError>;

    /// `canMakePayments(usingNetworks: [])`.
    fn can_setup_cards(&self) -> Result<bool, WalletPayMobileError>;

    /// Whether a key window is available.
    fn can_present(&self) -> bool;

    /// Present the authorization sheet for the camelCase `PKPaymentRequest` JSON.
    ///
    /// The delegate must forward to `completion`.
    fn present(
        &self,
        request_json: String,
        completion: Arc<ApplePayCompletion>,
    ) -> Result<(), WalletPayMobileError>;
}

/// Completion target for one Apple Pay sheet.
///
/// Mirrors `PKPaymentAuthorizationControllerDelegate`: finishing without
/// authorizing first is a cancellation.
#[derive(uniffi::Object)]
pub struct ApplePayCompletion {
    inner: NativeCompletion<ApplePay>,
    authorized: AtomicBool,
}

impl ApplePayCompletion {
    pub fn new(inner: NativeCompletion<ApplePay>) -> Self {
        Self {
            inner,
            authorized: AtomicBool::new(false),
        }
    }
}

#[uniffi::export]
impl ApplePayCompletion {
    /// `didAuthorizePayment`.
    pub fn did_authorize_payment(&self, payment: ApplePayPaymentFFI) -> bool {
        self.authorized.store(true, Ordering::Release);
        self.inner.complete(NativeOutcome::Authorized(payment.into()))
    }

    /// `paymentAuthorizationControllerDidFinish`.
    pub fn did_finish(&self) -> bool {
        if self.authorized.load(Ordering::Acquire) {
            return false;
        }
        self.inner.complete(NativeOutcome::cancelled())
    }

    /// `present(completion:)` reported `false`.
    pub fn did_fail_to_present(&self) -> bool {
        self.inner
            .complete(NativeOutcome::Failed(FailureReason::NoHostSurface))
    }

    pub fn is_resolved(&self) -> bool {
        self.inner.is_resolved()
    }
}

/// Adapts an [`ApplePayHostFFI`] to [`PaymentSheetHost`].
pub struct ApplePayHostBridge {
    ffi: Arc<dyn ApplePayHostFFI>,
}

impl ApplePayHostBridge {
    pub fn new(ffi: Arc<dyn ApplePayHostFFI>) -> Self {
        Self { ffi }
    }
}

impl std::fmt::Debug for ApplePayHostBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplePayHostBridge")
            .field("ffi", &"<ApplePayHostFFI>")
            .finish()
    }
}

impl WalletAvailability for ApplePayHostBridge {
    fn can_make_payments(&self) -> walletpay_lib::Result<bool> {
        self.ffi
            .can_make_payments()
            .map_err(|e| WalletPayError::Platform(e.to_string()))
    }

    fn can_setup_cards(&self) -> walletpay_lib::Result<bool> {
        self.ffi
            .can_setup_cards()
            .map_err(|e| WalletPayError::Platform(e.to_string()))
    }
}

impl PaymentSheetHost<ApplePay> for ApplePayHostBridge {
    fn can_present(&self) -> bool {
        self.ffi.can_present()
    }

    fn present(
        &self,
        request: ApplePayRequest,
        completion: NativeCompletion<ApplePay>,
    ) -> walletpay_lib::Result<()> {
        let json = request.to_json()?;
        self.ffi
            .present(json, Arc::new(ApplePayCompletion::new(completion)))
            .map_err(|e| WalletPayError::SheetUnavailable(e.to_string()))
    }
}

// ============================================================================
// Google Pay
// ============================================================================

/// Google Pay host implemented in Kotlin.
#[uniffi::export(callback_interface)]
pub trait GooglePayHostFFI: Send + Sync {
    /// `PaymentsClient.isReadyToPay` for the `IsReadyToPayRequest` JSON.
    fn is_ready_to_pay(&self, request_json: String) -> Result<bool, WalletPayMobileError>;

    /// Whether a current activity is available.
    fn can_present(&self) -> bool;

    /// `AutoResolveHelper.resolveTask(loadPaymentData(..), activity, 991)`.
    ///
    /// `onActivityResult` must forward to `completion`.
    fn load_payment_data(
        &self,
        environment: EnvironmentFFI,
        request_json: String,
        completion: Arc<GooglePayCompletion>,
    ) -> Result<(), WalletPayMobileError>;
}

/// Completion target for one `loadPaymentData` resolution.
#[derive(uniffi::Object)]
pub struct GooglePayCompletion {
    inner: NativeCompletion<GooglePay>,
}

impl GooglePayCompletion {
    pub fn new(inner: NativeCompletion<GooglePay>) -> Self {
        Self { inner }
    }
}

#[uniffi::export]
impl GooglePayCompletion {
    /// Forward `onActivityResult`.
    ///
    /// Returns `false` for other request codes, leaving the attempt pending.
    pub fn on_activity_result(
        &self,
        request_code: i32,
        result_code: i32,
        payment_data_json: Option<String>,
        status_message: Option<String>,
    ) -> bool {
        let result = GoogleActivityResult {
            request_code,
            result_code,
            payment_data_json,
            status_message,
        };
        match result.into_outcome() {
            Some(outcome) => self.inner.complete(outcome),
            None => false,
        }
    }

    /// `loadPaymentData` threw before the sheet appeared.
    pub fn on_launch_failed(&self, message: Option<String>) -> bool {
        self.inner.complete(NativeOutcome::error(message))
    }

    pub fn is_resolved(&self) -> bool {
        self.inner.is_resolved()
    }
}

/// Adapts a [`GooglePayHostFFI`] to [`PaymentSheetHost`].
pub struct GooglePayHostBridge {
    ffi: Arc<dyn GooglePayHostFFI>,
}

impl GooglePayHostBridge {
    pub fn new(ffi: Arc<dyn GooglePayHostFFI>) -> Self {
        Self { ffi }
    }

    fn is_ready_to_pay(&self) -> walletpay_lib::Result<bool> {
        let request = GooglePay::new().is_ready_to_pay_request().to_json()?;
        self.ffi
            .is_ready_to_pay(request)
            .map_err(|e| WalletPayError::Platform(e.to_string()))
    }
}

impl std::fmt::Debug for GooglePayHostBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GooglePayHostBridge")
            .field("ffi", &"<GooglePayHostFFI>")
            .finish()
    }
}

/// Google Pay has no separate provisioning probe; both answers come from `isReadyToPay`.
impl WalletAvailability for GooglePayHostBridge {
    fn can_make_payments(&self) -> walletpay_lib::Result<bool> {
        self.is_ready_to_pay()
    }

    fn can_setup_cards(&self) -> walletpay_lib::Result<bool> {
        self.is_ready_to_pay()
    }
}

impl PaymentSheetHost<GooglePay> for GooglePayHostBridge {
    fn can_present(&self) -> bool {
        self.ffi.can_present()
    }

    fn present(
        &self,
        request: GooglePayRequest,
        completion: NativeCompletion<GooglePay>,
    ) -> walletpay_lib::Result<()> {
        let json = request.to_json()?;
        self.ffi
            .load_payment_data(
                request.environment.into(),
                json,
                Arc::new(GooglePayCompletion::new(completion)),
            )
            .map_err(|e| WalletPayError::SheetUnavailable(e.to_string()))
    }
}
