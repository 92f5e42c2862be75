//! Exported payment handler.
//!
//! One [`PaymentHandler`] per wallet. It owns a payment session over the
//! host bridge and the runtime that drives it.

use std::sync::Arc;

use walletpay_lib::platform::apple::ApplePay;
use walletpay_lib::platform::google::GooglePay;
use walletpay_lib::{FailureReason, PaymentRequest, PaymentService, PaymentSession, PlatformKind};

use crate::async_bridge::AsyncRuntime;
use crate::host_ffi::{ApplePayHostBridge, ApplePayHostFFI, GooglePayHostBridge, GooglePayHostFFI};
use crate::{
    PayServiceStatusFFI, PaymentRequestFFI, PaymentResultFFI, PlatformKindFFI, Result,
    SessionConfigFFI,
};

/// Receives the single result of a `start_payment` call.
#[uniffi::export(callback_interface)]
pub trait PaymentResultCallback: Send + Sync {
    fn on_result(&self, result: PaymentResultFFI);
}

#[derive(uniffi::Object)]
pub struct PaymentHandler {
    service: Arc<dyn PaymentService>,
    kind: PlatformKind,
    runtime: AsyncRuntime,
}

impl PaymentHandler {
    fn with_service(service: Arc<dyn PaymentService>, kind: PlatformKind) -> Result<Arc<Self>> {
        Ok(Arc::new(Self {
            service,
            kind,
            runtime: AsyncRuntime::new()?,
        }))
    }

    fn convert_request(request: PaymentRequestFFI) -> std::result::Result<PaymentRequest, PaymentResultFFI> {
        PaymentRequest::try_from(request)
            .map_err(|e| FailureReason::InvalidRequest(e.to_string()).into_result().into())
    }
}

#[uniffi::export]
impl PaymentHandler {
    /// Apple Pay handler backed by a PassKit host.
    #[uniffi::constructor]
    pub fn apple_pay(host: Box<dyn ApplePayHostFFI>, config: SessionConfigFFI) -> Result<Arc<Self>> {
        let bridge = ApplePayHostBridge::new(Arc::from(host));
        let session = PaymentSession::new(ApplePay::new(), bridge, config.into());
        Self::with_service(Arc::new(session), PlatformKind::ApplePay)
    }

    /// Google Pay handler backed by a Wallet API host.
    #[uniffi::constructor]
    pub fn google_pay(
        host: Box<dyn GooglePayHostFFI>,
        config: SessionConfigFFI,
    ) -> Result<Arc<Self>> {
        let bridge = GooglePayHostBridge::new(Arc::from(host));
        let session = PaymentSession::new(GooglePay::new(), bridge, config.into());
        Self::with_service(Arc::new(session), PlatformKind::GooglePay)
    }

    pub fn platform(&self) -> PlatformKindFFI {
        self.kind.into()
    }

    /// Capability snapshot. Never presents UI.
    pub fn pay_service_status(&self) -> PayServiceStatusFFI {
        self.service.status().into()
    }

    /// True when any of `networks` is supported by this wallet.
    pub fn can_make_payments(&self, networks: Vec<String>) -> bool {
        self.service.can_make_payments(&networks)
    }

    /// Start a payment. `callback` receives exactly one result.
    pub fn start_payment(&self, request: PaymentRequestFFI, callback: Box<dyn PaymentResultCallback>) {
        let request = match Self::convert_request(request) {
            Ok(request) => request,
            Err(result) => return callback.on_result(result),
        };
        let service = self.service.clone();
        self.runtime.spawn_with_callback(
            async move { service.start_payment(&request).await },
            move |outcome| {
                let result = outcome.unwrap_or_else(|_| FailureReason::Interrupted.into_result());
                callback.on_result(result.into())
            },
        );
    }

    /// Start a payment and block until it resolves.
    ///
    /// Must be called off the UI thread.
    pub fn start_payment_blocking(&self, request: PaymentRequestFFI) -> PaymentResultFFI {
        match Self::convert_request(request) {
            Ok(request) => self
                .runtime
                .block_on(self.service.start_payment(&request))
                .into(),
            Err(result) => result,
        }
    }
}
