//! Payment session bridge.
//!
//! A [`PaymentSession`] turns a callback-driven wallet sheet into one
//! awaitable [`start_payment`](PaymentSession::start_payment) call. It owns
//! at most one in-flight attempt:
//!
//! ```text
//!  Idle ─► Building ─► Presenting ─► AwaitingNativeCallback ─► Resolved
//!    │         │            │
//!    └─────────┴────────────┴──► Resolved (busy / no surface / invalid / present failed)
//! ```
//!
//! The host gets a [`NativeCompletion`] for each attempt. Whatever the host
//! does with it (completes once, completes twice, drops it), the caller sees
//! exactly one [`PaymentResult`].

mod completion;

pub use completion::{NativeCompletion, SessionPhase};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::oneshot;

use completion::{AttemptGuard, InFlight, Shared};

use crate::availability::{AvailabilityProber, PlatformProber, WalletAvailability};
use crate::config::SessionConfig;
use crate::model::{PayServiceStatus, PaymentRequest, PaymentResult};
use crate::platform::apple::ApplePay;
use crate::platform::google::GooglePay;
use crate::platform::{FailureReason, WalletPlatform};
use crate::Result;

/// The host side of a wallet sheet (PassKit controller, Google Pay activity).
pub trait PaymentSheetHost<P: WalletPlatform>: WalletAvailability {
    /// Whether a window or activity is available to present on.
    fn can_present(&self) -> bool;

    /// Launch the native sheet for `request`.
    ///
    /// The host must route the platform's completion signal to `completion`.
    /// An error means nothing was presented.
    fn present(&self, request: P::Request, completion: NativeCompletion<P>) -> Result<()>;
}

impl<P: WalletPlatform, T: PaymentSheetHost<P> + ?Sized> PaymentSheetHost<P> for Arc<T> {
    fn can_present(&self) -> bool {
        (**self).can_present()
    }

    fn present(&self, request: P::Request, completion: NativeCompletion<P>) -> Result<()> {
        (**self).present(request, completion)
    }
}

/// Collaborator-facing payment contract.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Capability snapshot; never presents UI.
    fn status(&self) -> PayServiceStatus;

    /// Membership test of `networks` against the platform's supported set.
    fn can_make_payments(&self, networks: &[String]) -> bool;

    /// Run one authorization attempt. Never fails; failures are results.
    async fn start_payment(&self, request: &PaymentRequest) -> PaymentResult;
}

pub type ApplePaySession<H> = PaymentSession<ApplePay, H>;
pub type GooglePaySession<H> = PaymentSession<GooglePay, H>;

pub struct PaymentSession<P: WalletPlatform, H> {
    platform: Arc<P>,
    host: Arc<H>,
    prober: PlatformProber<Arc<H>>,
    config: SessionConfig,
    shared: Arc<Shared>,
    next_attempt: AtomicU64,
}

impl<P, H> PaymentSession<P, H>
where
    P: WalletPlatform,
    H: PaymentSheetHost<P>,
{
    pub fn new(platform: P, host: H, config: SessionConfig) -> Self {
        let host = Arc::new(host);
        Self {
            prober: PlatformProber::for_platform(&platform, host.clone()),
            platform: Arc::new(platform),
            host,
            config,
            shared: Arc::new(Shared::default()),
            next_attempt: AtomicU64::new(1),
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.shared.lock().phase
    }

    pub fn is_busy(&self) -> bool {
        self.shared.lock().in_flight.is_some()
    }

    /// Capability snapshot from the host.
    pub fn status(&self) -> PayServiceStatus {
        self.prober.status()
    }

    pub fn can_make_payments(&self, networks: &[String]) -> bool {
        self.prober.can_make_payments(networks)
    }

    /// Run one authorization attempt and wait for its single result.
    ///
    /// A call made while another attempt is in flight resolves immediately
    /// with a busy failure and leaves the in-flight attempt alone.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, request), fields(platform = %self.platform.kind())))]
    pub async fn start_payment(&self, request: &PaymentRequest) -> PaymentResult {
        let Some(attempt_id) = self.reserve() else {
            #[cfg(feature = "tracing")]
            tracing::warn!("payment already in progress");
            return self.platform.map_failure(FailureReason::Busy);
        };
        let _guard = AttemptGuard::new(&self.shared, attempt_id);

        if !self.host.can_present() {
            return self.abort(attempt_id, FailureReason::NoHostSurface);
        }

        let environment = self.platform.environment_for(request, self.config.environment);
        let native = match self.platform.build_request(request, environment) {
            Ok(native) => native,
            Err(e) => return self.abort(attempt_id, FailureReason::InvalidRequest(e.to_string())),
        };

        #[cfg(feature = "tracing")]
        if self.config.log_payloads {
            tracing::debug!(attempt = attempt_id, %environment, payload = ?native, "built native request");
        }

        let (sender, receiver) = oneshot::channel();
        self.register(attempt_id, sender);

        let completion =
            NativeCompletion::new(Arc::downgrade(&self.shared), attempt_id, self.platform.clone());
        if let Err(_e) = self.host.present(native, completion) {
            #[cfg(feature = "tracing")]
            tracing::error!(error = %_e, "failed to present payment sheet");
            return self.abort(attempt_id, FailureReason::UnableToCreate);
        }
        self.shared
            .set_phase(attempt_id, SessionPhase::AwaitingNativeCallback);

        match receiver.await {
            Ok(result) => result,
            Err(_) => self.abort(attempt_id, FailureReason::Interrupted),
        }
    }

    fn reserve(&self) -> Option<u64> {
        let mut state = self.shared.lock();
        if state.in_flight.is_some() {
            return None;
        }
        let attempt_id = self.next_attempt.fetch_add(1, Ordering::Relaxed);
        state.phase = SessionPhase::Building;
        state.in_flight = Some(InFlight {
            attempt_id,
            sender: None,
        });
        Some(attempt_id)
    }

    fn register(&self, attempt_id: u64, sender: oneshot::Sender<PaymentResult>) {
        let mut state = self.shared.lock();
        if let Some(current) = state.in_flight.as_mut() {
            if current.attempt_id == attempt_id {
                current.sender = Some(sender);
                state.phase = SessionPhase::Presenting;
            }
        }
    }

    /// Resolve `attempt_id` locally with `reason`, clearing its state.
    fn abort(&self, attempt_id: u64, reason: FailureReason) -> PaymentResult {
        self.shared.take_attempt(attempt_id);
        self.platform.map_failure(reason)
    }
}

#[async_trait]
impl<P, H> PaymentService for PaymentSession<P, H>
where
    P: WalletPlatform,
    H: PaymentSheetHost<P> + 'static,
{
    fn status(&self) -> PayServiceStatus {
        PaymentSession::status(self)
    }

    fn can_make_payments(&self, networks: &[String]) -> bool {
        PaymentSession::can_make_payments(self, networks)
    }

    async fn start_payment(&self, request: &PaymentRequest) -> PaymentResult {
        PaymentSession::start_payment(self, request).await
    }
}
