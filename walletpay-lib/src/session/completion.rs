//! One-shot completion handle and the per-attempt state it resolves.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::oneshot;

use crate::model::PaymentResult;
use crate::platform::{FailureReason, NativeOutcome, WalletPlatform};

/// Where a session is in its current (or last) attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Idle,
    Building,
    Presenting,
    AwaitingNativeCallback,
    Resolved,
}

pub(crate) struct InFlight {
    pub(crate) attempt_id: u64,
    pub(crate) sender: Option<oneshot::Sender<PaymentResult>>,
}

#[derive(Default)]
pub(crate) struct SessionState {
    pub(crate) phase: SessionPhase,
    pub(crate) in_flight: Option<InFlight>,
}

#[derive(Default)]
pub(crate) struct Shared {
    state: Mutex<SessionState>,
}

impl Shared {
    pub(crate) fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take the in-flight attempt if it is still `attempt_id`, marking it resolved.
    pub(crate) fn take_attempt(&self, attempt_id: u64) -> Option<InFlight> {
        let mut state = self.lock();
        match &state.in_flight {
            Some(current) if current.attempt_id == attempt_id => {
                state.phase = SessionPhase::Resolved;
                state.in_flight.take()
            }
            _ => None,
        }
    }

    pub(crate) fn set_phase(&self, attempt_id: u64, phase: SessionPhase) {
        let mut state = self.lock();
        if matches!(&state.in_flight, Some(current) if current.attempt_id == attempt_id) {
            state.phase = phase;
        }
    }
}

/// Clears an attempt's state when the awaiting call ends for any reason.
///
/// Covers unwinding and a dropped `start_payment` future; normal paths have
/// already taken the attempt, so the drop is then a no-op.
pub(crate) struct AttemptGuard<'a> {
    shared: &'a Shared,
    attempt_id: u64,
}

impl<'a> AttemptGuard<'a> {
    pub(crate) fn new(shared: &'a Shared, attempt_id: u64) -> Self {
        Self { shared, attempt_id }
    }
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        self.shared.take_attempt(self.attempt_id);
    }
}

/// Receiver for the single native completion signal of one attempt.
///
/// Handed to the host by [`PaymentSheetHost::present`](super::PaymentSheetHost::present).
/// The first call to [`complete`](Self::complete) resolves the awaiting
/// caller; later calls are no-ops. Dropping the handle without completing
/// resolves the attempt as interrupted.
pub struct NativeCompletion<P: WalletPlatform> {
    shared: Weak<Shared>,
    attempt_id: u64,
    platform: Arc<P>,
    resolved: AtomicBool,
}

impl<P: WalletPlatform> NativeCompletion<P> {
    pub(crate) fn new(shared: Weak<Shared>, attempt_id: u64, platform: Arc<P>) -> Self {
        Self {
            shared,
            attempt_id,
            platform,
            resolved: AtomicBool::new(false),
        }
    }

    pub fn attempt_id(&self) -> u64 {
        self.attempt_id
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.load(Ordering::Acquire)
    }

    /// Deliver the native outcome.
    ///
    /// Returns `false` when this handle already fired, the attempt is stale,
    /// or the session is gone.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, outcome), fields(attempt = self.attempt_id)))]
    pub fn complete(&self, outcome: NativeOutcome<P::Success>) -> bool {
        if self.resolved.swap(true, Ordering::AcqRel) {
            #[cfg(feature = "tracing")]
            tracing::warn!("duplicate native completion ignored");
            return false;
        }

        let Some(shared) = self.shared.upgrade() else {
            return false;
        };
        let Some(sender) = shared.take_attempt(self.attempt_id).and_then(|f| f.sender) else {
            #[cfg(feature = "tracing")]
            tracing::debug!("completion for stale attempt ignored");
            return false;
        };

        let result = self.platform.map_outcome(outcome);
        #[cfg(feature = "tracing")]
        tracing::info!(success = result.success, "payment attempt resolved");
        sender.send(result).is_ok()
    }
}

impl<P: WalletPlatform> Drop for NativeCompletion<P> {
    fn drop(&mut self) {
        if !self.is_resolved() {
            self.complete(NativeOutcome::Failed(FailureReason::Interrupted));
        }
    }
}

impl<P: WalletPlatform> std::fmt::Debug for NativeCompletion<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeCompletion")
            .field("attempt_id", &self.attempt_id)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
