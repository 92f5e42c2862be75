//! In-memory hosts standing in for the native shims.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

use crate::availability::WalletAvailability;
use crate::errors::WalletPayError;
use crate::platform::{NativeOutcome, WalletPlatform};
use crate::session::{NativeCompletion, PaymentSheetHost};
use crate::Result;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Scripted device capabilities. Clones share the query counter.
#[derive(Clone, Debug)]
pub struct MockAvailability {
    state: Arc<AvailabilityState>,
}

#[derive(Debug)]
struct AvailabilityState {
    can_make_payments: bool,
    can_setup_cards: bool,
    fail: bool,
    queries: AtomicUsize,
}

impl MockAvailability {
    pub fn new(can_make_payments: bool, can_setup_cards: bool) -> Self {
        Self::build(can_make_payments, can_setup_cards, false)
    }

    pub fn available() -> Self {
        Self::new(true, true)
    }

    pub fn unavailable() -> Self {
        Self::new(false, false)
    }

    /// Every query errors.
    pub fn failing() -> Self {
        Self::build(true, true, true)
    }

    fn build(can_make_payments: bool, can_setup_cards: bool, fail: bool) -> Self {
        Self {
            state: Arc::new(AvailabilityState {
                can_make_payments,
                can_setup_cards,
                fail,
                queries: AtomicUsize::new(0),
            }),
        }
    }

    /// Number of `can_make_payments` queries answered.
    pub fn query_count(&self) -> usize {
        self.state.queries.load(Ordering::SeqCst)
    }

    fn answer(&self, value: bool) -> Result<bool> {
        if self.state.fail {
            Err(WalletPayError::Platform("wallet service unavailable".to_string()))
        } else {
            Ok(value)
        }
    }
}

impl WalletAvailability for MockAvailability {
    fn can_make_payments(&self) -> Result<bool> {
        self.state.queries.fetch_add(1, Ordering::SeqCst);
        self.answer(self.state.can_make_payments)
    }

    fn can_setup_cards(&self) -> Result<bool> {
        self.answer(self.state.can_setup_cards)
    }
}

/// What [`MockSheetHost`] does with each presented sheet.
#[derive(Clone, Debug)]
pub enum HostBehavior<S> {
    /// Keep the completion for [`MockSheetHost::wait_for_completion`].
    Hold,
    /// Complete synchronously, before `present` returns.
    Respond(NativeOutcome<S>),
    /// Drop the completion without firing it.
    DropCompletion,
    /// Refuse to present.
    FailPresent,
}

/// Scriptable [`PaymentSheetHost`].
pub struct MockSheetHost<P: WalletPlatform> {
    availability: MockAvailability,
    surface: bool,
    behavior: Mutex<HostBehavior<P::Success>>,
    presented: Mutex<Vec<P::Request>>,
    pending: Mutex<VecDeque<NativeCompletion<P>>>,
    presented_signal: Notify,
}

impl<P: WalletPlatform> Default for MockSheetHost<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: WalletPlatform> MockSheetHost<P> {
    /// Presentable host that holds completions and reports full availability.
    pub fn new() -> Self {
        Self {
            availability: MockAvailability::available(),
            surface: true,
            behavior: Mutex::new(HostBehavior::Hold),
            presented: Mutex::new(Vec::new()),
            pending: Mutex::new(VecDeque::new()),
            presented_signal: Notify::new(),
        }
    }

    /// No window or activity to present on.
    pub fn without_surface(mut self) -> Self {
        self.surface = false;
        self
    }

    pub fn with_behavior(self, behavior: HostBehavior<P::Success>) -> Self {
        *lock(&self.behavior) = behavior;
        self
    }

    pub fn with_availability(mut self, availability: MockAvailability) -> Self {
        self.availability = availability;
        self
    }

    pub fn set_behavior(&self, behavior: HostBehavior<P::Success>) {
        *lock(&self.behavior) = behavior;
    }

    /// Number of sheets actually presented.
    pub fn presented_count(&self) -> usize {
        lock(&self.presented).len()
    }

    /// Wait until a held completion is available and take it.
    pub async fn wait_for_completion(&self) -> NativeCompletion<P> {
        loop {
            let next = lock(&self.pending).pop_front();
            if let Some(completion) = next {
                return completion;
            }
            self.presented_signal.notified().await;
        }
    }
}

impl<P> MockSheetHost<P>
where
    P: WalletPlatform,
    P::Request: Clone,
{
    /// The most recently presented native request.
    pub fn last_request(&self) -> Option<P::Request> {
        lock(&self.presented).last().cloned()
    }
}

impl<P: WalletPlatform> WalletAvailability for MockSheetHost<P> {
    fn can_make_payments(&self) -> Result<bool> {
        self.availability.can_make_payments()
    }

    fn can_setup_cards(&self) -> Result<bool> {
        self.availability.can_setup_cards()
    }
}

impl<P> PaymentSheetHost<P> for MockSheetHost<P>
where
    P: WalletPlatform,
    P::Success: Clone,
{
    fn can_present(&self) -> bool {
        self.surface
    }

    fn present(&self, request: P::Request, completion: NativeCompletion<P>) -> Result<()> {
        let behavior = lock(&self.behavior).clone();
        if let HostBehavior::FailPresent = behavior {
            return Err(WalletPayError::SheetUnavailable(
                "mock host refused to present".to_string(),
            ));
        }

        lock(&self.presented).push(request);
        match behavior {
            HostBehavior::Respond(outcome) => {
                completion.complete(outcome);
            }
            HostBehavior::DropCompletion => drop(completion),
            HostBehavior::Hold | HostBehavior::FailPresent => {
                lock(&self.pending).push_back(completion);
            }
        }
        self.presented_signal.notify_one();
        Ok(())
    }
}
