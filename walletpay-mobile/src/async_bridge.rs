//! Async Bridge for Mobile Platforms
//!
//! Swift and Kotlin receive payment results through callbacks rather than
//! Rust futures. [`AsyncRuntime`] owns the Tokio runtime that drives
//! `start_payment` and hands each result to a completion closure.

use crate::WalletPayMobileError;

/// Async runtime wrapper for mobile.
pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
}

impl AsyncRuntime {
    /// Create a multi-threaded runtime with default worker count.
    pub fn new() -> Result<Self, WalletPayMobileError> {
        tokio::runtime::Runtime::new()
            .map(|runtime| Self { runtime })
            .map_err(|e| WalletPayMobileError::Internal {
                msg: format!("Failed to create runtime: {}", e),
            })
    }

    /// Create with a fixed number of worker threads.
    pub fn with_threads(num_threads: usize) -> Result<Self, WalletPayMobileError> {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(num_threads)
            .enable_all()
            .build()
            .map(|runtime| Self { runtime })
            .map_err(|e| WalletPayMobileError::Internal {
                msg: format!("Failed to create runtime: {}", e),
            })
    }

    /// Run a future to completion on the calling thread.
    ///
    /// Must not be called from inside a Tokio runtime, and must not be called
    /// from the thread the host presents UI on: the native completion would
    /// never be delivered.
    pub fn block_on<F, T>(&self, future: F) -> T
    where
        F: std::future::Future<Output = T>,
    {
        self.runtime.block_on(future)
    }

    /// Spawn `future` and pass its output to `on_complete`.
    ///
    /// `on_complete` runs exactly once, with an error if the future panicked.
    pub fn spawn_with_callback<F, T, C>(&self, future: F, on_complete: C)
    where
        F: std::future::Future<Output = T> + Send + 'static,
        T: Send + 'static,
        C: FnOnce(Result<T, WalletPayMobileError>) + Send + 'static,
    {
        let task = self.runtime.spawn(future);
        self.runtime.spawn(async move {
            let outcome = task.await.map_err(|e| WalletPayMobileError::Internal {
                msg: format!("Task failed: {}", e),
            });
            on_complete(outcome);
        });
    }
}

impl std::fmt::Debug for AsyncRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncRuntime").finish_non_exhaustive()
    }
}
