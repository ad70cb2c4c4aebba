//! Cooperative cancellation for generation passes

use crate::error::{GenError, GenResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Token the host uses to cancel a running pass
///
/// Clones share the same flag, so the host keeps one clone and hands another
/// to [`Generator::run`](crate::Generator::run).
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Return `Err(GenError::Cancelled)` once cancellation has been requested
    pub fn check(&self) -> GenResult<()> {
        if self.is_cancelled() {
            return Err(GenError::Cancelled);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "cancel/cancel_tests.rs"]
mod cancel_tests;
