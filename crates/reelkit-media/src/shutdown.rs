//! One-shot cleanup on interrupt.

use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

type Cleanup = Box<dyn FnOnce() + Send>;

/// Runs a cleanup action the first time it is triggered. Signal handlers,
/// normal completion and error paths may all trigger it; only the first
/// call does anything.
pub struct ShutdownGuard {
    triggered: AtomicBool,
    cleanup: Mutex<Option<Cleanup>>,
}

impl ShutdownGuard {
    pub fn new(cleanup: impl FnOnce() + Send + 'static) -> Self {
        Self {
            triggered: AtomicBool::new(false),
            cleanup: Mutex::new(Some(Box::new(cleanup))),
        }
    }

    /// Run the cleanup if nobody has yet. Returns `true` for the call that
    /// ran it.
    pub fn trigger(&self) -> bool {
        if self.triggered.swap(true, Ordering::AcqRel) {
            tracing::debug!("shutdown already in progress");
            return false;
        }
        let cleanup = self.cleanup.lock().take();
        if let Some(cleanup) = cleanup {
            tracing::info!("shutting down");
            cleanup();
        }
        true
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::Acquire)
    }
}

impl fmt::Debug for ShutdownGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShutdownGuard")
            .field("triggered", &self.is_triggered())
            .finish_non_exhaustive()
    }
}
