//! Cooperative interruption of long-running reasoning tasks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag polled between oracle calls.
///
/// The flag is cheap to clone; all clones observe the same state. Setting it
/// does not stop anything by itself - classification and realization poll it
/// and abort with an interruption error, discarding partial state.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag {
    interrupted: Arc<AtomicBool>,
}

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the current reasoning task stop at the next poll point.
    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    /// Re-arm the flag so a new task can run.
    pub fn clear(&self) {
        self.interrupted.store(false, Ordering::SeqCst);
    }
}
