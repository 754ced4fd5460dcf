//! Active fetch worker accounting
//!
//! Completion of the fetch phase is decided by joining the worker tasks. This
//! counter exists so progress can be reported while they run.

use std::sync::{Arc, Mutex};

/// Shared count of fetch workers that have started and not yet exited
#[derive(Debug, Clone, Default)]
pub struct ActiveWorkers {
    count: Arc<Mutex<usize>>,
}

impl ActiveWorkers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the caller as active until the returned guard is dropped
    pub fn register(&self) -> WorkerGuard {
        *self.lock() += 1;
        WorkerGuard {
            count: Arc::clone(&self.count),
        }
    }

    /// Number of workers currently active
    pub fn count(&self) -> usize {
        *self.lock()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, usize> {
        // A poisoned counter still holds a valid number
        self.count.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Decrements the active count exactly once, on drop
#[derive(Debug)]
pub struct WorkerGuard {
    count: Arc<Mutex<usize>>,
}

impl Drop for WorkerGuard {
    fn drop(&mut self) {
        let mut count = self.count.lock().unwrap_or_else(|e| e.into_inner());
        *count = count.saturating_sub(1);
    }
}
