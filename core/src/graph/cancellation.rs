use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use error_stack::Report;

use crate::error::{Error, Result};

/// Cooperative cancellation flag shared between a caller and a running generation
///
/// Clones share the same flag. The graph builder checks it before every node visit.
#[derive(Debug, Clone, Default)]
pub struct CancellationSignal(Arc<AtomicBool>);

impl CancellationSignal {
    /// A signal that has not fired
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; the running generation stops at its next check
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether `cancel` was called on any clone
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Fail with `Error::Cancelled` once cancellation was requested
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(Report::new(Error::Cancelled));
        }
        Ok(())
    }
}
