//! UI-facing exception handlers.

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::ViewModelError;

/// Receives every translated failure, exactly once per failed command execution.
///
/// Called on whichever thread the command body completed on; marshaling to the UI
/// thread is the implementor's concern.
pub trait ExceptionHandler: Send + Sync {
    fn handle_exception(&self, error: Arc<ViewModelError>);
}

/// Logs failures and otherwise ignores them.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingExceptionHandler;

impl ExceptionHandler for TracingExceptionHandler {
    fn handle_exception(&self, error: Arc<ViewModelError>) {
        match error.as_ref() {
            ViewModelError::Command(e) => tracing::warn!(
                command = e.context.name,
                reason = %e.reason,
                "{}",
                e.message
            ),
            ViewModelError::System(e) => tracing::error!(
                command = e.command.name,
                error = ?e.source,
                "{}",
                e.message
            ),
        }
    }
}

/// Records failures for later inspection (tests, the demo shell).
#[derive(Debug, Default)]
pub struct CollectingExceptionHandler {
    errors: Mutex<Vec<Arc<ViewModelError>>>,
}

impl CollectingExceptionHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> Vec<Arc<ViewModelError>> {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.errors.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ExceptionHandler for CollectingExceptionHandler {
    fn handle_exception(&self, error: Arc<ViewModelError>) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(error);
    }
}
