//! Failure taxonomy of the view-model layer.
//!
//! ```text
//! DataSourceError ─┐
//! DomainError ─────┴─▶ CommandError ─┐
//! anything else ─────▶ SystemError ──┴─▶ ViewModelError ─▶ ExceptionHandler
//! ```
//!
//! Each boundary wraps at most once. `ViewModelError` is the outermost value handed to
//! the exception handler and published on a command's error event.

use std::any::Any;
use std::sync::Arc;

use thiserror::Error;

use ledgerdesk_core::DomainError;

use crate::engine::CommandRef;

/// Failure reported by the financial repository.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataSourceError {
    /// The repository rejected the request (validation or business rule).
    #[error("{message}")]
    BusinessRule { message: String },

    /// The repository or the transport underneath it failed.
    #[error("repository failure: {message}")]
    Repository { message: String },
}

impl DataSourceError {
    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::BusinessRule {
            message: message.into(),
        }
    }

    pub fn repository(message: impl Into<String>) -> Self {
        Self::Repository {
            message: message.into(),
        }
    }
}

/// The object a failed command was acting on.
#[derive(Clone)]
pub struct TargetContext {
    description: String,
    object: Arc<dyn Any + Send + Sync>,
}

impl TargetContext {
    pub fn new<C>(description: String, target: Arc<C>) -> Self
    where
        C: Send + Sync + 'static,
    {
        Self {
            description,
            object: target,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn downcast<C>(&self) -> Option<Arc<C>>
    where
        C: Send + Sync + 'static,
    {
        self.object.clone().downcast::<C>().ok()
    }

    /// Whether this context is exactly `target` (same allocation).
    pub fn is<C>(&self, target: &Arc<C>) -> bool
    where
        C: Send + Sync + 'static,
    {
        self.downcast::<C>()
            .is_some_and(|object| Arc::ptr_eq(&object, target))
    }
}

impl core::fmt::Debug for TargetContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("TargetContext").field(&self.description).finish()
    }
}

/// What a command error's reason refers to.
#[derive(Debug, Clone)]
pub enum ReasonContext {
    /// The view the command was executed against.
    Target(TargetContext),
    /// The repository collaborator, by name.
    Repository(&'static str),
}

/// The failure a `CommandError` wraps.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandFailure {
    #[error(transparent)]
    DataSource(#[from] DataSourceError),
    #[error(transparent)]
    Validation(#[from] DomainError),
}

/// A data-source or validation failure while executing one command on one target.
#[derive(Debug, Error)]
#[error("{message}: {reason}")]
pub struct CommandError {
    /// Fixed, human-readable label of the operation (e.g. "error posting accounting line").
    pub message: String,
    /// Machine reason.
    pub reason: String,
    /// The command that failed.
    pub context: CommandRef,
    pub reason_context: ReasonContext,
    #[source]
    pub source: CommandFailure,
}

/// An unanticipated failure, preserving the original error as its source.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SystemError {
    pub message: String,
    pub command: CommandRef,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

/// Outermost error reported to the UI.
#[derive(Debug, Error)]
pub enum ViewModelError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    System(#[from] SystemError),
}

impl ViewModelError {
    pub fn command(&self) -> CommandRef {
        match self {
            ViewModelError::Command(e) => e.context,
            ViewModelError::System(e) => e.command,
        }
    }

    pub fn as_command_error(&self) -> Option<&CommandError> {
        match self {
            ViewModelError::Command(e) => Some(e),
            ViewModelError::System(_) => None,
        }
    }

    pub fn as_system_error(&self) -> Option<&SystemError> {
        match self {
            ViewModelError::Command(_) => None,
            ViewModelError::System(e) => Some(e),
        }
    }
}
