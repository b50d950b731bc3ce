//! Error translation.
//!
//! Classifies whatever escaped a command body into exactly one outermost error:
//!
//! | escaped error                        | result                                          |
//! |--------------------------------------|-------------------------------------------------|
//! | `DataSourceError::BusinessRule`      | `CommandError`, reason = its message, target    |
//! | `DomainError` (validation)           | `CommandError`, reason = its message, target    |
//! | `DataSourceError::Repository`        | `CommandError`, fixed reason, repository        |
//! | `CommandError` / `ViewModelError`    | passed through unchanged                        |
//! | anything else                        | `SystemError` naming the command                |
//!
//! No retries happen here.

use std::sync::Arc;

use ledgerdesk_core::DomainError;

use crate::engine::command::CommandRef;
use crate::error::{
    CommandError, CommandFailure, DataSourceError, ReasonContext, SystemError, TargetContext,
    ViewModelError,
};
use crate::handler::ExceptionHandler;

/// Reason used for every repository/transport failure.
pub const REPOSITORY_UPDATE_FAILED: &str = "repository update failed";

#[derive(Clone)]
pub struct ErrorTranslator {
    handler: Arc<dyn ExceptionHandler>,
    repository: &'static str,
}

impl ErrorTranslator {
    pub fn new(handler: Arc<dyn ExceptionHandler>, repository: &'static str) -> Self {
        Self {
            handler,
            repository,
        }
    }

    pub fn translate(
        &self,
        command: CommandRef,
        operation: &'static str,
        target: TargetContext,
        error: anyhow::Error,
    ) -> ViewModelError {
        let error = match error.downcast::<ViewModelError>() {
            Ok(translated) => return translated,
            Err(error) => error,
        };
        let error = match error.downcast::<CommandError>() {
            Ok(translated) => return translated.into(),
            Err(error) => error,
        };

        let error = match error.downcast::<DataSourceError>() {
            Ok(failure @ DataSourceError::BusinessRule { .. }) => {
                return self.against_target(command, operation, target, failure.into());
            }
            Ok(failure @ DataSourceError::Repository { .. }) => {
                tracing::warn!(
                    command = command.name,
                    repository = self.repository,
                    error = %failure,
                    "{operation}"
                );
                return CommandError {
                    message: operation.to_string(),
                    reason: REPOSITORY_UPDATE_FAILED.to_string(),
                    context: command,
                    reason_context: ReasonContext::Repository(self.repository),
                    source: failure.into(),
                }
                .into();
            }
            Err(error) => error,
        };

        let error = match error.downcast::<DomainError>() {
            Ok(failure) => return self.against_target(command, operation, target, failure.into()),
            Err(error) => error,
        };

        tracing::error!(command = command.name, target = target.description(), error = ?error, "unexpected command failure");
        SystemError {
            message: format!("{} failed: {}", command.name, error),
            command,
            source: error.into(),
        }
        .into()
    }

    pub fn report(&self, error: Arc<ViewModelError>) {
        self.handler.handle_exception(error);
    }

    fn against_target(
        &self,
        command: CommandRef,
        operation: &'static str,
        target: TargetContext,
        failure: CommandFailure,
    ) -> ViewModelError {
        let reason = match &failure {
            CommandFailure::DataSource(e) => e.to_string(),
            CommandFailure::Validation(e) => e.to_string(),
        };
        tracing::warn!(command = command.name, target = target.description(), %reason, "{operation}");
        CommandError {
            message: operation.to_string(),
            reason,
            context: command,
            reason_context: ReasonContext::Target(target),
            source: failure,
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::CollectingExceptionHandler;
    use ledgerdesk_core::CommandId;

    struct Target;

    fn command() -> CommandRef {
        CommandRef {
            id: CommandId::new(),
            name: "AddPostingLineCommand",
        }
    }

    fn translator() -> ErrorTranslator {
        ErrorTranslator::new(Arc::new(CollectingExceptionHandler::new()), "in-memory repository")
    }

    #[test]
    fn business_rule_failure_targets_the_object() {
        let target = Arc::new(Target);
        let context = TargetContext::new("target".to_string(), target.clone());
        let error = translator().translate(
            command(),
            "error posting accounting line",
            context,
            DataSourceError::business_rule("account 9999 does not exist").into(),
        );

        let error = error.as_command_error().expect("command error");
        assert_eq!(error.message, "error posting accounting line");
        assert_eq!(error.reason, "account 9999 does not exist");
        assert!(matches!(&error.reason_context, ReasonContext::Target(t) if t.is(&target)));
    }

    #[test]
    fn repository_failure_targets_the_repository() {
        let context = TargetContext::new("target".to_string(), Arc::new(Target));
        let error = translator().translate(
            command(),
            "error loading accounts",
            context,
            DataSourceError::repository("connection reset").into(),
        );

        let error = error.as_command_error().expect("command error");
        assert_eq!(error.reason, REPOSITORY_UPDATE_FAILED);
        assert!(matches!(error.reason_context, ReasonContext::Repository("in-memory repository")));
    }

    #[test]
    fn unexpected_failure_becomes_system_error() {
        let command = command();
        let context = TargetContext::new("target".to_string(), Arc::new(Target));
        let error = translator().translate(
            command,
            "error posting accounting line",
            context,
            anyhow::anyhow!("disk on fire"),
        );

        let error = error.as_system_error().expect("system error");
        assert!(error.message.contains("AddPostingLineCommand"));
        assert!(error.message.contains("disk on fire"));
        assert_eq!(error.command, command);
    }

    #[test]
    fn validation_failure_is_a_command_error() {
        let context = TargetContext::new("target".to_string(), Arc::new(Target));
        let error = translator().translate(
            command(),
            "error posting accounting line",
            context,
            DomainError::validation("exactly one of debit or credit must be set").into(),
        );

        assert!(matches!(
            error.as_command_error().map(|e| &e.source),
            Some(CommandFailure::Validation(_))
        ));
    }
}
