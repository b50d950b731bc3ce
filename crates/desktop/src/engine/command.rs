//! Task-backed commands.
//!
//! A command is the unit of asynchronous work behind a UI action:
//!
//! ```text
//! can_execute(target) ── pure readiness check, never mutates
//! execute(target) ────── schedules the body, returns immediately
//! execution_task() ───── handle of the most recently scheduled body
//! ```
//!
//! ## In-flight handle
//!
//! `execution_task()` is `None` until the first `execute`, then always the handle of the
//! latest run. It is replaced only when a new run starts, never cleared on completion;
//! observe completion by awaiting the handle.
//!
//! ## Caller contract
//!
//! Triggering while a handle is outstanding starts a second run against the same
//! target. Commands do not guard against this; callers check `can_execute` and the
//! handle first.
//!
//! ## Failure
//!
//! A failed body is not a crashed command. The failure is translated, handed to the
//! exception handler and published as `CommandEvent::Error`; the handle still resolves
//! and `CommandEvent::Finished` is still published.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::watch;

use ledgerdesk_core::CommandId;
use ledgerdesk_events::{EventBus, InMemoryEventBus, Subscription};

use crate::engine::translate::ErrorTranslator;
use crate::environment::CommandEnvironment;
use crate::error::{TargetContext, ViewModelError};

/// Identity of a command instance, carried by events and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandRef {
    pub id: CommandId,
    pub name: &'static str,
}

impl core::fmt::Display for CommandRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Lifecycle notifications of a command.
#[derive(Debug, Clone)]
pub enum CommandEvent {
    /// Raised once per run, after any `Error`.
    Finished { command: CommandRef },
    /// Raised once per failed run, with the error already handed to the handler.
    Error {
        command: CommandRef,
        error: Arc<ViewModelError>,
    },
}

impl CommandEvent {
    pub fn command(&self) -> CommandRef {
        match self {
            CommandEvent::Finished { command } | CommandEvent::Error { command, .. } => *command,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, CommandEvent::Finished { .. })
    }
}

/// A view a command can run against.
pub trait ContextObject: Send + Sync + 'static {
    /// Short human description used in logs and error contexts.
    fn describe(&self) -> String;
}

/// Awaitable completion of one command run.
#[derive(Debug, Clone)]
pub struct ExecutionHandle {
    done: watch::Receiver<bool>,
}

/// Completes the paired `ExecutionHandle`; dropping it completes it too.
#[derive(Debug)]
pub struct ExecutionSignal {
    done: watch::Sender<bool>,
}

impl ExecutionHandle {
    pub fn pair() -> (ExecutionSignal, ExecutionHandle) {
        let (tx, rx) = watch::channel(false);
        (ExecutionSignal { done: tx }, ExecutionHandle { done: rx })
    }

    /// A handle that is already complete.
    pub fn completed() -> ExecutionHandle {
        let (signal, handle) = Self::pair();
        signal.complete();
        handle
    }

    pub fn is_finished(&self) -> bool {
        *self.done.borrow() || self.done.has_changed().is_err()
    }

    /// Resolve once the run has completed (successfully or not).
    pub async fn wait(&self) {
        let mut done = self.done.clone();
        // A dropped signal means the run is over as well.
        let _ = done.wait_for(|finished| *finished).await;
    }
}

impl ExecutionSignal {
    pub fn complete(self) {
        let _ = self.done.send(true);
    }
}

/// Asynchronous unit of work against a target of type `C`.
pub trait TaskCommand<C: ?Sized>: Send + Sync {
    fn command(&self) -> CommandRef;

    /// Pure readiness check.
    fn can_execute(&self, target: &C) -> bool;

    /// Schedule the body. A no-op when `can_execute` is false.
    fn execute(&self, target: Arc<C>);

    fn execution_task(&self) -> Option<ExecutionHandle>;

    fn subscribe(&self) -> Subscription<CommandEvent>;
}

/// Shared machinery of a concrete command: identity, in-flight handle, events and
/// failure translation.
pub struct CommandRuntime {
    command: CommandRef,
    operation: &'static str,
    runtime: Handle,
    in_flight: Mutex<Option<ExecutionHandle>>,
    events: Arc<InMemoryEventBus<CommandEvent>>,
    translator: ErrorTranslator,
}

impl CommandRuntime {
    /// `operation` is the fixed human label used when a run fails.
    pub fn new(name: &'static str, operation: &'static str, env: &CommandEnvironment) -> Self {
        Self {
            command: CommandRef {
                id: CommandId::new(),
                name,
            },
            operation,
            runtime: env.runtime.clone(),
            in_flight: Mutex::new(None),
            events: Arc::new(InMemoryEventBus::new()),
            translator: ErrorTranslator::new(env.exception_handler.clone(), env.repository.name()),
        }
    }

    pub fn command(&self) -> CommandRef {
        self.command
    }

    pub fn execution_task(&self) -> Option<ExecutionHandle> {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn subscribe(&self) -> Subscription<CommandEvent> {
        self.events.subscribe()
    }

    /// Schedule `body` against `target` and record its handle as the in-flight one.
    pub fn spawn<C, F>(&self, target: Arc<C>, body: F) -> ExecutionHandle
    where
        C: ContextObject,
        F: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let (signal, handle) = ExecutionHandle::pair();
        *self.in_flight.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle.clone());

        let command = self.command;
        let operation = self.operation;
        let events = self.events.clone();
        let translator = self.translator.clone();
        let runtime = self.runtime.clone();
        let target = TargetContext::new(target.describe(), target);

        tracing::info!(command = command.name, target = target.description(), "command started");

        self.runtime.spawn(async move {
            let outcome = match runtime.spawn(body).await {
                Ok(outcome) => outcome,
                Err(join_error) => Err(anyhow::anyhow!("command body aborted: {join_error}")),
            };

            match outcome {
                Ok(()) => {
                    tracing::info!(command = command.name, target = target.description(), "command finished");
                }
                Err(error) => {
                    let error = Arc::new(translator.translate(command, operation, target, error));
                    translator.report(error.clone());
                    publish(&events, CommandEvent::Error { command, error });
                }
            }

            publish(&events, CommandEvent::Finished { command });
            signal.complete();
        });

        handle
    }
}

fn publish(events: &InMemoryEventBus<CommandEvent>, event: CommandEvent) {
    if let Err(e) = events.publish(event) {
        tracing::warn!(error = ?e, "command event dropped");
    }
}
