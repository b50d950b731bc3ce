//! Prerequisite-aware command decorator.
//!
//! Many fetches are meaningless until a coarser object has been loaded once (account
//! groups must exist before an account's group can be resolved). `DependencyCommand`
//! runs the prerequisite first when, and only when, the prerequisite reports itself
//! ready for the projected target:
//!
//! ```text
//! execute(target)
//!   ├─ project(target) = Some(p) and prerequisite.can_execute(p)
//!   │     prerequisite.execute(p) ─▶ await its handle ─▶ inner.execute(target)
//!   └─ otherwise
//!         inner.execute(target) immediately
//! ```
//!
//! The inner body never starts before the prerequisite's handle has resolved. This is
//! the only cross-command ordering guarantee in the view-model layer.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::runtime::Handle;

use ledgerdesk_events::Subscription;

use crate::engine::command::{CommandEvent, CommandRef, ContextObject, ExecutionHandle, TaskCommand};

/// Derives the prerequisite's target from the wrapped command's target.
pub type Projection<C, P> = fn(&Arc<C>) -> Option<Arc<P>>;

/// Decorates `inner` with a `prerequisite` command. Owns neither.
pub struct DependencyCommand<C, P> {
    inner: Arc<dyn TaskCommand<C>>,
    prerequisite: Arc<dyn TaskCommand<P>>,
    project: Projection<C, P>,
    runtime: Handle,
    in_flight: Mutex<Option<ExecutionHandle>>,
}

impl<C, P> DependencyCommand<C, P>
where
    C: ContextObject,
    P: ContextObject,
{
    pub fn new(
        inner: Arc<dyn TaskCommand<C>>,
        prerequisite: Arc<dyn TaskCommand<P>>,
        project: Projection<C, P>,
        runtime: Handle,
    ) -> Self {
        Self {
            inner,
            prerequisite,
            project,
            runtime,
            in_flight: Mutex::new(None),
        }
    }

    fn set_in_flight(&self, handle: Option<ExecutionHandle>) {
        *self.in_flight.lock().unwrap_or_else(PoisonError::into_inner) = handle;
    }
}

impl<C, P> TaskCommand<C> for DependencyCommand<C, P>
where
    C: ContextObject,
    P: ContextObject,
{
    fn command(&self) -> CommandRef {
        self.inner.command()
    }

    fn can_execute(&self, target: &C) -> bool {
        self.inner.can_execute(target)
    }

    fn execute(&self, target: Arc<C>) {
        if !self.can_execute(&target) {
            tracing::debug!(command = self.inner.command().name, "execute ignored: not ready");
            return;
        }

        let pending = (self.project)(&target).filter(|p| self.prerequisite.can_execute(p));
        let Some(prerequisite_target) = pending else {
            self.inner.execute(target);
            self.set_in_flight(self.inner.execution_task());
            return;
        };

        tracing::debug!(
            command = self.inner.command().name,
            prerequisite = self.prerequisite.command().name,
            "running prerequisite first"
        );
        self.prerequisite.execute(prerequisite_target);
        let prerequisite_task = self.prerequisite.execution_task();

        let (signal, handle) = ExecutionHandle::pair();
        self.set_in_flight(Some(handle));

        let inner = self.inner.clone();
        self.runtime.spawn(async move {
            if let Some(task) = prerequisite_task {
                task.wait().await;
            }
            inner.execute(target);
            if let Some(task) = inner.execution_task() {
                task.wait().await;
            }
            signal.complete();
        });
    }

    fn execution_task(&self) -> Option<ExecutionHandle> {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn subscribe(&self) -> Subscription<CommandEvent> {
        self.inner.subscribe()
    }
}
