//! Cascading refresh of already-known entries after a mutation.
//!
//! A posted line names foreign keys in other collections (account, budget account,
//! debtor/creditor). Only keys that match an entry already present locally are
//! refreshed; unknown keys are never fetched on demand. Refreshes are fire-and-forget:
//! nothing here awaits the triggered handles.

use std::collections::HashSet;
use std::sync::Arc;

use ledgerdesk_core::Entity;
use ledgerdesk_events::ObservableCollection;

use crate::engine::command::{ContextObject, TaskCommand};

/// An entry that carries its own refresh command.
pub trait Refreshable: Entity + ContextObject + Sized {
    fn refresh_command(&self) -> Option<Arc<dyn TaskCommand<Self>>>;
}

/// Trigger the refresh of the entry keyed `key`, if it is known and ready.
///
/// Returns whether a refresh was triggered.
pub fn refresh_known<T>(collection: &ObservableCollection<T>, key: &T::Id) -> bool
where
    T: Refreshable,
    T::Id: Send + 'static,
{
    let Some(entry) = collection.find(key) else {
        return false;
    };
    let Some(command) = entry.refresh_command() else {
        return false;
    };
    if !command.can_execute(&entry) {
        tracing::debug!(collection = collection.name(), key = ?key, "refresh skipped: not ready");
        return false;
    }

    tracing::debug!(collection = collection.name(), key = ?key, "cascading refresh");
    command.execute(entry);
    true
}

/// [`refresh_known`] for each distinct key, in first-seen order. Returns the number
/// of refreshes triggered.
pub fn refresh_all_known<T>(
    collection: &ObservableCollection<T>,
    keys: impl IntoIterator<Item = T::Id>,
) -> usize
where
    T: Refreshable,
    T::Id: Send + 'static,
{
    let mut seen = HashSet::new();
    keys.into_iter()
        .filter(|key| seen.insert(key.clone()))
        .filter(|key| refresh_known(collection, key))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, PoisonError};

    use ledgerdesk_core::CommandId;
    use ledgerdesk_events::{EventBus, InMemoryEventBus, Subscription};

    use crate::engine::command::{CommandEvent, CommandRef, ExecutionHandle};

    struct Entry {
        key: u32,
        ready: bool,
        refresh: Arc<CountingRefresh>,
    }

    impl Entity for Entry {
        type Id = u32;

        fn id(&self) -> &Self::Id {
            &self.key
        }
    }

    impl ContextObject for Entry {
        fn describe(&self) -> String {
            format!("entry {}", self.key)
        }
    }

    impl Refreshable for Entry {
        fn refresh_command(&self) -> Option<Arc<dyn TaskCommand<Self>>> {
            Some(self.refresh.clone())
        }
    }

    #[derive(Default)]
    struct CountingRefresh {
        targets: Mutex<Vec<u32>>,
        events: InMemoryEventBus<CommandEvent>,
    }

    impl TaskCommand<Entry> for CountingRefresh {
        fn command(&self) -> CommandRef {
            CommandRef {
                id: CommandId::new(),
                name: "CountingRefresh",
            }
        }

        fn can_execute(&self, target: &Entry) -> bool {
            target.ready
        }

        fn execute(&self, target: Arc<Entry>) {
            self.targets
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(target.key);
        }

        fn execution_task(&self) -> Option<ExecutionHandle> {
            None
        }

        fn subscribe(&self) -> Subscription<CommandEvent> {
            self.events.subscribe()
        }
    }

    #[test]
    fn only_known_and_ready_entries_are_refreshed_once() {
        let refresh = Arc::new(CountingRefresh::default());
        let entries = ObservableCollection::new("entries");
        for (key, ready) in [(1, true), (2, false)] {
            entries.push(Arc::new(Entry {
                key,
                ready,
                refresh: refresh.clone(),
            }));
        }

        let triggered = refresh_all_known(&entries, [1, 1, 2, 3]);

        assert_eq!(triggered, 1);
        assert_eq!(*refresh.targets.lock().unwrap(), vec![1]);
    }
}
