//! Keyed observable collections.

use std::sync::{Arc, PoisonError, RwLock};

use ledgerdesk_core::Entity;

use crate::bus::{EventBus, Subscription};
use crate::in_memory_bus::InMemoryEventBus;

/// Notification that a collection gained an entry.
///
/// Entries are never removed or reordered by the view-model layer, so additions are the
/// only structural change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionChanged<K> {
    Added { key: K, index: usize },
}

/// Append-ordered collection of shared entries, unique by `Entity::id`.
///
/// Entries are `Arc`s: the collection hands out shared references and entries mutate
/// their own observable fields in place.
#[derive(Debug)]
pub struct ObservableCollection<T: Entity> {
    name: &'static str,
    items: RwLock<Vec<Arc<T>>>,
    bus: InMemoryEventBus<CollectionChanged<T::Id>>,
}

impl<T> ObservableCollection<T>
where
    T: Entity,
    T::Id: Send + 'static,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            items: RwLock::new(Vec::new()),
            bus: InMemoryEventBus::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn subscribe(&self) -> Subscription<CollectionChanged<T::Id>> {
        self.bus.subscribe()
    }

    pub fn find(&self, key: &T::Id) -> Option<Arc<T>> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        items.iter().find(|item| item.id() == key).cloned()
    }

    pub fn contains(&self, key: &T::Id) -> bool {
        self.find(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries in insertion order.
    pub fn snapshot(&self) -> Vec<Arc<T>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn keys(&self) -> Vec<T::Id> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        items.iter().map(|item| item.id().clone()).collect()
    }

    /// Append `item` unless an entry with the same key already exists.
    ///
    /// Returns the index of the new entry, or `None` (and leaves the collection
    /// untouched) when the key is taken.
    pub fn push(&self, item: Arc<T>) -> Option<usize> {
        let key = item.id().clone();
        let index = {
            let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
            if items.iter().any(|existing| existing.id() == &key) {
                return None;
            }
            items.push(item);
            items.len() - 1
        };

        if let Err(e) = self.bus.publish(CollectionChanged::Added { key, index }) {
            tracing::warn!(collection = self.name, error = ?e, "collection notification dropped");
        }
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Row {
        key: u32,
    }

    impl Entity for Row {
        type Id = u32;

        fn id(&self) -> &Self::Id {
            &self.key
        }
    }

    #[test]
    fn push_appends_in_order_and_notifies() {
        let rows = ObservableCollection::new("rows");
        let subscription = rows.subscribe();

        assert_eq!(rows.push(Arc::new(Row { key: 7 })), Some(0));
        assert_eq!(rows.push(Arc::new(Row { key: 3 })), Some(1));

        assert_eq!(rows.keys(), vec![7, 3]);
        assert_eq!(
            subscription.drain(),
            vec![
                CollectionChanged::Added { key: 7, index: 0 },
                CollectionChanged::Added { key: 3, index: 1 },
            ]
        );
    }

    #[test]
    fn push_refuses_duplicate_keys() {
        let rows = ObservableCollection::new("rows");
        rows.push(Arc::new(Row { key: 1 }));
        let subscription = rows.subscribe();

        assert_eq!(rows.push(Arc::new(Row { key: 1 })), None);
        assert_eq!(rows.len(), 1);
        assert!(subscription.drain().is_empty());
    }
}
