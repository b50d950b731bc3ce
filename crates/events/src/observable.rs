//! Observable-field host.
//!
//! Each view owns one `PropertyNotifier`. Its setters go through
//! [`PropertyNotifier::set`], which assigns the new value only when it differs from
//! the current one and then raises one `PropertyChanged` for the field followed by one
//! per derived field declared in the view's `DependencyGraph`.
//!
//! ```text
//! set credit ──▶ "credit" ──▶ "available"
//! set balance ─▶ "balance" ─▶ "available"
//! ```
//!
//! The graph is declared once per view type as a `const`, so the dispatch order is
//! fixed: the base field first, then its dependents left-to-right in declaration
//! order, then dependents of those dependents (breadth-first, each field at most once).

use std::sync::{Mutex, PoisonError};

use crate::bus::{EventBus, Subscription};
use crate::in_memory_bus::InMemoryEventBus;

/// Notification that a named field of a view changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyChanged {
    /// Logical name of the view type (e.g. "account").
    pub source: &'static str,
    /// Logical name of the field.
    pub property: &'static str,
}

/// Static declaration of which derived fields depend on which fields.
#[derive(Debug, Clone, Copy)]
pub struct DependencyGraph {
    edges: &'static [(&'static str, &'static [&'static str])],
}

impl DependencyGraph {
    pub const EMPTY: DependencyGraph = DependencyGraph { edges: &[] };

    pub const fn new(edges: &'static [(&'static str, &'static [&'static str])]) -> Self {
        Self { edges }
    }

    /// Direct dependents of `field`, in declaration order.
    pub fn dependents_of(&self, field: &str) -> &'static [&'static str] {
        self.edges
            .iter()
            .find(|(base, _)| *base == field)
            .map(|(_, dependents)| *dependents)
            .unwrap_or(&[])
    }

    /// Every field to notify when `field` changes, starting with `field` itself.
    pub fn notification_order(&self, field: &'static str) -> Vec<&'static str> {
        let mut order = vec![field];
        let mut cursor = 0;
        while cursor < order.len() {
            for dependent in self.dependents_of(order[cursor]) {
                if !order.contains(dependent) {
                    order.push(dependent);
                }
            }
            cursor += 1;
        }
        order
    }
}

/// Raises property-changed notifications for one view.
#[derive(Debug)]
pub struct PropertyNotifier {
    source: &'static str,
    graph: DependencyGraph,
    bus: InMemoryEventBus<PropertyChanged>,
}

impl PropertyNotifier {
    pub fn new(source: &'static str, graph: DependencyGraph) -> Self {
        Self {
            source,
            graph,
            bus: InMemoryEventBus::new(),
        }
    }

    pub fn source(&self) -> &'static str {
        self.source
    }

    pub fn subscribe(&self) -> Subscription<PropertyChanged> {
        self.bus.subscribe()
    }

    /// Notify `property` and every field derived from it.
    pub fn raise(&self, property: &'static str) {
        for name in self.graph.notification_order(property) {
            let message = PropertyChanged {
                source: self.source,
                property: name,
            };
            if let Err(e) = self.bus.publish(message) {
                tracing::warn!(source = self.source, property = name, error = ?e, "property notification dropped");
            }
        }
    }

    /// Assign `value` to `slot` and notify, unless the value is unchanged.
    ///
    /// Returns whether the slot changed.
    pub fn set<T: PartialEq>(&self, slot: &mut T, value: T, property: &'static str) -> bool {
        if *slot == value {
            return false;
        }
        *slot = value;
        self.raise(property);
        true
    }
}

/// A view's mutable fields behind one lock, paired with its notifier.
///
/// Reads and writes are short critical sections; notifications are published while the
/// lock is held so concurrent setters on the same view notify in assignment order.
#[derive(Debug)]
pub struct ObservableState<S> {
    state: Mutex<S>,
    notifier: PropertyNotifier,
}

impl<S> ObservableState<S> {
    pub fn new(source: &'static str, graph: DependencyGraph, initial: S) -> Self {
        Self {
            state: Mutex::new(initial),
            notifier: PropertyNotifier::new(source, graph),
        }
    }

    pub fn subscribe(&self) -> Subscription<PropertyChanged> {
        self.notifier.subscribe()
    }

    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Set one field through the notifier; see [`PropertyNotifier::set`].
    pub fn set<T: PartialEq>(
        &self,
        property: &'static str,
        value: T,
        slot: impl FnOnce(&mut S) -> &mut T,
    ) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        self.notifier.set(slot(&mut state), value, property)
    }

    /// Mutate the state directly and raise `property` when `f` reports a change.
    pub fn update(&self, property: &'static str, f: impl FnOnce(&mut S) -> bool) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let changed = f(&mut state);
        if changed {
            self.notifier.raise(property);
        }
        changed
    }
}
