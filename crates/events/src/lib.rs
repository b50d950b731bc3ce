//! Change notification plumbing for the view-model layer.
//!
//! - `bus`: transport-agnostic pub/sub contract + subscriptions
//! - `in_memory_bus`: channel-backed fan-out used by every notifier
//! - `observable`: field setters that raise property-changed notifications through a
//!   declared derived-field graph
//! - `collection`: keyed, append-ordered observable collections

pub mod bus;
pub mod collection;
pub mod in_memory_bus;
pub mod observable;

pub use bus::{EventBus, Subscription};
pub use collection::{CollectionChanged, ObservableCollection};
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use observable::{DependencyGraph, ObservableState, PropertyChanged, PropertyNotifier};
