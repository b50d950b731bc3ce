//! Keyed identity shared by every view that lives in an observable collection.

/// Something with a stable key.
///
/// Collections look entries up by `id()`: two values with the same key are the same
/// logical record even when their fields differ, and a collection holds at most one.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
