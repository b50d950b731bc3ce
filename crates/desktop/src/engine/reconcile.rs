//! Reconciliation of fetched records into keyed observable collections.
//!
//! For each remote record, in remote order:
//! - no local entry with its key: build one with `create_from_remote` and append it
//! - a local entry with its key: `apply_to_existing`, which assigns every mapped field
//!   unconditionally; the observable setters suppress notifications for equal values
//!
//! Only the collection passed in is mutated. Entries are never removed or reordered.
//!
//! Two commands reconciling into the same collection concurrently may interleave.
//! That race is tolerated: setters are idempotent per field, and `push` refuses a
//! second entry for a key, in which case the record is applied to the winner instead.

use std::sync::Arc;

use ledgerdesk_core::Entity;
use ledgerdesk_events::ObservableCollection;

/// What one reconcile pass did.
#[derive(Debug)]
pub struct ReconcileOutcome<T> {
    /// Newly appended entries, in remote order.
    pub inserted: Vec<Arc<T>>,
    /// Number of records applied to an existing entry.
    pub updated: usize,
    /// Number of records dropped because their group was unknown.
    pub dropped: usize,
}

impl<T> Default for ReconcileOutcome<T> {
    fn default() -> Self {
        Self {
            inserted: Vec::new(),
            updated: 0,
            dropped: 0,
        }
    }
}

fn reconcile_one<T, R>(
    local: &ObservableCollection<T>,
    key: T::Id,
    record: &R,
    outcome: &mut ReconcileOutcome<T>,
    apply_to_existing: impl Fn(&T, &R),
    create_from_remote: impl FnOnce(&R) -> T,
) where
    T: Entity,
    T::Id: Send + 'static,
{
    if let Some(existing) = local.find(&key) {
        apply_to_existing(&existing, record);
        outcome.updated += 1;
        return;
    }

    let entry = Arc::new(create_from_remote(record));
    if local.push(entry.clone()).is_some() {
        outcome.inserted.push(entry);
    } else if let Some(winner) = local.find(&key) {
        apply_to_existing(&winner, record);
        outcome.updated += 1;
    }
}

pub fn reconcile<T, R>(
    local: &ObservableCollection<T>,
    remote: impl IntoIterator<Item = R>,
    key_of: impl Fn(&R) -> T::Id,
    apply_to_existing: impl Fn(&T, &R),
    create_from_remote: impl Fn(&R) -> T,
) -> ReconcileOutcome<T>
where
    T: Entity,
    T::Id: Send + 'static,
{
    let mut outcome = ReconcileOutcome::default();
    for record in remote {
        let key = key_of(&record);
        reconcile_one(
            local,
            key,
            &record,
            &mut outcome,
            &apply_to_existing,
            &create_from_remote,
        );
    }

    tracing::debug!(
        collection = local.name(),
        inserted = outcome.inserted.len(),
        updated = outcome.updated,
        "reconciled"
    );
    outcome
}

/// Like [`reconcile`], for records that must resolve a group in `groups` first.
///
/// A record whose group is unknown is dropped: no insert, no update, no error and no
/// notification. Only `outcome.dropped` and a debug log record it.
pub fn reconcile_grouped<T, R, G>(
    local: &ObservableCollection<T>,
    remote: impl IntoIterator<Item = R>,
    groups: &ObservableCollection<G>,
    group_of: impl Fn(&R) -> G::Id,
    key_of: impl Fn(&R) -> T::Id,
    apply_to_existing: impl Fn(&T, &R, Arc<G>),
    create_from_remote: impl Fn(&R, Arc<G>) -> T,
) -> ReconcileOutcome<T>
where
    T: Entity,
    T::Id: Send + 'static,
    G: Entity,
    G::Id: Send + 'static,
{
    let mut outcome = ReconcileOutcome::default();
    for record in remote {
        let group_key = group_of(&record);
        let Some(group) = groups.find(&group_key) else {
            tracing::debug!(collection = local.name(), group = ?group_key, "record with unknown group dropped");
            outcome.dropped += 1;
            continue;
        };

        let key = key_of(&record);
        reconcile_one(
            local,
            key,
            &record,
            &mut outcome,
            |existing, record| apply_to_existing(existing, record, group.clone()),
            |record| create_from_remote(record, group.clone()),
        );
    }

    tracing::debug!(
        collection = local.name(),
        inserted = outcome.inserted.len(),
        updated = outcome.updated,
        dropped = outcome.dropped,
        "reconciled"
    );
    outcome
}
