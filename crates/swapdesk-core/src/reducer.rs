//! Applying remote call outcomes to a local collection
//!
//! [`apply_mutation_result`] is the only place a collection changes after a
//! successful mutation. It is pure so the rules can be tested without any
//! network code.

use crate::types::{Action, Entity, EntityId};

/// What a successful remote mutation told us
#[derive(Debug, Clone, PartialEq)]
pub enum MutationResult<E> {
    /// The server returned the updated record
    Updated(E),
    /// The server only acknowledged; apply the action's local patch
    Acknowledged(Action),
    Removed,
    Created(E),
}

/// Return a new collection with `result` applied to the entity with `id`.
///
/// Only the matching entity changes. An unknown id leaves the collection as
/// it was, except for `Created`, which appends (or replaces a record that
/// already carries the same id).
pub fn apply_mutation_result<E: Entity>(
    collection: &[E],
    id: EntityId,
    result: &MutationResult<E>,
) -> Vec<E> {
    match result {
        MutationResult::Updated(updated) => collection
            .iter()
            .map(|item| {
                if item.id() == id {
                    updated.clone()
                } else {
                    item.clone()
                }
            })
            .collect(),
        MutationResult::Acknowledged(action) => collection
            .iter()
            .map(|item| {
                let mut item = item.clone();
                if item.id() == id {
                    item.apply_action(*action);
                }
                item
            })
            .collect(),
        MutationResult::Removed => collection
            .iter()
            .filter(|item| item.id() != id)
            .cloned()
            .collect(),
        MutationResult::Created(created) => {
            let mut next = collection.to_vec();
            match next.iter_mut().find(|item| item.id() == created.id()) {
                Some(existing) => *existing = created.clone(),
                None => next.push(created.clone()),
            }
            next
        }
    }
}

/// Drop records whose id already appeared earlier in the list.
pub(crate) fn dedupe_by_id<E: Entity>(items: Vec<E>) -> (Vec<E>, usize) {
    let mut seen = std::collections::HashSet::with_capacity(items.len());
    let before = items.len();
    let kept: Vec<E> = items.into_iter().filter(|item| seen.insert(item.id())).collect();
    let dropped = before - kept.len();
    (kept, dropped)
}
