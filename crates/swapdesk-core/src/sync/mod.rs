//! List-view synchronization
//!
//! A [`ListView`] keeps one page's table consistent with a remote collection.
//! It owns the cached collection, the loading flag and the per-row in-flight
//! flags; it never holds a borrow across an `.await`, so any number of calls
//! may be outstanding at once on the single-threaded event loop.
//!
//! Lifecycle per call: `idle -> loading -> (success | error) -> idle`. After
//! [`ListView::unmount`] every late resolution is dropped on the floor.

mod flags;

#[cfg(test)]
mod tests;

pub use flags::InFlight;

use std::cell::RefCell;
use std::rc::Rc;

use crate::confirm::Confirm;
use crate::error::{Error, Result};
use crate::filter::{self, Query};
use crate::notify::Notifications;
use crate::reducer::{apply_mutation_result, dedupe_by_id, MutationResult};
use crate::remote::{RemoteCollection, UpdateResponse};
use crate::types::{Action, Entity, EntityId};

/// Result of [`ListView::load`]
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(usize),
    Failed(Error),
    /// A newer `load` was issued before this one resolved; its result was dropped
    Superseded,
    Detached,
}

/// Result of [`ListView::perform_action`]
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Applied,
    /// The operator declined the confirmation; nothing was sent
    Cancelled,
    AlreadyInFlight,
    NotAllowed,
    NotFound,
    Failed(Error),
    Detached,
}

impl ActionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Result of [`ListView::create`]
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome<E> {
    Created(E),
    Failed(Error),
    Busy,
    Detached,
}

struct ViewState<E> {
    items: Vec<E>,
    loading: bool,
    creating: bool,
    in_flight: InFlight,
    generation: u64,
    mounted: bool,
}

struct Inner<E: Entity> {
    state: RefCell<ViewState<E>>,
    remote: Rc<dyn RemoteCollection<E>>,
    notifications: Notifications,
    listeners: RefCell<Vec<Rc<dyn Fn()>>>,
}

/// View-scoped cache of one entity collection plus the state needed to
/// render and mutate it.
pub struct ListView<E: Entity> {
    inner: Rc<Inner<E>>,
}

impl<E: Entity> Clone for ListView<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E: Entity> ListView<E> {
    pub fn new(remote: Rc<dyn RemoteCollection<E>>, notifications: Notifications) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(ViewState {
                    items: Vec::new(),
                    loading: false,
                    creating: false,
                    in_flight: InFlight::new(),
                    generation: 0,
                    mounted: true,
                }),
                remote,
                notifications,
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    // ============= Accessors =============

    pub fn items(&self) -> Vec<E> {
        self.inner.state.borrow().items.clone()
    }

    pub fn get(&self, id: EntityId) -> Option<E> {
        self.inner
            .state
            .borrow()
            .items
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.state.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.state.borrow().items.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    pub fn is_creating(&self) -> bool {
        self.inner.state.borrow().creating
    }

    pub fn is_in_flight(&self, action: Action, id: EntityId) -> bool {
        self.inner.state.borrow().in_flight.contains(action, id)
    }

    pub fn is_busy(&self, id: EntityId) -> bool {
        self.inner.state.borrow().in_flight.is_busy(id)
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.state.borrow().mounted
    }

    pub fn notifications(&self) -> &Notifications {
        &self.inner.notifications
    }

    /// Filtered projection of the current collection, in collection order.
    /// Recomputed on every call.
    pub fn apply_filter(&self, query: &Query<E::Filter>) -> Vec<E> {
        let state = self.inner.state.borrow();
        filter::apply_filter(&state.items, query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Register a listener called after every state change.
    pub fn subscribe(&self, listener: impl Fn() + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    // ============= Operations =============

    /// Fetch the collection and replace the local copy with it.
    pub async fn load(&self) -> LoadOutcome {
        let generation = {
            let mut state = self.inner.state.borrow_mut();
            if !state.mounted {
                return LoadOutcome::Detached;
            }
            state.generation += 1;
            state.loading = true;
            state.generation
        };
        self.emit();
        tracing::debug!(kind = ?E::KIND, generation, "Loading collection");

        let result = self.inner.remote.list().await;

        let outcome = {
            let mut state = self.inner.state.borrow_mut();
            if !state.mounted {
                tracing::debug!(kind = ?E::KIND, "List resolved after unmount, ignoring");
                return LoadOutcome::Detached;
            }
            if state.generation != generation {
                tracing::debug!(kind = ?E::KIND, generation, latest = state.generation, "Dropping stale list response");
                return LoadOutcome::Superseded;
            }
            state.loading = false;
            match result {
                Ok(response) => {
                    let (items, dropped) = dedupe_by_id(response.into_items());
                    if dropped > 0 {
                        tracing::warn!(kind = ?E::KIND, dropped, "List contained duplicate ids");
                    }
                    let count = items.len();
                    state.items = items;
                    LoadOutcome::Loaded(count)
                }
                Err(e) => LoadOutcome::Failed(e),
            }
        };

        if let LoadOutcome::Failed(e) = &outcome {
            self.inner.notifications.error(format!(
                "Failed to load {}: {}",
                E::KIND.plural(),
                e.user_message()
            ));
        }
        self.emit();
        outcome
    }

    /// Run a row action against the remote and apply its outcome locally.
    pub async fn perform_action(
        &self,
        id: EntityId,
        action: Action,
        confirm: &dyn Confirm,
    ) -> ActionOutcome {
        if !E::supports(action) {
            return ActionOutcome::NotAllowed;
        }

        let label = {
            let state = self.inner.state.borrow();
            if !state.mounted {
                return ActionOutcome::Detached;
            }
            if state.in_flight.contains(action, id) {
                return ActionOutcome::AlreadyInFlight;
            }
            match state.items.iter().find(|item| item.id() == id) {
                None => return ActionOutcome::NotFound,
                Some(item) if !item.allows(action) => return ActionOutcome::NotAllowed,
                Some(item) => item.label(),
            }
        };

        if E::requires_confirmation(action) && !confirm.confirm(&confirmation_prompt::<E>(action, &label)) {
            tracing::debug!(kind = ?E::KIND, %id, %action, "Action cancelled by operator");
            return ActionOutcome::Cancelled;
        }

        {
            let mut state = self.inner.state.borrow_mut();
            if !state.mounted {
                return ActionOutcome::Detached;
            }
            if !state.in_flight.begin(action, id) {
                return ActionOutcome::AlreadyInFlight;
            }
        }
        self.emit();
        tracing::debug!(kind = ?E::KIND, %id, %action, "Dispatching action");

        let result = self.execute(id, action).await;

        let reload = {
            let mut state = self.inner.state.borrow_mut();
            if !state.mounted {
                tracing::debug!(kind = ?E::KIND, %id, %action, "Action resolved after unmount, ignoring");
                return ActionOutcome::Detached;
            }
            state.in_flight.finish(action, id);
            if let Ok(mutation) = &result {
                let next = apply_mutation_result(&state.items, id, mutation);
                state.items = next;
            }
            result.is_ok() && action.requires_reload()
        };

        match &result {
            Ok(_) => {
                self.inner.notifications.success(format!(
                    "{} {}: {}",
                    capitalize(E::KIND.singular()),
                    action.past_tense(),
                    label
                ));
            }
            Err(e) => {
                tracing::warn!(kind = ?E::KIND, %id, %action, code = e.code(), error = %e, "Action failed");
                self.inner.notifications.error(format!(
                    "Failed to {} {}: {}",
                    action,
                    label,
                    e.user_message()
                ));
            }
        }
        self.emit();

        if reload {
            self.load().await;
        }

        match result {
            Ok(_) => ActionOutcome::Applied,
            Err(e) => ActionOutcome::Failed(e),
        }
    }

    /// Create a record remotely and append the server's copy.
    pub async fn create(&self, draft: E::Draft) -> CreateOutcome<E> {
        {
            let mut state = self.inner.state.borrow_mut();
            if !state.mounted {
                return CreateOutcome::Detached;
            }
            if state.creating {
                return CreateOutcome::Busy;
            }
            state.creating = true;
        }
        self.emit();

        let result = self.inner.remote.create(&draft).await;

        {
            let mut state = self.inner.state.borrow_mut();
            if !state.mounted {
                return CreateOutcome::Detached;
            }
            state.creating = false;
            if let Ok(created) = &result {
                let next = apply_mutation_result(
                    &state.items,
                    created.id(),
                    &MutationResult::Created(created.clone()),
                );
                state.items = next;
            }
        }

        let outcome = match result {
            Ok(created) => {
                self.inner.notifications.success(format!(
                    "{} created: {}",
                    capitalize(E::KIND.singular()),
                    created.label()
                ));
                CreateOutcome::Created(created)
            }
            Err(e) => {
                self.inner.notifications.error(format!(
                    "Failed to create {}: {}",
                    E::KIND.singular(),
                    e.user_message()
                ));
                CreateOutcome::Failed(e)
            }
        };
        self.emit();
        outcome
    }

    /// Tear the view down. Outstanding calls resolve into no-ops.
    pub fn unmount(&self) {
        {
            let mut state = self.inner.state.borrow_mut();
            state.mounted = false;
            state.loading = false;
            state.creating = false;
            state.items.clear();
            state.in_flight.clear();
        }
        self.inner.listeners.borrow_mut().clear();
        tracing::debug!(kind = ?E::KIND, "List view unmounted");
    }

    async fn execute(&self, id: EntityId, action: Action) -> Result<MutationResult<E>> {
        if action == Action::Delete {
            let ack = self.inner.remote.delete(id).await?;
            return if ack.success {
                Ok(MutationResult::Removed)
            } else {
                Err(Error::Rejected(format!(
                    "{} {} was not deleted",
                    E::KIND.singular(),
                    id
                )))
            };
        }

        let patch = E::patch_for(action).ok_or_else(|| {
            Error::InvalidInput(format!(
                "cannot {} a {}",
                action,
                E::KIND.singular()
            ))
        })?;

        match self.inner.remote.update(id, &patch).await? {
            UpdateResponse::Entity(updated) => Ok(MutationResult::Updated(updated)),
            UpdateResponse::Ack(ack) if ack.success => Ok(MutationResult::Acknowledged(action)),
            UpdateResponse::Ack(_) => Err(Error::Rejected(format!(
                "{} {} was not {}",
                E::KIND.singular(),
                id,
                action.past_tense()
            ))),
        }
    }

    fn emit(&self) {
        let listeners: Vec<Rc<dyn Fn()>> = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener();
        }
    }
}

/// Question put to the operator before a confirmed action
pub fn confirmation_prompt<E: Entity>(action: Action, label: &str) -> String {
    let question = format!("{} {} \"{}\"?", action.label(), E::KIND.singular(), label);
    if action == Action::Delete {
        format!("{}\n\nThis cannot be undone.", question)
    } else {
        question
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
