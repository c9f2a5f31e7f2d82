//! Reactive glue between Leptos and the core synchronizer

use leptos::*;
use std::rc::Rc;

use swapdesk_core::{Action, Confirm, Entity, EntityId, ListView, Query, RemoteCollection};

use crate::app::AppContext;

/// Asks through `window.confirm`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(prompt).ok())
            .unwrap_or(false)
    }
}

/// Copyable handle to a page's [`ListView`]. Reads through it are reactive.
pub struct ListHandle<E: Entity> {
    view: StoredValue<ListView<E>>,
    version: RwSignal<u64>,
}

impl<E: Entity> Clone for ListHandle<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Entity> Copy for ListHandle<E> {}

impl<E: Entity> ListHandle<E> {
    fn track(&self) {
        self.version.get();
    }

    pub fn project(&self, query: &Query<E::Filter>) -> Vec<E> {
        self.track();
        self.view.with_value(|view| view.apply_filter(query))
    }

    pub fn items(&self) -> Vec<E> {
        self.track();
        self.view.with_value(|view| view.items())
    }

    pub fn len(&self) -> usize {
        self.track();
        self.view.with_value(|view| view.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_loading(&self) -> bool {
        self.track();
        self.view.with_value(|view| view.is_loading())
    }

    pub fn is_creating(&self) -> bool {
        self.track();
        self.view.with_value(|view| view.is_creating())
    }

    pub fn is_in_flight(&self, action: Action, id: EntityId) -> bool {
        self.track();
        self.view.with_value(|view| view.is_in_flight(action, id))
    }

    pub fn reload(&self) {
        let view = self.view.get_value();
        spawn_local(async move {
            view.load().await;
        });
    }

    pub fn act(&self, id: EntityId, action: Action) {
        let view = self.view.get_value();
        spawn_local(async move {
            let outcome = view.perform_action(id, action, &BrowserConfirm).await;
            log::debug!("{} {} -> {:?}", action, id, outcome);
        });
    }

    /// Create a record; `on_created` runs only if the server accepted it.
    pub fn create(&self, draft: E::Draft, on_created: impl FnOnce(E) + 'static) {
        let view = self.view.get_value();
        spawn_local(async move {
            if let swapdesk_core::CreateOutcome::Created(created) = view.create(draft).await {
                on_created(created);
            }
        });
    }
}

/// Mount a [`ListView`] for this component: load on mount, unmount on cleanup.
pub fn use_list_view<E: Entity>(remote: Rc<dyn RemoteCollection<E>>) -> ListHandle<E> {
    let ctx = expect_context::<AppContext>();
    let view = ListView::new(remote, ctx.notifications.clone());
    let version = create_rw_signal(0u64);

    view.subscribe(move || {
        version.try_update(|v| *v += 1);
    });

    let handle = ListHandle {
        view: store_value(view.clone()),
        version,
    };
    handle.reload();

    on_cleanup(move || view.unmount());

    handle
}
