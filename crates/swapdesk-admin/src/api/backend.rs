//! Per-entity remotes for the running app
//!
//! Built once at startup from the configuration. With the mock data source
//! every collection is an in-memory [`MockCollection`] seeded with demo data
//! and slowed down by [`Delayed`]; with the HTTP data source each one is an
//! [`HttpCollection`]. Both are wrapped in [`Authenticated`] so a 401 ends
//! the session.

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use serde_json::json;
use std::rc::Rc;

use swapdesk_core::remote::{AuthService, MockAuth};
use swapdesk_core::types::{Announcement, Feedback, Group, Report, Skill, Swap, User};
use swapdesk_core::{
    Ack, Authenticated, DashboardConfig, Entity, EntityId, ListResponse, MockCollection, Patch,
    RemoteCollection, Result, SeedData, SessionStore, UpdateResponse,
};

use super::client::{HttpAuth, HttpCollection};

/// Adds a fixed delay before every call, so loading states are visible
/// against the mock backend.
pub struct Delayed<R> {
    inner: R,
    millis: u32,
}

impl<R> Delayed<R> {
    pub fn new(inner: R, millis: u32) -> Self {
        Self { inner, millis }
    }

    async fn pause(&self) {
        if self.millis > 0 {
            TimeoutFuture::new(self.millis).await;
        }
    }
}

#[async_trait(?Send)]
impl<E: Entity, R: RemoteCollection<E>> RemoteCollection<E> for Delayed<R> {
    async fn list(&self) -> Result<ListResponse<E>> {
        self.pause().await;
        self.inner.list().await
    }

    async fn create(&self, payload: &E::Draft) -> Result<E> {
        self.pause().await;
        self.inner.create(payload).await
    }

    async fn update(&self, id: EntityId, patch: &Patch) -> Result<UpdateResponse<E>> {
        self.pause().await;
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: EntityId) -> Result<Ack> {
        self.pause().await;
        self.inner.delete(id).await
    }
}

/// The remotes every page draws from
#[derive(Clone)]
pub struct Backend {
    pub users: Rc<dyn RemoteCollection<User>>,
    pub skills: Rc<dyn RemoteCollection<Skill>>,
    pub feedback: Rc<dyn RemoteCollection<Feedback>>,
    pub announcements: Rc<dyn RemoteCollection<Announcement>>,
    pub swaps: Rc<dyn RemoteCollection<Swap>>,
    pub groups: Rc<dyn RemoteCollection<Group>>,
    pub reports: Rc<dyn RemoteCollection<Report>>,
    pub auth: Rc<dyn AuthService>,
}

impl Backend {
    pub fn from_config(config: &DashboardConfig, session: &SessionStore) -> Self {
        if config.uses_mock() {
            Self::mock(config, session)
        } else {
            Self::http(config, session)
        }
    }

    fn mock(config: &DashboardConfig, session: &SessionStore) -> Self {
        let seed = SeedData::generate(chrono::Utc::now());
        let latency = config.mock.latency_ms;

        fn wrap<E: Entity>(
            mock: MockCollection<E>,
            latency: u32,
            session: &SessionStore,
        ) -> Rc<dyn RemoteCollection<E>> {
            Rc::new(Authenticated::new(Delayed::new(mock, latency), session.clone()))
        }

        let groups = MockCollection::with_items(seed.groups).with_update_hook(adjust_member_count);

        Self {
            users: wrap(MockCollection::with_items(seed.users), latency, session),
            skills: wrap(MockCollection::with_items(seed.skills), latency, session),
            feedback: wrap(MockCollection::with_items(seed.feedback), latency, session),
            announcements: wrap(MockCollection::with_items(seed.announcements), latency, session),
            swaps: wrap(MockCollection::with_items(seed.swaps), latency, session),
            groups: wrap(groups, latency, session),
            reports: wrap(MockCollection::with_items(seed.reports), latency, session),
            auth: Rc::new(MockAuth::new(
                config.mock.admin_email.clone(),
                config.mock.admin_password.clone(),
            )),
        }
    }

    fn http(config: &DashboardConfig, session: &SessionStore) -> Self {
        fn wrap<E: Entity>(base_url: &str, session: &SessionStore) -> Rc<dyn RemoteCollection<E>> {
            Rc::new(Authenticated::new(
                HttpCollection::new(base_url, session.clone()),
                session.clone(),
            ))
        }

        let base_url = config.api.base_url.as_str();
        Self {
            users: wrap(base_url, session),
            skills: wrap(base_url, session),
            feedback: wrap(base_url, session),
            announcements: wrap(base_url, session),
            swaps: wrap(base_url, session),
            groups: wrap(base_url, session),
            reports: wrap(base_url, session),
            auth: Rc::new(HttpAuth::new(base_url)),
        }
    }
}

/// Server-side member counting, as the real API does it
fn adjust_member_count(group: &mut Group, patch: &Patch) {
    match patch.get("is_member") {
        Some(value) if *value == json!(true) => group.member_count += 1,
        Some(_) => group.member_count = group.member_count.saturating_sub(1),
        None => {}
    }
}
