//! In-memory backend
//!
//! Until the platform API exists the dashboard runs against this. It behaves
//! like the real endpoints: ids and timestamps are assigned on create, patches
//! are merged into the stored record on update, and unknown ids are 404s.

use async_trait::async_trait;
use chrono::Utc;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use super::{Ack, ListResponse, Patch, RemoteCollection, UpdateResponse};
use crate::error::{Error, Result};
use crate::types::{Entity, EntityId};

/// Operation selector for failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOp {
    List,
    Create,
    Update,
    Delete,
}

/// Recorded call, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    List,
    Create(serde_json::Value),
    Update(EntityId, Patch),
    Delete(EntityId),
}

type UpdateHook<E> = Rc<dyn Fn(&mut E, &Patch)>;

struct MockState<E> {
    items: Vec<E>,
    next_id: u64,
    failures: HashMap<MockOp, VecDeque<Error>>,
    calls: Vec<MockCall>,
    ack_updates: bool,
    update_hook: Option<UpdateHook<E>>,
}

/// Shared handle to an in-memory collection; clones see the same data.
pub struct MockCollection<E> {
    state: Rc<RefCell<MockState<E>>>,
}

impl<E> Clone for MockCollection<E> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<E: Entity> Default for MockCollection<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> MockCollection<E> {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    pub fn with_items(items: Vec<E>) -> Self {
        let next_id = items.iter().map(|i| i.id().0).max().unwrap_or(0) + 1;
        Self {
            state: Rc::new(RefCell::new(MockState {
                items,
                next_id,
                failures: HashMap::new(),
                calls: Vec::new(),
                ack_updates: false,
                update_hook: None,
            })),
        }
    }

    /// Answer updates with `{ "success": true }` instead of the record
    pub fn ack_updates(self) -> Self {
        self.state.borrow_mut().ack_updates = true;
        self
    }

    /// Run `hook` on every updated record, after the patch is merged.
    /// Used for fields the server derives, such as member counts.
    pub fn with_update_hook(self, hook: impl Fn(&mut E, &Patch) + 'static) -> Self {
        self.state.borrow_mut().update_hook = Some(Rc::new(hook));
        self
    }

    /// Make the next call of `op` fail with `error`. Queued failures are
    /// consumed in order.
    pub fn fail_next(&self, op: MockOp, error: Error) {
        self.state
            .borrow_mut()
            .failures
            .entry(op)
            .or_default()
            .push_back(error);
    }

    pub fn items(&self) -> Vec<E> {
        self.state.borrow().items.clone()
    }

    pub fn replace_items(&self, items: Vec<E>) {
        let mut state = self.state.borrow_mut();
        state.next_id = state
            .next_id
            .max(items.iter().map(|i| i.id().0).max().unwrap_or(0) + 1);
        state.items = items;
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.state.borrow().calls.clone()
    }

    pub fn call_count(&self, op: MockOp) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|call| call.op() == op)
            .count()
    }

    fn begin(&self, call: MockCall) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let op = call.op();
        state.calls.push(call);
        match state.failures.get_mut(&op).and_then(|q| q.pop_front()) {
            Some(error) => {
                tracing::debug!(?op, %error, "Mock backend injecting failure");
                Err(error)
            }
            None => Ok(()),
        }
    }
}

impl MockCall {
    pub fn op(&self) -> MockOp {
        match self {
            MockCall::List => MockOp::List,
            MockCall::Create(_) => MockOp::Create,
            MockCall::Update(..) => MockOp::Update,
            MockCall::Delete(_) => MockOp::Delete,
        }
    }
}

fn merge_patch(target: &mut serde_json::Value, patch: &Patch) -> Result<()> {
    let object = target
        .as_object_mut()
        .ok_or_else(|| Error::Serialize("record is not a JSON object".to_string()))?;
    for (key, value) in patch {
        object.insert(key.clone(), value.clone());
    }
    Ok(())
}

#[async_trait(?Send)]
impl<E: Entity> RemoteCollection<E> for MockCollection<E> {
    async fn list(&self) -> Result<ListResponse<E>> {
        self.begin(MockCall::List)?;
        Ok(ListResponse::new(self.items()))
    }

    async fn create(&self, payload: &E::Draft) -> Result<E> {
        let mut value =
            serde_json::to_value(payload).map_err(|e| Error::Serialize(e.to_string()))?;
        self.begin(MockCall::Create(value.clone()))?;

        if value.is_null() {
            value = serde_json::Value::Object(Patch::new());
        }

        let mut state = self.state.borrow_mut();
        let id = EntityId(state.next_id);
        let mut fields = Patch::new();
        fields.insert("id".to_string(), serde_json::to_value(id)?);
        fields.insert("created_at".to_string(), serde_json::to_value(Utc::now())?);
        merge_patch(&mut value, &fields)?;

        let created: E = serde_json::from_value(value)?;
        state.next_id += 1;
        state.items.push(created.clone());
        tracing::debug!(kind = ?E::KIND, %id, "Mock backend created record");
        Ok(created)
    }

    async fn update(&self, id: EntityId, patch: &Patch) -> Result<UpdateResponse<E>> {
        self.begin(MockCall::Update(id, patch.clone()))?;

        let mut state = self.state.borrow_mut();
        let index = state
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or(Error::NotFound(id))?;

        let mut value = serde_json::to_value(&state.items[index])
            .map_err(|e| Error::Serialize(e.to_string()))?;
        merge_patch(&mut value, patch)?;
        let mut updated: E = serde_json::from_value(value)?;
        if let Some(hook) = state.update_hook.clone() {
            hook(&mut updated, patch);
        }
        state.items[index] = updated.clone();

        if state.ack_updates {
            Ok(UpdateResponse::Ack(Ack::ok()))
        } else {
            Ok(UpdateResponse::Entity(updated))
        }
    }

    async fn delete(&self, id: EntityId) -> Result<Ack> {
        self.begin(MockCall::Delete(id))?;

        let mut state = self.state.borrow_mut();
        let index = state
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or(Error::NotFound(id))?;
        state.items.remove(index);
        Ok(Ack::ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Announcement, AnnouncementDraft, Audience, Group, Skill, SkillStatus};
    use serde_json::json;

    fn skills() -> MockCollection<Skill> {
        MockCollection::with_items(vec![
            Skill { id: EntityId(1), name: "Guitar".into(), ..Default::default() },
            Skill { id: EntityId(4), name: "Welding".into(), ..Default::default() },
        ])
    }

    #[tokio::test]
    async fn test_list_returns_items() {
        let mock = skills();
        let list = mock.list().await.unwrap();
        assert_eq!(list.into_items().len(), 2);
        assert_eq!(mock.calls(), vec![MockCall::List]);
    }

    #[tokio::test]
    async fn test_update_merges_patch() {
        let mock = skills();
        let mut patch = Patch::new();
        patch.insert("status".into(), json!("approved"));
        let response = mock.update(EntityId(4), &patch).await.unwrap();
        match response {
            UpdateResponse::Entity(skill) => {
                assert_eq!(skill.status, SkillStatus::Approved);
                assert_eq!(skill.name, "Welding");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(mock.items()[1].status, SkillStatus::Approved);
    }

    #[tokio::test]
    async fn test_ack_mode() {
        let mock = skills().ack_updates();
        let response = mock.update(EntityId(1), &Patch::new()).await.unwrap();
        assert_eq!(response, UpdateResponse::Ack(Ack::ok()));
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let mock = skills();
        assert_eq!(mock.delete(EntityId(99)).await, Err(Error::NotFound(EntityId(99))));
        assert_eq!(
            mock.update(EntityId(99), &Patch::new()).await,
            Err(Error::NotFound(EntityId(99)))
        );
    }

    #[tokio::test]
    async fn test_create_assigns_next_id() {
        let mock: MockCollection<Announcement> = MockCollection::new();
        let draft = AnnouncementDraft::new("Hello", "World", Audience::Members);
        let created = mock.create(&draft).await.unwrap();
        assert_eq!(created.id, EntityId(1));
        assert_eq!(created.audience, Audience::Members);
        assert!(created.created_at.is_some());
        let second = mock.create(&draft).await.unwrap();
        assert_eq!(second.id, EntityId(2));
    }

    #[tokio::test]
    async fn test_injected_failures_are_consumed_in_order() {
        let mock = skills();
        mock.fail_next(MockOp::List, Error::Network("down".into()));
        mock.fail_next(MockOp::List, Error::Unauthorized);
        assert_eq!(mock.list().await, Err(Error::Network("down".into())));
        assert_eq!(mock.list().await, Err(Error::Unauthorized));
        assert!(mock.list().await.is_ok());
        assert_eq!(mock.call_count(MockOp::List), 3);
    }

    #[tokio::test]
    async fn test_update_hook() {
        let mock = MockCollection::with_items(vec![Group {
            id: EntityId(1),
            member_count: 5,
            ..Default::default()
        }])
        .with_update_hook(|group: &mut Group, patch| {
            if patch.get("is_member") == Some(&json!(true)) {
                group.member_count += 1;
            }
        });
        let mut patch = Patch::new();
        patch.insert("is_member".into(), json!(true));
        mock.update(EntityId(1), &patch).await.unwrap();
        assert_eq!(mock.items()[0].member_count, 6);
    }
}
