//! Remote collaborators
//!
//! Every entity type is served by the same four-operation REST shape. The
//! [`RemoteCollection`] trait is that shape; implementations exist for the
//! in-memory mock backend ([`MockCollection`]) and, in the browser crate, for
//! HTTP.

mod auth;
mod mock;

pub use auth::{AuthService, Authenticated, MockAuth};
pub use mock::{MockCall, MockCollection, MockOp};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

use crate::error::Result;
use crate::types::{Entity, EntityId};

/// Field updates sent with `update`
pub type Patch = serde_json::Map<String, serde_json::Value>;

/// `{ "data": [...] }`, where `data` may be missing or null
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<E> {
    #[serde(default)]
    pub data: Option<Vec<E>>,
}

impl<E> ListResponse<E> {
    pub fn new(items: Vec<E>) -> Self {
        Self { data: Some(items) }
    }

    pub fn empty() -> Self {
        Self { data: None }
    }

    pub fn into_items(self) -> Vec<E> {
        self.data.unwrap_or_default()
    }
}

/// `{ "success": bool }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Body of an `update` response: either the record or a bare acknowledgement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpdateResponse<E> {
    Ack(Ack),
    Entity(E),
}

/// Standard `{ "data": ... }` response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// The four operations every entity endpoint offers.
///
/// Futures are not `Send`: the dashboard runs on a single-threaded event loop.
#[async_trait(?Send)]
pub trait RemoteCollection<E: Entity> {
    async fn list(&self) -> Result<ListResponse<E>>;

    async fn create(&self, payload: &E::Draft) -> Result<E>;

    async fn update(&self, id: EntityId, patch: &Patch) -> Result<UpdateResponse<E>>;

    async fn delete(&self, id: EntityId) -> Result<Ack>;
}

#[async_trait(?Send)]
impl<E: Entity, R: RemoteCollection<E> + ?Sized> RemoteCollection<E> for Rc<R> {
    async fn list(&self) -> Result<ListResponse<E>> {
        (**self).list().await
    }

    async fn create(&self, payload: &E::Draft) -> Result<E> {
        (**self).create(payload).await
    }

    async fn update(&self, id: EntityId, patch: &Patch) -> Result<UpdateResponse<E>> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: EntityId) -> Result<Ack> {
        (**self).delete(id).await
    }
}

/// Decode a list body leniently.
///
/// Accepts `{ "data": [...] }`, `{ "data": null }`, `{}` and a bare array.
/// Items that cannot be decoded (typically a missing or malformed `id`) are
/// skipped with a warning instead of failing the whole list.
pub fn decode_list<E: DeserializeOwned>(body: serde_json::Value) -> Result<ListResponse<E>> {
    let raw = match body {
        serde_json::Value::Array(items) => Some(items),
        serde_json::Value::Object(mut map) => match map.remove("data") {
            Some(serde_json::Value::Array(items)) => Some(items),
            Some(serde_json::Value::Null) | None => None,
            Some(other) => {
                return Err(crate::Error::Parse(format!(
                    "expected a list in `data`, got {}",
                    json_kind(&other)
                )))
            }
        },
        other => {
            return Err(crate::Error::Parse(format!(
                "expected an object or list, got {}",
                json_kind(&other)
            )))
        }
    };

    let Some(raw) = raw else {
        return Ok(ListResponse::empty());
    };

    let mut items = Vec::with_capacity(raw.len());
    for (index, value) in raw.into_iter().enumerate() {
        match serde_json::from_value::<E>(value) {
            Ok(item) => items.push(item),
            Err(e) => tracing::warn!(index, error = %e, "Skipping malformed list item"),
        }
    }
    Ok(ListResponse::new(items))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Skill, User};
    use serde_json::json;

    #[test]
    fn test_decode_list_shapes() {
        let list: ListResponse<User> = decode_list(json!({"data": [{"id": 1}, {"id": 2}]})).unwrap();
        assert_eq!(list.into_items().len(), 2);

        let list: ListResponse<User> = decode_list(json!({"data": null})).unwrap();
        assert!(list.into_items().is_empty());

        let list: ListResponse<User> = decode_list(json!({})).unwrap();
        assert!(list.data.is_none());

        let list: ListResponse<User> = decode_list(json!([{"id": 5}])).unwrap();
        assert_eq!(list.into_items()[0].id, EntityId(5));
    }

    #[test]
    fn test_decode_list_skips_malformed() {
        let list: ListResponse<User> = decode_list(json!({
            "data": [{"id": 1, "name": "ok"}, {"name": "no id"}, {"id": "x"}, {"id": 4}]
        }))
        .unwrap();
        let ids: Vec<u64> = list.into_items().iter().map(|u| u.id.0).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_decode_list_rejects_garbage() {
        assert!(decode_list::<User>(json!("nope")).is_err());
        assert!(decode_list::<User>(json!({"data": 3})).is_err());
    }

    #[test]
    fn test_update_response_variants() {
        let ack: UpdateResponse<Skill> = serde_json::from_value(json!({"success": true})).unwrap();
        assert_eq!(ack, UpdateResponse::Ack(Ack::ok()));

        let entity: UpdateResponse<Skill> =
            serde_json::from_value(json!({"id": 3, "status": "approved"})).unwrap();
        match entity {
            UpdateResponse::Entity(skill) => assert_eq!(skill.id, EntityId(3)),
            other => panic!("expected entity, got {:?}", other),
        }
    }
}
