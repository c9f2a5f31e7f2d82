//! Authentication seams

use async_trait::async_trait;

use super::{Ack, ListResponse, Patch, RemoteCollection, UpdateResponse};
use crate::error::{Error, Result};
use crate::session::{SessionStore, SessionUser};
use crate::types::{Entity, EntityId};

/// Exchanges credentials for a bearer token
#[async_trait(?Send)]
pub trait AuthService {
    async fn login(&self, email: &str, password: &str) -> Result<(String, SessionUser)>;
}

/// Accepts a single configured administrator
#[derive(Debug, Clone)]
pub struct MockAuth {
    email: String,
    password: String,
}

impl MockAuth {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[async_trait(?Send)]
impl AuthService for MockAuth {
    async fn login(&self, email: &str, password: &str) -> Result<(String, SessionUser)> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(Error::InvalidInput("Email and password are required".to_string()));
        }
        if !email.trim().eq_ignore_ascii_case(&self.email) || password != self.password {
            return Err(Error::Unauthorized);
        }
        let name = email.split('@').next().unwrap_or("admin").to_string();
        let token = format!("mock-{}-{}", name, chrono::Utc::now().timestamp());
        Ok((
            token,
            SessionUser {
                id: 1,
                name,
                email: self.email.clone(),
                role: "admin".to_string(),
            },
        ))
    }
}

/// Wraps a remote so that a 401 from any call tears the session down.
pub struct Authenticated<R> {
    inner: R,
    session: SessionStore,
}

impl<R> Authenticated<R> {
    pub fn new(inner: R, session: SessionStore) -> Self {
        Self { inner, session }
    }

    fn check<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(Error::Unauthorized) = &result {
            tracing::warn!("API answered 401, ending session");
            self.session.handle_unauthorized();
        }
        result
    }
}

#[async_trait(?Send)]
impl<E: Entity, R: RemoteCollection<E>> RemoteCollection<E> for Authenticated<R> {
    async fn list(&self) -> Result<ListResponse<E>> {
        self.check(self.inner.list().await)
    }

    async fn create(&self, payload: &E::Draft) -> Result<E> {
        self.check(self.inner.create(payload).await)
    }

    async fn update(&self, id: EntityId, patch: &Patch) -> Result<UpdateResponse<E>> {
        self.check(self.inner.update(id, patch).await)
    }

    async fn delete(&self, id: EntityId) -> Result<Ack> {
        self.check(self.inner.delete(id).await)
    }
}
