//! API client implementation
//!
//! Makes HTTP requests to the platform's admin REST API. Every collection
//! lives at `{base}{kind path}` and answers with `{ "data": ... }` envelopes.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

use swapdesk_core::error::status_error;
use swapdesk_core::remote::{decode_list, AuthService, Envelope};
use swapdesk_core::{
    Ack, Entity, EntityId, Error, ListResponse, Patch, RemoteCollection, Result, SessionStore,
    SessionUser, UpdateResponse,
};

fn network_error(e: gloo_net::Error) -> Error {
    Error::Network(e.to_string())
}

fn join(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Send a request and return its JSON body (`null` when empty).
async fn send(request: Request) -> Result<serde_json::Value> {
    let method = request.method();
    let url = request.url();
    log::debug!("{:?} {}", method, url);

    let response = request.send().await.map_err(network_error)?;
    read(response).await
}

async fn read(response: Response) -> Result<serde_json::Value> {
    let status = response.status();
    if !response.ok() {
        log::warn!("Request to {} failed with status {}", response.url(), status);
    }
    interpret(status, response.ok(), response.text().await)
}

/// Map a status and body to JSON. An unreadable body on a success status is a
/// network failure, never an empty (`null`) reply.
fn interpret(
    status: u16,
    ok: bool,
    body: std::result::Result<String, gloo_net::Error>,
) -> Result<serde_json::Value> {
    if !ok {
        return Err(status_error(status, body.as_deref().unwrap_or("")));
    }

    let text = body.map_err(network_error)?;
    if text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| Error::Parse(e.to_string()))
}

/// `{ "data": { "success": .. } }`, a bare `{ "success": .. }`, or no body
fn decode_ack(body: serde_json::Value) -> Result<Ack> {
    if body.is_null() {
        return Ok(Ack::ok());
    }
    if let Ok(envelope) = serde_json::from_value::<Envelope<Ack>>(body.clone()) {
        return Ok(envelope.data);
    }
    Ok(serde_json::from_value(body)?)
}

/// One entity collection over HTTP, authenticated with the session's token
pub struct HttpCollection<E> {
    base_url: String,
    session: SessionStore,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> HttpCollection<E> {
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        Self {
            base_url: base_url.into(),
            session,
            _entity: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        join(&self.base_url, E::KIND.path())
    }

    fn item_url(&self, id: EntityId) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.authorization() {
            Some(auth) => request.header("Authorization", &auth),
            None => request,
        }
    }

    fn with_body<B: Serialize>(&self, request: RequestBuilder, body: &B) -> Result<Request> {
        self.authorize(request)
            .json(body)
            .map_err(|e| Error::Serialize(e.to_string()))
    }

    fn without_body(&self, request: RequestBuilder) -> Result<Request> {
        self.authorize(request)
            .build()
            .map_err(|e| Error::Serialize(e.to_string()))
    }
}

#[async_trait(?Send)]
impl<E: Entity> RemoteCollection<E> for HttpCollection<E> {
    async fn list(&self) -> Result<ListResponse<E>> {
        let request = self.without_body(Request::get(&self.collection_url()))?;
        decode_list(send(request).await?)
    }

    async fn create(&self, payload: &E::Draft) -> Result<E> {
        let request = self.with_body(Request::post(&self.collection_url()), payload)?;
        let envelope: Envelope<E> = serde_json::from_value(send(request).await?)?;
        Ok(envelope.data)
    }

    async fn update(&self, id: EntityId, patch: &Patch) -> Result<UpdateResponse<E>> {
        let request = self.with_body(Request::put(&self.item_url(id)), patch)?;
        let envelope: Envelope<UpdateResponse<E>> = serde_json::from_value(send(request).await?)?;
        Ok(envelope.data)
    }

    async fn delete(&self, id: EntityId) -> Result<Ack> {
        let request = self.without_body(Request::delete(&self.item_url(id)))?;
        decode_ack(send(request).await?)
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    user: SessionUser,
}

/// `POST {base}/auth/login`
#[derive(Debug, Clone)]
pub struct HttpAuth {
    base_url: String,
}

impl HttpAuth {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait(?Send)]
impl AuthService for HttpAuth {
    async fn login(&self, email: &str, password: &str) -> Result<(String, SessionUser)> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(Error::InvalidInput("Email and password are required".to_string()));
        }

        let request = Request::post(&join(&self.base_url, "/auth/login"))
            .json(&LoginRequest {
                email: email.trim(),
                password,
            })
            .map_err(|e| Error::Serialize(e.to_string()))?;

        let envelope: Envelope<LoginResponse> = serde_json::from_value(send(request).await?)?;
        Ok((envelope.data.token, envelope.data.user))
    }
}
