//! Session state
//!
//! The session is an explicit service handed to whoever needs it, not a
//! global. It survives reloads through a [`SessionPersistence`] backend
//! (`localStorage` in the browser, memory in tests) and is torn down on
//! logout or when the API answers 401.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{Error, Result};

/// The signed-in administrator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "admin".to_string()
}

impl SessionUser {
    pub fn initial(&self) -> String {
        crate::types::or_unknown(&self.name)
            .chars()
            .next()
            .unwrap_or('A')
            .to_uppercase()
            .to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<SessionUser>,
    pub is_authenticated: bool,
}

impl Session {
    pub fn authenticated(token: impl Into<String>, user: SessionUser) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
            is_authenticated: true,
        }
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownReason {
    Logout,
    Unauthorized,
}

/// Where the serialized session lives between reloads
pub trait SessionPersistence {
    fn load(&self) -> Result<Option<String>>;

    fn save(&self, raw: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// Process-local persistence, for tests and non-browser hosts
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(raw.into()))),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl SessionPersistence for MemoryPersistence {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, raw: &str) -> Result<()> {
        *self.slot.borrow_mut() = Some(raw.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

type TeardownListener = Rc<dyn Fn(TeardownReason)>;

struct StoreInner {
    session: RefCell<Session>,
    persistence: Box<dyn SessionPersistence>,
    listeners: RefCell<Vec<TeardownListener>>,
}

/// Cheaply clonable handle to the current session
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<StoreInner>,
}

impl SessionStore {
    /// Create a store and restore whatever the persistence layer holds.
    pub fn restore(persistence: impl SessionPersistence + 'static) -> Self {
        let session = match persistence.load() {
            Ok(Some(raw)) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) if session.is_authenticated && session.token.is_some() => session,
                Ok(_) => Session::default(),
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding unreadable persisted session");
                    if let Err(e) = persistence.clear() {
                        tracing::warn!(error = %e, "Failed to clear persisted session");
                    }
                    Session::default()
                }
            },
            Ok(None) => Session::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted session");
                Session::default()
            }
        };

        Self {
            inner: Rc::new(StoreInner {
                session: RefCell::new(session),
                persistence: Box::new(persistence),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn current(&self) -> Session {
        self.inner.session.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.session.borrow().is_authenticated
    }

    pub fn token(&self) -> Option<String> {
        self.inner.session.borrow().token.clone()
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.inner.session.borrow().user.clone()
    }

    /// Bearer header value for authenticated calls
    pub fn authorization(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {}", t))
    }

    pub fn sign_in(&self, token: impl Into<String>, user: SessionUser) -> Result<()> {
        let session = Session::authenticated(token, user);
        let raw = serde_json::to_string(&session).map_err(|e| Error::Serialize(e.to_string()))?;
        *self.inner.session.borrow_mut() = session;
        tracing::info!("Session established");
        self.inner.persistence.save(&raw)
    }

    pub fn logout(&self) {
        self.teardown(TeardownReason::Logout);
    }

    /// The API rejected our credentials; drop everything.
    pub fn handle_unauthorized(&self) {
        self.teardown(TeardownReason::Unauthorized);
    }

    /// Register a listener called after every teardown.
    pub fn on_teardown(&self, listener: impl Fn(TeardownReason) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn teardown(&self, reason: TeardownReason) {
        *self.inner.session.borrow_mut() = Session::default();
        if let Err(e) = self.inner.persistence.clear() {
            tracing::warn!(error = %e, "Failed to clear persisted session");
        }
        tracing::info!(?reason, "Session torn down");

        // Listeners may register or read the store; call them on a snapshot.
        let listeners: Vec<TeardownListener> = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener(reason);
        }
    }
}
