//! SwapDesk Core Library
//!
//! Entity catalogue, list-view synchronization, remote collaborators, session
//! handling and configuration for the SwapDesk administrative dashboard.
//! Nothing in here touches the browser; the web UI lives in `swapdesk-admin`.

pub mod config;
pub mod confirm;
pub mod error;
pub mod filter;
pub mod notify;
pub mod overview;
pub mod reducer;
pub mod remote;
pub mod seed;
pub mod session;
pub mod sync;
pub mod types;

pub use config::{DashboardConfig, DataSource};
pub use confirm::{AlwaysConfirm, Confirm};
pub use error::{Error, Result};
pub use filter::{apply_filter, DateRange, Query, SizeBucket};
pub use notify::{Notifications, Toast, ToastLevel};
pub use overview::DashboardStats;
pub use reducer::{apply_mutation_result, MutationResult};
pub use remote::{Ack, Authenticated, ListResponse, MockCollection, Patch, RemoteCollection, UpdateResponse};
pub use seed::SeedData;
pub use session::{Session, SessionStore, SessionUser, TeardownReason};
pub use sync::{ActionOutcome, CreateOutcome, ListView, LoadOutcome};
pub use types::{Action, Entity, EntityId, EntityKind};

/// SwapDesk version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default base path of the admin REST API
pub const DEFAULT_API_BASE: &str = "/api/v1";

/// Default `localStorage` key for the persisted session
pub const DEFAULT_SESSION_KEY: &str = "swapdesk_session";
