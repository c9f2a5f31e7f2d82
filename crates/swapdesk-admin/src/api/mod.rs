//! Remote access for the browser
//!
//! HTTP implementations of the core remote traits, `localStorage` glue, and
//! the [`Backend`] that hands each page its collection.

mod backend;
mod client;
mod storage;

pub use backend::{Backend, Delayed};
pub use client::{HttpAuth, HttpCollection};
pub use storage::{load_config, LocalStorage, API_URL_KEY, DATA_SOURCE_KEY};
