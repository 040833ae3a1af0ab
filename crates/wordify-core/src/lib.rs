//! Core library for wordify.
//!
//! Everything that does not draw to the terminal lives here: the REST client
//! and its session gate, the data models, local validation, the selection set
//! used for sentence generation, request sequencing and the offline cache.

pub mod api;
pub mod auth;
pub mod cache;
pub mod collection;
pub mod config;
pub mod models;
pub mod request;
pub mod selection;
pub mod utils;
pub mod validation;

pub use api::{ApiClient, ApiError};
pub use auth::{AuthEvent, CredentialStore, SessionData, SessionGate};
pub use collection::Collection;
pub use config::Config;
pub use request::{RequestTracker, Ticket};
pub use selection::Selection;
