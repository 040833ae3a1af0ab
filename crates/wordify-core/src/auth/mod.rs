//! Authentication module for managing the user session and credentials.
//!
//! This module provides:
//! - `SessionGate`: process-wide session state shared by the API client and UI
//! - `Session`: the on-disk mirror of the session
//! - `CredentialStore`: OS keychain storage for the last used password
//!
//! Tokens expire after 7 days; expired sessions are discarded on load.

pub mod credentials;
pub mod session;

pub use credentials::CredentialStore;
pub use session::{AuthEvent, AuthSnapshot, Session, SessionData, SessionGate};
