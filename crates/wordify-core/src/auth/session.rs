use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Session file name in cache directory
const SESSION_FILE: &str = "session.json";

/// Token lifetime in days.
/// The backend signs tokens with a 7 day expiry.
const TOKEN_EXPIRY_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub user_id: String,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.created_at + Duration::days(TOKEN_EXPIRY_DAYS)
    }

    /// Name to greet the user with; falls back to the email address
    pub fn greeting_name(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.email
        } else {
            &self.display_name
        }
    }
}

/// Persisted mirror of the session on disk.
pub struct Session {
    cache_dir: PathBuf,
    pub data: Option<SessionData>,
}

impl Session {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            data: None,
        }
    }

    /// Load session from disk. Expired sessions are ignored.
    pub fn load(&mut self) -> Result<bool> {
        let path = self.session_path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .context("Failed to read session file")?;
            let data: SessionData = serde_json::from_str(&contents)
                .context("Failed to parse session file")?;

            if !data.is_expired() {
                self.data = Some(data);
                return Ok(true);
            }
            debug!("Persisted session expired");
        }
        Ok(false)
    }

    /// Save session to disk
    pub fn save(&self) -> Result<()> {
        if let Some(ref data) = self.data {
            let path = self.session_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = serde_json::to_string_pretty(data)?;
            std::fs::write(path, contents)?;
        }
        Ok(())
    }

    /// Clear session data
    pub fn clear(&mut self) -> Result<()> {
        self.data = None;
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    pub fn update(&mut self, data: SessionData) {
        self.data = Some(data);
    }

    pub fn token(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.token.as_str())
    }

    fn session_path(&self) -> PathBuf {
        self.cache_dir.join(SESSION_FILE)
    }
}

/// What last changed the auth state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// Initial state, possibly restored from disk
    Restored,
    LoggedIn,
    LoggedOut,
    /// The server rejected the token
    Expired,
}

#[derive(Debug, Clone)]
pub struct AuthSnapshot {
    pub session: Option<SessionData>,
    pub event: AuthEvent,
}

/// Process-wide session state.
///
/// Holds at most one session. Every clone shares the same state, and every
/// subscriber sees each login, logout and expiry.
#[derive(Clone)]
pub struct SessionGate {
    store: Arc<Mutex<Session>>,
    state: Arc<watch::Sender<AuthSnapshot>>,
}

impl SessionGate {
    /// Create an empty gate backed by `cache_dir`
    pub fn new(cache_dir: PathBuf) -> Self {
        Self::from_session(Session::new(cache_dir))
    }

    /// Create a gate, restoring any persisted session that has not expired
    pub fn restore(cache_dir: PathBuf) -> Self {
        let mut session = Session::new(cache_dir);
        match session.load() {
            Ok(true) => debug!("Session restored from disk"),
            Ok(false) => debug!("No persisted session"),
            Err(e) => warn!(error = %e, "Failed to load persisted session"),
        }
        Self::from_session(session)
    }

    fn from_session(session: Session) -> Self {
        let snapshot = AuthSnapshot {
            session: session.data.clone(),
            event: AuthEvent::Restored,
        };
        let (tx, _rx) = watch::channel(snapshot);
        Self {
            store: Arc::new(Mutex::new(session)),
            state: Arc::new(tx),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state
            .borrow()
            .session
            .as_ref()
            .map(|d| !d.is_expired())
            .unwrap_or(false)
    }

    /// Current bearer token, if a live session exists
    pub fn token(&self) -> Option<String> {
        self.state
            .borrow()
            .session
            .as_ref()
            .filter(|d| !d.is_expired())
            .map(|d| d.token.clone())
    }

    pub fn current(&self) -> Option<SessionData> {
        self.state.borrow().session.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.state.subscribe()
    }

    /// Start a session. Persisting is best effort; the in-memory session is
    /// set either way.
    pub fn login(&self, data: SessionData) {
        let mut store = self.lock_store();
        store.update(data.clone());
        if let Err(e) = store.save() {
            warn!(error = %e, "Failed to persist session");
        }
        info!(email = %data.email, "Session started");
        self.publish(Some(data), AuthEvent::LoggedIn);
    }

    /// End the session at the user's request
    pub fn logout(&self) {
        let mut store = self.lock_store();
        Self::clear_store(&mut store);
        info!("Session ended");
        self.publish(None, AuthEvent::LoggedOut);
    }

    /// End the session because the server rejected its token.
    /// Returns true if a session was actually cleared.
    pub fn invalidate(&self) -> bool {
        let mut store = self.lock_store();
        let had_session = store.data.is_some();
        Self::clear_store(&mut store);
        if had_session {
            warn!("Server rejected session token, signing out");
            self.publish(None, AuthEvent::Expired);
        }
        had_session
    }

    /// End the session only if `token` is still the one in use.
    ///
    /// A 401 for a request sent before a fresh login refers to the old token
    /// and must leave the new session alone. Returns true if a session was
    /// cleared.
    pub fn invalidate_if(&self, token: &str) -> bool {
        let mut store = self.lock_store();
        if store.token() != Some(token) {
            debug!("Ignoring rejection of a token that is no longer current");
            return false;
        }
        Self::clear_store(&mut store);
        warn!("Server rejected session token, signing out");
        self.publish(None, AuthEvent::Expired);
        true
    }

    fn clear_store(store: &mut Session) {
        if let Err(e) = store.clear() {
            warn!(error = %e, "Failed to remove persisted session");
        }
    }

    fn lock_store(&self) -> std::sync::MutexGuard<'_, Session> {
        // The session file is rewritten wholesale, so a poisoned lock is still usable
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(&self, session: Option<SessionData>, event: AuthEvent) {
        self.state.send_replace(AuthSnapshot { session, event });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(created_at: DateTime<Utc>) -> SessionData {
        SessionData {
            token: "tok-123".to_string(),
            user_id: "64f0c0ffee".to_string(),
            email: "ada@example.com".to_string(),
            display_name: "Ada".to_string(),
            created_at,
        }
    }

    #[test]
    fn test_session_expiry() {
        assert!(!sample(Utc::now()).is_expired());
        assert!(sample(Utc::now() - Duration::days(8)).is_expired());
    }

    #[test]
    fn test_greeting_name_falls_back_to_email() {
        let mut data = sample(Utc::now());
        assert_eq!(data.greeting_name(), "Ada");
        data.display_name = "  ".to_string();
        assert_eq!(data.greeting_name(), "ada@example.com");
    }

    #[test]
    fn test_login_persists_and_restores() {
        let dir = tempfile::tempdir().unwrap();
        let gate = SessionGate::new(dir.path().to_path_buf());
        assert!(!gate.is_authenticated());

        gate.login(sample(Utc::now()));
        assert!(gate.is_authenticated());
        assert_eq!(gate.token().as_deref(), Some("tok-123"));
        assert!(dir.path().join(SESSION_FILE).exists());

        let restored = SessionGate::restore(dir.path().to_path_buf());
        assert!(restored.is_authenticated());
        assert_eq!(restored.current().unwrap().email, "ada@example.com");
    }

    #[test]
    fn test_logout_clears_memory_and_disk() {
        let dir = tempfile::tempdir().unwrap();
        let gate = SessionGate::new(dir.path().to_path_buf());
        gate.login(sample(Utc::now()));
        gate.logout();

        assert!(!gate.is_authenticated());
        assert!(gate.token().is_none());
        assert!(!dir.path().join(SESSION_FILE).exists());
        assert_eq!(gate.subscribe().borrow().event, AuthEvent::LoggedOut);
    }

    #[test]
    fn test_invalidate_notifies_subscribers() {
        let dir = tempfile::tempdir().unwrap();
        let gate = SessionGate::new(dir.path().to_path_buf());
        gate.login(sample(Utc::now()));

        let mut rx = gate.subscribe();
        rx.mark_unchanged();
        assert!(gate.clone().invalidate());

        assert!(rx.has_changed().unwrap());
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.event, AuthEvent::Expired);
        assert!(snapshot.session.is_none());
        assert!(!dir.path().join(SESSION_FILE).exists());

        // Second invalidation is a no-op
        assert!(!gate.invalidate());
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_rejected_old_token_keeps_newer_session() {
        let dir = tempfile::tempdir().unwrap();
        let gate = SessionGate::new(dir.path().to_path_buf());
        gate.login(sample(Utc::now()));

        let mut newer = sample(Utc::now());
        newer.token = "tok-456".to_string();
        gate.login(newer);

        assert!(!gate.invalidate_if("tok-123"));
        assert_eq!(gate.token().as_deref(), Some("tok-456"));
        assert!(dir.path().join(SESSION_FILE).exists());
        assert_eq!(gate.subscribe().borrow().event, AuthEvent::LoggedIn);

        assert!(gate.invalidate_if("tok-456"));
        assert!(gate.token().is_none());
        assert_eq!(gate.subscribe().borrow().event, AuthEvent::Expired);
    }

    #[test]
    fn test_restore_ignores_expired_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(dir.path().to_path_buf());
        session.update(sample(Utc::now() - Duration::days(30)));
        session.save().unwrap();

        let gate = SessionGate::restore(dir.path().to_path_buf());
        assert!(!gate.is_authenticated());
        assert!(gate.current().is_none());
    }

    #[test]
    fn test_restore_survives_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SESSION_FILE), "{not json").unwrap();
        let gate = SessionGate::restore(dir.path().to_path_buf());
        assert!(!gate.is_authenticated());
    }
}
