//! Application state management for the Wordify TUI.
//!
//! This module contains the `App` struct that owns all UI state, the API
//! client and the offline cache. Network calls run as spawned tasks that
//! report back over an mpsc channel; `check_background_tasks` applies their
//! results on the UI loop.

use std::future::Future;
use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use wordify_core::api::user_message;
use wordify_core::auth::AuthSnapshot;
use wordify_core::cache::{CacheAges, CacheManager};
use wordify_core::models::{Definition, Entry, Health, Meaning, SentenceSet, TermKind};
use wordify_core::validation::{self, ValidationError};
use wordify_core::{
    ApiClient, AuthEvent, Collection, Config, CredentialStore, RequestTracker, Selection,
    SessionData, Ticket,
};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Longest email address accepted by the login form
const MAX_EMAIL_LENGTH: usize = 254;

/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

const MAX_NAME_LENGTH: usize = 64;

/// Phrases rarely run past a sentence; longer input is almost certainly a paste accident.
const MAX_TERM_LENGTH: usize = 120;

/// Number of items to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

/// Environment variables prefilling the login form
const EMAIL_ENV: &str = "WORDIFY_EMAIL";
const PASSWORD_ENV: &str = "WORDIFY_PASSWORD";

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Define,
    Words,
    Phrases,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Define => "Define",
            Tab::Words => "My Words",
            Tab::Phrases => "My Phrases",
        }
    }

    /// Get the next tab (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            Tab::Define => Tab::Words,
            Tab::Words => Tab::Phrases,
            Tab::Phrases => Tab::Define,
        }
    }

    /// Get the previous tab (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            Tab::Define => Tab::Phrases,
            Tab::Words => Tab::Define,
            Tab::Phrases => Tab::Words,
        }
    }

    /// The collection shown on this tab, if it is a collection tab
    pub fn kind(&self) -> Option<TermKind> {
        match self {
            Tab::Define => None,
            Tab::Words => Some(TermKind::Word),
            Tab::Phrases => Some(TermKind::Phrase),
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    /// Typing into the lookup box on the Define tab
    Editing,
    Searching,
    ShowingHelp,
    LoggingIn,
    ConfirmingDelete,
    ShowingSentences,
    ConfirmingQuit,
    Quitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::Signup => "Sign up",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        }
    }
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Email,
    Password,
    /// Only present in signup mode
    Name,
    Button,
}

impl LoginFocus {
    pub fn next(&self, mode: AuthMode) -> Self {
        match (self, mode) {
            (LoginFocus::Email, _) => LoginFocus::Password,
            (LoginFocus::Password, AuthMode::Signup) => LoginFocus::Name,
            (LoginFocus::Password, AuthMode::Login) => LoginFocus::Button,
            (LoginFocus::Name, _) => LoginFocus::Button,
            (LoginFocus::Button, _) => LoginFocus::Email,
        }
    }

    pub fn prev(&self, mode: AuthMode) -> Self {
        match (self, mode) {
            (LoginFocus::Email, _) => LoginFocus::Button,
            (LoginFocus::Password, _) => LoginFocus::Email,
            (LoginFocus::Name, _) => LoginFocus::Password,
            (LoginFocus::Button, AuthMode::Signup) => LoginFocus::Name,
            (LoginFocus::Button, AuthMode::Login) => LoginFocus::Password,
        }
    }
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Results sent from spawned network tasks back to the UI loop.
///
/// Errors arrive already rendered as user-facing messages. Variants that
/// belong to a sequenced channel carry the ticket they were issued with.
enum TaskResult {
    Auth(Result<SessionData, String>),
    Health(Result<Health, String>),
    Definition(Ticket, Result<Definition, String>),
    List(TermKind, Ticket, Result<Vec<Entry>, String>),
    /// (kind, text, new id)
    Saved(TermKind, String, Result<String, String>),
    /// (kind, id)
    Deleted(TermKind, String, Result<(), String>),
    Sentences(Ticket, Result<Vec<SentenceSet>, String>),
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    // Core services
    pub config: Config,
    pub api: ApiClient,
    pub cache: CacheManager,
    auth_rx: watch::Receiver<AuthSnapshot>,

    // UI State
    pub state: AppState,
    pub current_tab: Tab,
    pub search_query: String,
    pub status_message: Option<String>,
    pub health_summary: Option<String>,

    // Login form state
    pub auth_mode: AuthMode,
    pub login_email: String,
    pub login_password: String,
    pub login_name: String,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,
    pub authenticating: bool,
    /// Keep the password in the OS keychain after a successful login
    pub remember_password: bool,

    // Define tab
    pub lookup_kind: TermKind,
    pub lookup_input: String,
    pub definition: Option<Definition>,
    pub definition_error: Option<String>,
    lookup: RequestTracker,
    pending_lookup: Option<(TermKind, String)>,
    saving: bool,

    // Collection tabs
    pub words: Collection,
    pub phrases: Collection,
    word_list: RequestTracker,
    phrase_list: RequestTracker,
    pub list_cursor: usize,
    /// Which meaning of the highlighted term is shown (and selected by space)
    pub meaning_index: usize,
    pub selection: Selection,
    pub pending_delete: Option<Entry>,
    deleting: Option<String>,

    // Sentence generation
    pub sentences: Vec<SentenceSet>,
    pub sentences_error: Option<String>,
    pub sentences_scroll: u16,
    generation: RequestTracker,

    // Cache ages for status bar
    pub cache_ages: CacheAges,

    // Background task channel
    task_rx: mpsc::Receiver<TaskResult>,
    task_tx: mpsc::Sender<TaskResult>,
}

impl App {
    /// Create a new application instance around an API client and cache directory
    pub fn new(config: Config, api: ApiClient, cache_dir: PathBuf) -> Result<Self> {
        debug!(?cache_dir, base_url = api.base_url(), "App::new() starting");

        let mut cache = CacheManager::new(cache_dir)?;
        let user_id = api.gate().current().filter(|s| !s.is_expired()).map(|s| s.user_id);
        cache.set_user(user_id.as_deref())?;
        let auth_rx = api.gate().subscribe();
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        let login_email = std::env::var(EMAIL_ENV)
            .ok()
            .or_else(|| config.last_email.clone())
            .unwrap_or_default();
        let login_password = std::env::var(PASSWORD_ENV).unwrap_or_default();

        Ok(Self {
            config,
            api,
            cache,
            auth_rx,

            state: AppState::Normal,
            current_tab: Tab::Define,
            search_query: String::new(),
            status_message: None,
            health_summary: None,

            auth_mode: AuthMode::Login,
            login_email,
            login_password,
            login_name: String::new(),
            login_focus: LoginFocus::Email,
            login_error: None,
            authenticating: false,
            remember_password: true,

            lookup_kind: TermKind::Word,
            lookup_input: String::new(),
            definition: None,
            definition_error: None,
            lookup: RequestTracker::new(),
            pending_lookup: None,
            saving: false,

            words: Collection::new(TermKind::Word),
            phrases: Collection::new(TermKind::Phrase),
            word_list: RequestTracker::new(),
            phrase_list: RequestTracker::new(),
            list_cursor: 0,
            meaning_index: 0,
            selection: Selection::new(),
            pending_delete: None,
            deleting: None,

            sentences: Vec::new(),
            sentences_error: None,
            sentences_scroll: 0,
            generation: RequestTracker::new(),

            cache_ages: CacheAges::default(),

            task_rx: rx,
            task_tx: tx,
        })
    }

    /// Spawn a network task whose result is delivered to `check_background_tasks`
    fn spawn_task<F>(&self, task: F)
    where
        F: Future<Output = TaskResult> + Send + 'static,
    {
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = task.await;
            if let Err(e) = tx.send(result).await {
                error!(error = %e, "Failed to send task result - channel closed");
            }
        });
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    pub fn is_authenticated(&self) -> bool {
        self.api.gate().is_authenticated()
    }

    pub fn session(&self) -> Option<SessionData> {
        self.api.gate().current()
    }

    /// Fill the password field from the keychain when the email is known
    pub fn prefill_saved_password(&mut self) {
        if !self.login_password.is_empty() || self.login_email.is_empty() {
            return;
        }
        match CredentialStore::get_password(&self.login_email) {
            Ok(password) => {
                debug!("Prefilled password from keychain");
                self.login_password = password;
            }
            Err(e) => debug!(error = %e, "No stored password"),
        }
    }

    /// Start the login process (show login overlay)
    pub fn start_login(&mut self) {
        self.state = AppState::LoggingIn;
        self.login_focus = if self.login_email.is_empty() {
            LoginFocus::Email
        } else if self.login_password.is_empty() {
            LoginFocus::Password
        } else {
            LoginFocus::Button
        };
        self.login_error = None;
    }

    pub fn toggle_auth_mode(&mut self) {
        self.auth_mode = self.auth_mode.toggle();
        self.login_error = None;
        if self.login_focus == LoginFocus::Name && self.auth_mode == AuthMode::Login {
            self.login_focus = LoginFocus::Button;
        }
    }

    /// Submit the login or signup form. Invalid input never reaches the server.
    pub fn submit_auth(&mut self) {
        if self.authenticating {
            return;
        }

        let email = self.login_email.trim().to_string();
        let password = self.login_password.clone();
        let checked = match self.auth_mode {
            AuthMode::Login => validation::check_login(&email, &password),
            AuthMode::Signup => validation::check_signup(&email, &password),
        };
        if let Err(e) = checked {
            self.login_error = Some(e.to_string());
            return;
        }

        self.login_error = None;
        self.authenticating = true;

        let api = self.api.clone();
        let mode = self.auth_mode;
        let name = self.login_name.trim().to_string();
        self.spawn_task(async move {
            let result = match mode {
                AuthMode::Login => api.login(&email, &password).await,
                AuthMode::Signup => api.signup(&email, &password, &name).await,
            };
            TaskResult::Auth(result.map_err(|e| user_message(&e)))
        });
    }

    /// Log out, forgetting the stored password and cached lists.
    /// The auth watcher takes the UI back to the login screen.
    pub fn logout(&mut self) {
        if let Some(session) = self.session() {
            if self.remember_password {
                if let Err(e) = CredentialStore::delete(&session.email) {
                    warn!(error = %e, "Failed to delete stored credentials");
                }
            }
        }
        if let Err(e) = self.cache.clear() {
            warn!(error = %e, "Failed to clear cache");
        }
        self.cache_ages = CacheAges::default();
        self.login_password.clear();
        self.api.logout();
    }

    /// React to login, logout and expiry published by the session gate
    fn check_auth_changes(&mut self) {
        if !self.auth_rx.has_changed().unwrap_or(false) {
            return;
        }
        let snapshot = self.auth_rx.borrow_and_update().clone();
        match snapshot.event {
            AuthEvent::Expired => {
                info!("Session expired, returning to login");
                if let Err(e) = self.cache.clear() {
                    warn!(error = %e, "Failed to clear cache");
                }
                self.switch_cache_user(None);
                self.reset_user_data();
                self.start_login();
                self.login_error = Some(SESSION_EXPIRED_MESSAGE.to_string());
            }
            AuthEvent::LoggedOut => {
                info!("Logged out");
                self.switch_cache_user(None);
                self.reset_user_data();
                self.start_login();
            }
            AuthEvent::LoggedIn => {
                let user_id = snapshot.session.map(|s| s.user_id);
                self.switch_cache_user(user_id.as_deref());
                // Only this user's cached copy is shown until the refresh lands
                self.words.clear();
                self.phrases.clear();
                self.selection.clear();
                self.load_from_cache();
            }
            AuthEvent::Restored => {}
        }
    }

    /// Point the list cache at the signed-in user's directory
    fn switch_cache_user(&mut self, user_id: Option<&str>) {
        if let Err(e) = self.cache.set_user(user_id) {
            warn!(error = %e, "Failed to switch cache directory");
        }
        self.cache_ages = self.cache.get_cache_ages();
    }

    /// Drop everything that belongs to the signed-in user
    fn reset_user_data(&mut self) {
        self.words.clear();
        self.phrases.clear();
        self.word_list.reset();
        self.phrase_list.reset();
        self.lookup.reset();
        self.generation.reset();
        self.pending_lookup = None;
        self.definition = None;
        self.definition_error = None;
        self.selection.clear();
        self.sentences.clear();
        self.sentences_error = None;
        self.pending_delete = None;
        self.deleting = None;
        self.saving = false;
        self.list_cursor = 0;
        self.meaning_index = 0;
        self.status_message = None;
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Show the signed-in user's last fetched lists while fresh ones load
    pub fn load_from_cache(&mut self) {
        for kind in [TermKind::Word, TermKind::Phrase] {
            match self.cache.load_entries(kind) {
                Ok(Some(cached)) => self.collection_mut(kind).replace(cached.data),
                Ok(None) => {}
                Err(e) => warn!(%kind, error = %e, "Failed to load cached list"),
            }
        }
        self.cache_ages = self.cache.get_cache_ages();
    }

    // =========================================================================
    // Background Requests
    // =========================================================================

    pub fn check_health(&self) {
        let api = self.api.clone();
        self.spawn_task(async move {
            TaskResult::Health(api.health().await.map_err(|e| user_message(&e)))
        });
    }

    /// Fetch one collection. A newer fetch supersedes any still in flight.
    pub fn refresh_list(&mut self, kind: TermKind) {
        let ticket = self.list_tracker_mut(kind).issue();
        let api = self.api.clone();
        self.spawn_task(async move {
            let result = api.list(kind).await.map_err(|e| user_message(&e));
            TaskResult::List(kind, ticket, result)
        });
    }

    pub fn refresh_collections(&mut self) {
        info!("Refreshing collections");
        self.refresh_list(TermKind::Word);
        self.refresh_list(TermKind::Phrase);
    }

    /// Look up the term in the lookup box
    pub fn submit_lookup(&mut self) {
        let kind = self.lookup_kind;
        let term = match validation::normalize_term(&self.lookup_input, kind) {
            Ok(term) => term,
            Err(e) => {
                self.definition_error = Some(e.to_string());
                return;
            }
        };

        let request = (kind, term.clone());
        if self.lookup.is_loading() && self.pending_lookup.as_ref() == Some(&request) {
            debug!(%kind, "Lookup already in flight");
            return;
        }

        let ticket = self.lookup.issue();
        self.pending_lookup = Some(request);
        self.definition_error = None;

        let api = self.api.clone();
        self.spawn_task(async move {
            let result = api.define(kind, &term).await.map_err(|e| user_message(&e));
            TaskResult::Definition(ticket, result)
        });
    }

    /// Save the current lookup result to the matching collection
    pub fn save_definition(&mut self) {
        if self.saving {
            return;
        }
        let Some(definition) = self.definition.clone() else {
            self.definition_error = Some(ValidationError::NothingToSave.to_string());
            return;
        };

        self.saving = true;
        let api = self.api.clone();
        self.spawn_task(async move {
            let result = api.add(&definition).await.map_err(|e| user_message(&e));
            TaskResult::Saved(definition.kind, definition.text, result)
        });
    }

    /// Ask for confirmation before deleting the highlighted entry
    pub fn request_delete(&mut self) {
        if self.deleting.is_some() {
            self.status_message = Some("A delete is already in progress".to_string());
            return;
        }
        if let Some(entry) = self.current_entry().cloned() {
            self.pending_delete = Some(entry);
            self.state = AppState::ConfirmingDelete;
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.state = AppState::Normal;
    }

    pub fn confirm_delete(&mut self) {
        self.state = AppState::Normal;
        let Some(entry) = self.pending_delete.take() else {
            return;
        };

        self.deleting = Some(entry.id.clone());
        let api = self.api.clone();
        self.spawn_task(async move {
            let result = api
                .delete_entry(entry.kind, &entry.id)
                .await
                .map_err(|e| user_message(&e));
            TaskResult::Deleted(entry.kind, entry.id, result)
        });
    }

    /// Generate sentences for the current selection. An empty selection
    /// is reported in the status bar and sends nothing.
    pub fn generate_sentences(&mut self) {
        let Some(kind) = self.current_tab.kind() else {
            return;
        };
        if self.generation.is_loading() {
            return;
        }
        let items = match self.selection.to_request() {
            Ok(items) => items,
            Err(e) => {
                self.status_message = Some(e.to_string());
                return;
            }
        };

        let ticket = self.generation.issue();
        self.sentences.clear();
        self.sentences_error = None;
        self.sentences_scroll = 0;
        self.state = AppState::ShowingSentences;

        let api = self.api.clone();
        self.spawn_task(async move {
            let result = api
                .frame_sentences(kind, &items)
                .await
                .map_err(|e| user_message(&e));
            TaskResult::Sentences(ticket, result)
        });
    }

    /// Check for completed background tasks and process results
    pub fn check_background_tasks(&mut self) {
        let mut results = Vec::new();
        while let Ok(result) = self.task_rx.try_recv() {
            results.push(result);
        }
        for result in results {
            self.process_task_result(result);
        }
        self.check_auth_changes();
    }

    fn process_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::Auth(Ok(session)) => {
                self.authenticating = false;
                if self.remember_password {
                    if let Err(e) = CredentialStore::store(&session.email, &self.login_password) {
                        warn!(error = %e, "Failed to store credentials");
                    }
                }
                self.config.last_email = Some(session.email.clone());
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }
                info!(email = %session.email, "Login successful");

                self.login_password.clear();
                self.login_error = None;
                self.state = AppState::Normal;
                self.status_message = Some(format!("Welcome, {}", session.greeting_name()));
                self.refresh_collections();
            }
            TaskResult::Auth(Err(message)) => {
                self.authenticating = false;
                self.login_error = Some(message);
            }
            TaskResult::Health(Ok(health)) => {
                self.health_summary = Some(health.summary());
            }
            TaskResult::Health(Err(message)) => {
                warn!(%message, "Health check failed");
                self.health_summary = Some("API offline".to_string());
            }
            TaskResult::Definition(ticket, result) => {
                if !self.lookup.complete(ticket) {
                    debug!(?ticket, "Discarding stale definition");
                    return;
                }
                self.pending_lookup = None;
                match result {
                    Ok(definition) => {
                        self.definition = Some(definition);
                        self.definition_error = None;
                        self.meaning_index = 0;
                    }
                    Err(message) => self.definition_error = Some(message),
                }
            }
            TaskResult::List(kind, ticket, result) => {
                if !self.list_tracker_mut(kind).complete(ticket) {
                    debug!(%kind, ?ticket, "Discarding stale list");
                    return;
                }
                match result {
                    Ok(entries) => self.apply_list(kind, entries),
                    Err(message) => self.status_message = Some(message),
                }
            }
            TaskResult::Saved(kind, text, result) => {
                self.saving = false;
                match result {
                    Ok(id) => {
                        debug!(%kind, %id, "Saved");
                        self.status_message =
                            Some(format!("Saved \"{}\" to your {}", text, kind.collection_path()));
                        // Re-fetch so the list shows the server's copy exactly once
                        self.refresh_list(kind);
                    }
                    Err(message) => self.definition_error = Some(message),
                }
            }
            TaskResult::Deleted(kind, id, result) => {
                self.deleting = None;
                match result {
                    Ok(()) => {
                        if let Some(removed) = self.collection_mut(kind).remove(&id) {
                            self.selection.remove(&removed.text);
                            self.status_message = Some(format!("Deleted \"{}\"", removed.text));
                        }
                        self.save_list_cache(kind);
                        self.clamp_cursor();
                    }
                    Err(message) => self.status_message = Some(message),
                }
            }
            TaskResult::Sentences(ticket, result) => {
                if !self.generation.complete(ticket) {
                    debug!(?ticket, "Discarding stale sentences");
                    return;
                }
                match result {
                    Ok(sets) if sets.is_empty() => {
                        self.sentences_error = Some("No sentences were generated".to_string());
                    }
                    Ok(sets) => self.sentences = sets,
                    Err(message) => self.sentences_error = Some(message),
                }
            }
        }
    }

    fn apply_list(&mut self, kind: TermKind, entries: Vec<Entry>) {
        debug!(%kind, count = entries.len(), "List received");
        self.collection_mut(kind).replace(entries);
        if self.current_tab.kind() == Some(kind) {
            let entries = self.collection(kind).entries().to_vec();
            self.selection.retain_existing(&entries);
        }
        self.save_list_cache(kind);
        self.clamp_cursor();
    }

    fn save_list_cache(&mut self, kind: TermKind) {
        if let Err(e) = self.cache.save_entries(kind, self.collection(kind).entries()) {
            warn!(%kind, error = %e, "Failed to cache list");
        }
        self.cache_ages = self.cache.get_cache_ages();
    }

    // =========================================================================
    // Loading flags
    // =========================================================================

    pub fn is_looking_up(&self) -> bool {
        self.lookup.is_loading()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_deleting(&self, id: &str) -> bool {
        self.deleting.as_deref() == Some(id)
    }

    pub fn is_generating(&self) -> bool {
        self.generation.is_loading()
    }

    pub fn is_list_loading(&self, kind: TermKind) -> bool {
        match kind {
            TermKind::Word => self.word_list.is_loading(),
            TermKind::Phrase => self.phrase_list.is_loading(),
        }
    }

    // =========================================================================
    // Navigation and selection
    // =========================================================================

    pub fn collection(&self, kind: TermKind) -> &Collection {
        match kind {
            TermKind::Word => &self.words,
            TermKind::Phrase => &self.phrases,
        }
    }

    fn collection_mut(&mut self, kind: TermKind) -> &mut Collection {
        match kind {
            TermKind::Word => &mut self.words,
            TermKind::Phrase => &mut self.phrases,
        }
    }

    fn list_tracker_mut(&mut self, kind: TermKind) -> &mut RequestTracker {
        match kind {
            TermKind::Word => &mut self.word_list,
            TermKind::Phrase => &mut self.phrase_list,
        }
    }

    /// Switch tabs. The selection is page-local, so it does not survive.
    pub fn set_tab(&mut self, tab: Tab) {
        if tab != self.current_tab {
            self.selection.clear();
            self.search_query.clear();
            self.list_cursor = 0;
            self.meaning_index = 0;
        }
        self.current_tab = tab;
    }

    /// Entries on the current tab, filtered by the search query
    pub fn visible_entries(&self) -> Vec<&Entry> {
        match self.current_tab.kind() {
            Some(kind) => self.collection(kind).filtered(&self.search_query),
            None => Vec::new(),
        }
    }

    pub fn current_entry(&self) -> Option<&Entry> {
        self.visible_entries().get(self.list_cursor).copied()
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.visible_entries().len();
        if len == 0 {
            self.list_cursor = 0;
            return;
        }
        let max = len - 1;
        self.list_cursor = if delta < 0 {
            self.list_cursor.saturating_sub(delta.unsigned_abs())
        } else {
            (self.list_cursor + delta as usize).min(max)
        };
        self.meaning_index = 0;
    }

    pub fn cursor_to_start(&mut self) {
        self.list_cursor = 0;
        self.meaning_index = 0;
    }

    pub fn cursor_to_end(&mut self) {
        self.list_cursor = self.visible_entries().len().saturating_sub(1);
        self.meaning_index = 0;
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_entries().len();
        if self.list_cursor >= len {
            self.list_cursor = len.saturating_sub(1);
            self.meaning_index = 0;
        }
    }

    fn meaning_count(&self) -> usize {
        match self.current_tab {
            Tab::Define => self.definition.as_ref().map(|d| d.meanings.len()).unwrap_or(0),
            Tab::Words | Tab::Phrases => self.current_entry().map(|e| e.meanings.len()).unwrap_or(0),
        }
    }

    pub fn next_meaning(&mut self) {
        let count = self.meaning_count();
        if count > 0 {
            self.meaning_index = (self.meaning_index + 1) % count;
        }
    }

    pub fn prev_meaning(&mut self) {
        let count = self.meaning_count();
        if count > 0 {
            self.meaning_index = (self.meaning_index + count - 1) % count;
        }
    }

    /// Select or deselect the highlighted term with the meaning currently shown
    pub fn toggle_current_selection(&mut self) {
        let Some(entry) = self.current_entry() else {
            return;
        };
        let text = entry.text.clone();
        let meaning = entry
            .meanings
            .get(self.meaning_index)
            .or_else(|| entry.meanings.first())
            .cloned()
            .unwrap_or_else(Meaning::default);

        let selected = self.selection.toggle(&text, &meaning);
        debug!(term = %text, selected, "Selection toggled");
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn toggle_lookup_kind(&mut self) {
        self.lookup_kind = self.lookup_kind.toggle();
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

pub fn can_add_email_char(current: &str, c: char) -> bool {
    current.chars().count() < MAX_EMAIL_LENGTH && is_valid_input_char(c) && !c.is_whitespace()
}

pub fn can_add_password_char(current: &str, c: char) -> bool {
    current.chars().count() < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

pub fn can_add_name_char(current: &str, c: char) -> bool {
    current.chars().count() < MAX_NAME_LENGTH && is_valid_input_char(c)
}

pub fn can_add_term_char(current: &str, c: char) -> bool {
    current.chars().count() < MAX_TERM_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================
