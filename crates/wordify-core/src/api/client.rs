//! API client for communicating with the Wordify REST backend.
//!
//! Every request goes through `ApiClient::send`, which attaches the bearer
//! token from the session gate and signs that session out when the server
//! answers 401. A rejection of a token that has since been replaced is
//! ignored.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::{header, Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::auth::{SessionData, SessionGate};
use crate::config::{normalize_base_url, Config};
use crate::models::{Definition, Entry, Health, Meaning, SentenceRequestItem, SentenceSet, TermKind};
use crate::validation::{self, ValidationError};

use super::ApiError;

/// How a 401 answer should be treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthPolicy {
    /// 401 means the session token is no longer accepted
    Session,
    /// 401 means the submitted credentials were wrong
    Credentials,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    user_id: String,
    email: String,
    #[serde(default)]
    name: String,
    token: String,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignupRequest<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct DefineResponse {
    #[serde(alias = "word", alias = "phrase")]
    text: String,
    #[serde(default)]
    meanings: Vec<Meaning>,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default, alias = "words", alias = "phrases")]
    items: Vec<EntryApiItem>,
}

#[derive(Debug, Deserialize)]
struct EntryApiItem {
    #[serde(alias = "word_id", alias = "phrase_id")]
    id: String,
    #[serde(alias = "word", alias = "phrase")]
    text: String,
    #[serde(default)]
    meanings: Vec<Meaning>,
    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AddResponse {
    #[serde(alias = "word_id", alias = "phrase_id")]
    id: String,
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    #[serde(default)]
    deleted_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct FrameResponse {
    #[serde(default)]
    sentences: Vec<SentenceSet>,
}

/// API client for the Wordify backend.
/// Clone is cheap - reqwest::Client and the session gate are both shared.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    gate: SessionGate,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration, gate: SessionGate) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
            gate,
        })
    }

    pub fn from_config(config: &Config, gate: SessionGate) -> Result<Self> {
        Self::new(
            &config.api_base_url(),
            Duration::from_secs(config.request_timeout_secs()),
            gate,
        )
    }

    pub fn gate(&self) -> &SessionGate {
        &self.gate
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Headers for the current session, plus the token they carry so a
    /// later 401 can be matched to the session it rejected.
    fn auth_headers(&self) -> Result<(header::HeaderMap, Option<String>)> {
        let mut headers = header::HeaderMap::new();
        let token = self.gate.token();
        if let Some(ref token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok((headers, token))
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Send a request with the current token attached and decode the JSON body.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        method: &Method,
        path: &str,
        policy: AuthPolicy,
    ) -> Result<T> {
        debug!(%method, path, "Sending request");

        let (headers, sent_token) = self.auth_headers()?;
        let response = request
            .headers(headers)
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send {} request to {}", method, path))?;

        let response = match Self::check_response(response).await {
            Ok(response) => response,
            Err(err) => {
                if err.is_unauthorized() && policy == AuthPolicy::Session {
                    if let Some(ref token) = sent_token {
                        self.gate.invalidate_if(token);
                    }
                }
                warn!(%method, path, error = %err, "Request failed");
                return Err(err.into());
            }
        };

        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
            .with_context(|| format!("Failed to parse JSON response from {}", path))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.client.get(self.url(path));
        self.send(request, &Method::GET, path, AuthPolicy::Session).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<T> {
        let request = self.client.post(self.url(path)).json(body);
        self.send(request, &Method::POST, path, AuthPolicy::Session).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.client.delete(self.url(path));
        self.send(request, &Method::DELETE, path, AuthPolicy::Session).await
    }

    // ===== Authentication =====

    /// Log in and start a session on the gate
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionData> {
        validation::check_login(email, password)?;

        let path = "/auth/login";
        let body = LoginRequest {
            email: email.trim(),
            password,
        };
        let request = self.client.post(self.url(path)).json(&body);
        let auth: AuthResponse = self
            .send(request, &Method::POST, path, AuthPolicy::Credentials)
            .await?;

        Ok(self.start_session(auth))
    }

    /// Register a new account and start a session on the gate
    pub async fn signup(&self, email: &str, password: &str, name: &str) -> Result<SessionData> {
        validation::check_signup(email, password)?;

        let path = "/auth/signup";
        let body = SignupRequest {
            email: email.trim(),
            password,
            name: name.trim(),
        };
        let request = self.client.post(self.url(path)).json(&body);
        let auth: AuthResponse = self
            .send(request, &Method::POST, path, AuthPolicy::Credentials)
            .await?;

        Ok(self.start_session(auth))
    }

    fn start_session(&self, auth: AuthResponse) -> SessionData {
        let data = SessionData {
            token: auth.token,
            user_id: auth.user_id,
            email: auth.email,
            display_name: auth.name,
            created_at: Utc::now(),
        };
        self.gate.login(data.clone());
        data
    }

    pub fn logout(&self) {
        self.gate.logout();
    }

    pub async fn health(&self) -> Result<Health> {
        self.get("/health").await
    }

    // ===== Definitions =====

    /// Look up the meanings of a word or phrase without saving it
    pub async fn define(&self, kind: TermKind, text: &str) -> Result<Definition> {
        let text = validation::normalize_term(text, kind)?;
        let path = format!("/{}/define", kind.collection_path());
        let body = serde_json::json!({ kind.text_key(): text });

        let response: DefineResponse = self.post(&path, &body).await?;
        debug!(%kind, meanings = response.meanings.len(), "Definition received");

        Ok(Definition {
            kind,
            text: response.text,
            meanings: response.meanings,
        })
    }

    // ===== Collection =====

    pub async fn list(&self, kind: TermKind) -> Result<Vec<Entry>> {
        let path = match kind {
            TermKind::Word => "/words/my_words",
            TermKind::Phrase => "/phrases/my_phrases",
        };
        let response: ListResponse = self.get(path).await?;

        Ok(response
            .items
            .into_iter()
            .map(|item| Entry {
                id: item.id,
                kind,
                text: item.text,
                meanings: item.meanings,
                created_at: item.created_at,
            })
            .collect())
    }

    /// Save a looked-up definition. Returns the id of the new entry.
    pub async fn add(&self, definition: &Definition) -> Result<String> {
        let kind = definition.kind;
        let text = validation::normalize_term(&definition.text, kind)?;
        let path = format!("/{}/add", kind.collection_path());
        let meanings: Vec<serde_json::Value> =
            definition.meanings.iter().map(|m| m.to_wire(kind)).collect();
        let body = serde_json::json!({
            kind.text_key(): text,
            "meanings": meanings,
        });

        let response: AddResponse = self.post(&path, &body).await?;
        info!(%kind, id = %response.id, "Entry saved");
        Ok(response.id)
    }

    pub async fn delete_entry(&self, kind: TermKind, id: &str) -> Result<()> {
        let path = format!("/{}/delete_by_id/{}", kind.collection_path(), id);
        let response: DeleteResponse = self.delete(&path).await?;
        if response.deleted_count == Some(0) {
            return Err(ApiError::NotFound(format!("{} {} was already gone", kind, id)).into());
        }
        info!(%kind, id, "Entry deleted");
        Ok(())
    }

    // ===== Sentence generation =====

    /// Generate practice sentences. An empty selection fails locally.
    pub async fn frame_sentences(
        &self,
        kind: TermKind,
        items: &[SentenceRequestItem],
    ) -> Result<Vec<SentenceSet>> {
        if items.is_empty() {
            return Err(ValidationError::EmptySelection.into());
        }

        let (path, list_key) = match kind {
            TermKind::Word => ("/sentences/frame_sentences", "words"),
            TermKind::Phrase => ("/phrases/frame_sentences", "phrases"),
        };
        let wire: Vec<serde_json::Value> = items.iter().map(|i| i.to_wire(kind)).collect();
        let body = serde_json::json!({ list_key: wire });

        let response: FrameResponse = self.post(path, &body).await?;
        debug!(%kind, sets = response.sentences.len(), "Sentences received");
        Ok(response.sentences)
    }
}
