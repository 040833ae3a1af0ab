//! In-process fake of the Wordify backend for client tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tempfile::TempDir;

use wordify_core::{ApiClient, SessionGate};

pub const EMAIL: &str = "ada@example.com";
pub const PASSWORD: &str = "secret1";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Default)]
pub struct FakeState {
    pub requests: Vec<RecordedRequest>,
    pub valid_tokens: HashSet<String>,
    pub users: Vec<(String, String, String)>,
    pub words: Vec<Value>,
    pub phrases: Vec<Value>,
    /// Held before a word list request checks its token
    pub list_delay: Option<Duration>,
    next_id: u64,
}

impl FakeState {
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        format!("id{:04}", self.next_id)
    }

    fn issue_token(&mut self) -> String {
        let token = format!("token-{}", self.next_id());
        self.valid_tokens.insert(token.clone());
        token
    }
}

pub type Shared = Arc<Mutex<FakeState>>;

pub struct FakeBackend {
    pub base_url: String,
    pub state: Shared,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(FakeState {
            users: vec![(EMAIL.to_string(), PASSWORD.to_string(), "Ada".to_string())],
            ..Default::default()
        }));

        let app = Router::new()
            .route("/health", get(health))
            .route("/auth/login", post(login))
            .route("/auth/signup", post(signup))
            .route("/words/define", post(define_word))
            .route("/phrases/define", post(define_phrase))
            .route("/words/my_words", get(my_words))
            .route("/phrases/my_phrases", get(my_phrases))
            .route("/words/add", post(add_word))
            .route("/phrases/add", post(add_phrase))
            .route("/words/delete_by_id/:id", delete(delete_word))
            .route("/phrases/delete_by_id/:id", delete(delete_phrase))
            .route("/sentences/frame_sentences", post(frame_word_sentences))
            .route("/phrases/frame_sentences", post(frame_phrase_sentences))
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    /// A client pointed at this backend with a fresh, empty session
    pub fn client(&self) -> (ApiClient, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let gate = SessionGate::new(dir.path().to_path_buf());
        let client = ApiClient::new(&self.base_url, Duration::from_secs(5), gate).unwrap();
        (client, dir)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(|r| r.path == path).collect()
    }

    pub fn revoke_all_tokens(&self) {
        self.state.lock().unwrap().valid_tokens.clear();
    }

    pub fn delay_word_lists(&self, delay: Duration) {
        self.state.lock().unwrap().list_delay = Some(delay);
    }

    pub fn seed_word(&self, text: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.words.push(json!({
            "word_id": id,
            "word": text,
            "meanings": [{"definition": format!("meaning of {}", text), "part_of_speech": "noun", "examples": [], "synonyms": []}],
            "created_at": "2025-01-02T03:04:05.678000",
        }));
        id
    }
}

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn fail(status: StatusCode, detail: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": detail })))
}

async fn record(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let authorization = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.lock().unwrap().requests.push(RecordedRequest {
        method: request.method().clone(),
        path: request.uri().path().to_string(),
        authorization,
    });
    next.run(request).await
}

fn authorize(state: &Shared, headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| fail(StatusCode::UNAUTHORIZED, "Not authenticated"))?;
    if state.lock().unwrap().valid_tokens.contains(token) {
        Ok(())
    } else {
        Err(fail(StatusCode::UNAUTHORIZED, "Invalid token"))
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "Wordify API",
        "gemini_api_configured": true,
        "mongo_uri_configured": true,
    }))
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> ApiResult {
    let email = body["email"].as_str().unwrap_or_default().to_lowercase();
    let password = body["password"].as_str().unwrap_or_default();
    let mut state = state.lock().unwrap();
    let user = state
        .users
        .iter()
        .position(|(e, p, _)| *e == email && p == password)
        .ok_or_else(|| fail(StatusCode::UNAUTHORIZED, "Invalid email or password"))?;
    let name = state.users[user].2.clone();
    let token = state.issue_token();
    Ok(Json(json!({
        "message": "Login successful",
        "user_id": format!("user{}", user),
        "email": email,
        "name": name,
        "token": token,
    })))
}

async fn signup(State(state): State<Shared>, Json(body): Json<Value>) -> ApiResult {
    let email = body["email"].as_str().unwrap_or_default().to_lowercase();
    let password = body["password"].as_str().unwrap_or_default().to_string();
    let name = body["name"].as_str().unwrap_or_default().to_string();
    let mut state = state.lock().unwrap();
    if password.len() < 6 {
        return Err(fail(StatusCode::BAD_REQUEST, "Password must be at least 6 characters long"));
    }
    if state.users.iter().any(|(e, _, _)| *e == email) {
        return Err(fail(StatusCode::CONFLICT, "User with this email already exists"));
    }
    state.users.push((email.clone(), password, name.clone()));
    let user_id = format!("user{}", state.users.len() - 1);
    let token = state.issue_token();
    Ok(Json(json!({
        "message": "User created successfully",
        "user_id": user_id,
        "email": email,
        "name": name,
        "token": token,
    })))
}

fn define(state: &Shared, headers: &HeaderMap, body: &Value, key: &str, category: &str, related: &str) -> ApiResult {
    authorize(state, headers)?;
    let term = body[key].as_str().unwrap_or_default().trim().to_lowercase();
    if term.is_empty() {
        return Err(fail(StatusCode::BAD_REQUEST, "Word cannot be empty"));
    }
    if term == "explode" {
        return Err(fail(StatusCode::INTERNAL_SERVER_ERROR, "Server error: upstream failed"));
    }
    Ok(Json(json!({
        key: term,
        "meanings": [
            {"definition": format!("first sense of {}", term), category: "general", "examples": ["example one"], related: ["alike"]},
            {"definition": format!("second sense of {}", term), category: "other", "examples": [], related: []},
        ],
        "total_meanings": 2,
        "source": "gemini_api",
    })))
}

async fn define_word(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> ApiResult {
    if body["word"] == "slowpoke" {
        tokio::time::sleep(Duration::from_secs(2)).await;
    }
    define(&state, &headers, &body, "word", "part_of_speech", "synonyms")
}

async fn define_phrase(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> ApiResult {
    define(&state, &headers, &body, "phrase", "context", "similar_phrases")
}

async fn my_words(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    let delay = state.lock().unwrap().list_delay;
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    authorize(&state, &headers)?;
    let words = state.lock().unwrap().words.clone();
    Ok(Json(json!({ "total_words": words.len(), "words": words })))
}

async fn my_phrases(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    authorize(&state, &headers)?;
    let phrases = state.lock().unwrap().phrases.clone();
    Ok(Json(json!({ "total_phrases": phrases.len(), "phrases": phrases })))
}

async fn add_word(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> ApiResult {
    authorize(&state, &headers)?;
    let word = body["word"].as_str().unwrap_or_default().trim().to_lowercase();
    let mut state = state.lock().unwrap();
    if state.words.iter().any(|w| w["word"] == word.as_str()) {
        return Err(fail(StatusCode::CONFLICT, "Word already exists in your collection"));
    }
    let id = state.next_id();
    state.words.insert(0, json!({
        "word_id": id,
        "word": word,
        "meanings": body["meanings"].clone(),
        "created_at": "2025-02-03T04:05:06.000000",
    }));
    Ok(Json(json!({ "message": "Word added successfully", "word_id": id, "word": word })))
}

async fn add_phrase(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> ApiResult {
    authorize(&state, &headers)?;
    let phrase = body["phrase"].as_str().unwrap_or_default().trim().to_lowercase();
    let mut state = state.lock().unwrap();
    if state.phrases.iter().any(|p| p["phrase"] == phrase.as_str()) {
        return Err(fail(StatusCode::CONFLICT, "Phrase already exists in your collection"));
    }
    let id = state.next_id();
    state.phrases.insert(0, json!({
        "phrase_id": id,
        "phrase": phrase,
        "meanings": body["meanings"].clone(),
        "created_at": null,
    }));
    Ok(Json(json!({ "message": "Phrase added successfully", "phrase_id": id, "phrase": phrase })))
}

async fn delete_word(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<String>) -> ApiResult {
    authorize(&state, &headers)?;
    let mut state = state.lock().unwrap();
    let index = state
        .words
        .iter()
        .position(|w| w["word_id"] == id.as_str())
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Word not found in your collection"))?;
    let removed = state.words.remove(index);
    Ok(Json(json!({
        "message": "Word deleted successfully",
        "deleted_word": removed["word"],
        "deleted_word_id": id,
        "deleted_count": 1,
    })))
}

async fn delete_phrase(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<String>) -> ApiResult {
    authorize(&state, &headers)?;
    let mut state = state.lock().unwrap();
    let index = state
        .phrases
        .iter()
        .position(|p| p["phrase_id"] == id.as_str())
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Phrase not found in your collection"))?;
    let removed = state.phrases.remove(index);
    Ok(Json(json!({
        "message": "Phrase deleted successfully",
        "deleted_phrase": removed["phrase"],
        "deleted_phrase_id": id,
        "deleted_count": 1,
    })))
}

fn frame(body: &Value, list_key: &str, key: &str, category: &str) -> ApiResult {
    let items = body[list_key].as_array().cloned().unwrap_or_default();
    if items.is_empty() {
        return Err(fail(StatusCode::BAD_REQUEST, "Must be a non-empty array"));
    }
    let sentences: Vec<Value> = items
        .iter()
        .map(|item| {
            let term = item[key].as_str().unwrap_or_default();
            json!({
                key: term,
                "meaning": item["meaning"],
                category: item[category],
                "sentences": [format!("I used {} today.", term), format!("{} again.", term)],
            })
        })
        .collect();
    Ok(Json(json!({
        "processed": items.len(),
        "sentences": sentences,
        "source": "gemini_api",
    })))
}

async fn frame_word_sentences(Json(body): Json<Value>) -> ApiResult {
    frame(&body, "words", "word", "part_of_speech")
}

async fn frame_phrase_sentences(Json(body): Json<Value>) -> ApiResult {
    frame(&body, "phrases", "phrase", "context")
}
