use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    NetworkError(#[source] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// FastAPI wraps every HTTPException as `{"detail": "..."}`.
/// Validation failures (422) carry a list instead of a string.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::NetworkError(err)
        }
    }
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    /// Pull the `detail` field out of an error body, if there is one
    pub fn extract_detail(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        match parsed.detail {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .next()
                .map(str::to_string),
            _ => None,
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let detail = Self::extract_detail(body).unwrap_or_else(|| Self::truncate_body(body));
        match status.as_u16() {
            400 | 422 => ApiError::BadRequest(detail),
            401 => ApiError::Unauthorized(detail),
            404 => ApiError::NotFound(detail),
            409 => ApiError::Conflict(detail),
            500..=599 => ApiError::ServerError(detail),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, detail)),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// The server-provided detail message, for client errors that carry one
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized(d)
            | ApiError::BadRequest(d)
            | ApiError::NotFound(d)
            | ApiError::Conflict(d)
                if !d.is_empty() =>
            {
                Some(d.as_str())
            }
            _ => None,
        }
    }

    /// Message suitable for showing to the user.
    ///
    /// Precedence: transport timeout, then server error, then the server's
    /// own detail message, then a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Timeout => "Request timed out. Please try again.".to_string(),
            ApiError::ServerError(_) => "Server error. Please try again later.".to_string(),
            _ => match self.detail() {
                Some(detail) => detail.to_string(),
                None => match self {
                    ApiError::NetworkError(_) => {
                        "Unable to connect to server. Check your connection.".to_string()
                    }
                    ApiError::Unauthorized(_) => "Session expired. Please log in again.".to_string(),
                    other => format!("Request failed: {}", other),
                },
            },
        }
    }
}

/// Build a user-facing message from any error in an `anyhow` chain.
pub fn user_message(err: &anyhow::Error) -> String {
    if let Some(api) = err.downcast_ref::<ApiError>() {
        return api.user_message();
    }
    if let Some(validation) = err.downcast_ref::<crate::validation::ValidationError>() {
        return validation.to_string();
    }
    format!("Error: {}", err)
}
