use serde::{Deserialize, Serialize};

/// Response of `GET /health`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub gemini_api_configured: Option<bool>,
    #[serde(default)]
    pub mongo_uri_configured: Option<bool>,
}

impl Health {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }

    /// One-line summary for the status bar
    pub fn summary(&self) -> String {
        let service = self.service.as_deref().unwrap_or("API");
        if !self.is_healthy() {
            return format!("{} {}", service, self.status);
        }
        match self.gemini_api_configured {
            Some(false) => format!("{} online (definitions unavailable)", service),
            _ => format!("{} online", service),
        }
    }
}
