use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::models::{Entry, TermKind};

/// Per-user subdirectory of the cache directory
const USERS_DIR: &str = "users";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            if minutes % 60 >= 30 {
                format!("{}h ago", hours + 1)
            } else {
                format!("{}h ago", hours)
            }
        } else {
            let days = minutes / 1440;
            if (minutes % 1440) / 60 >= 12 {
                format!("{}d ago", days + 1)
            } else {
                format!("{}d ago", days)
            }
        }
    }
}

/// Lists are stored per user under `<cache_dir>/users/<user_id>/`, so one
/// account never sees another's collection. With no user set, loads find
/// nothing and saves are skipped.
pub struct CacheManager {
    cache_dir: PathBuf,
    user_dir: Option<PathBuf>,
}

impl CacheManager {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)?;
        Ok(Self {
            cache_dir,
            user_dir: None,
        })
    }

    /// Switch to the cache of `user_id`, or to none when signed out
    pub fn set_user(&mut self, user_id: Option<&str>) -> Result<()> {
        self.user_dir = match user_id.map(sanitize_user_id) {
            Some(id) if !id.is_empty() => {
                let dir = self.cache_dir.join(USERS_DIR).join(id);
                std::fs::create_dir_all(&dir)
                    .with_context(|| format!("Failed to create cache directory {}", dir.display()))?;
                Some(dir)
            }
            _ => None,
        };
        Ok(())
    }

    pub fn has_user(&self) -> bool {
        self.user_dir.is_some()
    }

    fn cache_path(&self, name: &str) -> Option<PathBuf> {
        self.user_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.json", name)))
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<CachedData<T>>> {
        let Some(path) = self.cache_path(name) else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file: {}", name))?;

        let cached: CachedData<T> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", name))?;

        Ok(Some(cached))
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let Some(path) = self.cache_path(name) else {
            debug!(name, "No signed-in user, skipping cache write");
            return Ok(());
        };
        let cached = CachedData::new(data);
        let contents = serde_json::to_string_pretty(&cached)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn entries_name(kind: TermKind) -> &'static str {
        kind.collection_path()
    }

    // ===== Collection =====

    pub fn load_entries(&self, kind: TermKind) -> Result<Option<CachedData<Vec<Entry>>>> {
        self.load(Self::entries_name(kind))
    }

    pub fn save_entries(&self, kind: TermKind, entries: &[Entry]) -> Result<()> {
        self.save(Self::entries_name(kind), &entries)
    }

    /// Remove the current user's cached lists
    pub fn clear(&self) -> Result<()> {
        for kind in [TermKind::Word, TermKind::Phrase] {
            if let Some(path) = self.cache_path(Self::entries_name(kind)) {
                if path.exists() {
                    std::fs::remove_file(path)?;
                }
            }
        }
        Ok(())
    }

    // ===== Cache Age Information =====

    fn load_age(&self, kind: TermKind) -> Option<String> {
        match self.load_entries(kind) {
            Ok(Some(cached)) => Some(cached.age_display()),
            Ok(None) => None,
            Err(e) => {
                debug!(%kind, error = %e, "Failed to load cache for age display");
                None
            }
        }
    }

    pub fn get_cache_ages(&self) -> CacheAges {
        CacheAges {
            words: self.load_age(TermKind::Word),
            phrases: self.load_age(TermKind::Phrase),
        }
    }
}

/// Keep user ids usable as a single path component
fn sanitize_user_id(user_id: &str) -> String {
    user_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

#[derive(Debug, Default, Clone)]
pub struct CacheAges {
    pub words: Option<String>,
    pub phrases: Option<String>,
}

impl CacheAges {
    pub fn age_for(&self, kind: TermKind) -> String {
        let age = match kind {
            TermKind::Word => &self.words,
            TermKind::Phrase => &self.phrases,
        };
        age.clone().unwrap_or_else(|| "never".to_string())
    }

    pub fn last_updated(&self) -> String {
        self.words
            .clone()
            .or_else(|| self.phrases.clone())
            .unwrap_or_else(|| "never".to_string())
    }
}
