//! Local caching of the saved collection.
//!
//! `CacheManager` keeps each user's last fetched word and phrase lists as JSON
//! so the collection can be shown immediately on start.

pub mod manager;

pub use manager::{CacheAges, CacheManager, CachedData};
