//! Data models for Wordify entities.
//!
//! - `TermKind`: word or phrase, selects endpoint family and field names
//! - `Meaning`, `Definition`: lookup results
//! - `Entry`: a saved word or phrase in the user's collection
//! - `SentenceSet`: generated practice sentences for one term
//! - `Health`: backend health report

pub mod health;
pub mod sentence;
pub mod term;

pub use health::Health;
pub use sentence::{SentenceRequestItem, SentenceSet};
pub use term::{Definition, Entry, Meaning, TermKind};
