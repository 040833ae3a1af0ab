//! Local view of the user's saved words or phrases.

use std::collections::HashSet;

use crate::models::{Entry, TermKind};

#[derive(Debug, Clone)]
pub struct Collection {
    kind: TermKind,
    entries: Vec<Entry>,
    loaded: bool,
}

impl Collection {
    pub fn new(kind: TermKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            loaded: false,
        }
    }

    pub fn kind(&self) -> TermKind {
        self.kind
    }

    /// True once a list has arrived from the server or the cache
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Replace the contents with a freshly fetched list.
    /// Repeated ids keep their first occurrence.
    pub fn replace(&mut self, entries: Vec<Entry>) {
        let mut seen = HashSet::new();
        self.entries = entries
            .into_iter()
            .filter(|e| seen.insert(e.id.clone()))
            .collect();
        self.loaded = true;
    }

    /// Remove the entry with `id`, leaving every other entry untouched
    pub fn remove(&mut self, id: &str) -> Option<Entry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains_text(&self, text: &str) -> bool {
        self.entries.iter().any(|e| e.text.eq_ignore_ascii_case(text.trim()))
    }

    /// Entries matching a search query, in server order
    pub fn filtered(&self, query: &str) -> Vec<&Entry> {
        self.entries.iter().filter(|e| e.matches(query)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.loaded = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, text: &str) -> Entry {
        Entry {
            id: id.to_string(),
            kind: TermKind::Word,
            text: text.to_string(),
            meanings: vec![],
            created_at: None,
        }
    }

    #[test]
    fn test_remove_only_touches_matching_id() {
        let mut collection = Collection::new(TermKind::Word);
        collection.replace(vec![entry("1", "alpha"), entry("2", "beta"), entry("3", "gamma")]);

        let removed = collection.remove("2").unwrap();
        assert_eq!(removed.text, "beta");
        let ids: Vec<&str> = collection.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        assert!(collection.remove("missing").is_none());
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_replace_drops_duplicate_ids() {
        let mut collection = Collection::new(TermKind::Word);
        collection.replace(vec![entry("1", "alpha"), entry("1", "alpha"), entry("2", "beta")]);
        assert_eq!(collection.len(), 2);
        assert!(collection.is_loaded());
    }

    #[test]
    fn test_filtered_and_contains_text() {
        let mut collection = Collection::new(TermKind::Phrase);
        collection.replace(vec![entry("1", "break the ice"), entry("2", "on the fence")]);
        assert_eq!(collection.filtered("ICE").len(), 1);
        assert_eq!(collection.filtered("").len(), 2);
        assert!(collection.contains_text(" On the Fence "));
        assert!(collection.get("2").is_some());
    }
}
