//! Page-local selection of terms for sentence generation.

use crate::models::{Entry, Meaning, SentenceRequestItem};
use crate::validation::ValidationError;

/// Ordered set of chosen terms, keyed by term text.
/// Each term carries a snapshot of the one meaning it was selected with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    items: Vec<SentenceRequestItem>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the term if absent, remove it if present.
    /// Returns true if the term is selected afterwards.
    pub fn toggle(&mut self, term: &str, meaning: &Meaning) -> bool {
        if self.remove(term) {
            return false;
        }
        self.items.push(SentenceRequestItem {
            term: term.to_string(),
            meaning: meaning.definition.clone(),
            category: meaning.category.clone(),
        });
        true
    }

    /// Returns true if the term was selected
    pub fn remove(&mut self, term: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.term != term);
        self.items.len() != before
    }

    pub fn contains(&self, term: &str) -> bool {
        self.items.iter().any(|item| item.term == term)
    }

    pub fn items(&self) -> &[SentenceRequestItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Drop selected terms that are no longer in the collection
    pub fn retain_existing(&mut self, entries: &[Entry]) {
        self.items
            .retain(|item| entries.iter().any(|e| e.text == item.term));
    }

    /// Build a generation request. An empty selection is rejected here,
    /// before anything touches the network.
    pub fn to_request(&self) -> Result<Vec<SentenceRequestItem>, ValidationError> {
        if self.items.is_empty() {
            return Err(ValidationError::EmptySelection);
        }
        Ok(self.items.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TermKind;

    fn meaning(definition: &str, category: &str) -> Meaning {
        Meaning {
            definition: definition.to_string(),
            category: category.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut selection = Selection::new();
        assert!(selection.toggle("lucid", &meaning("clear", "adjective")));
        assert!(selection.contains("lucid"));
        assert_eq!(selection.items()[0].category, "adjective");

        assert!(!selection.toggle("lucid", &meaning("clear", "adjective")));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_keeps_order_of_others() {
        let mut selection = Selection::new();
        selection.toggle("a", &meaning("1", "n"));
        selection.toggle("b", &meaning("2", "n"));
        selection.toggle("c", &meaning("3", "n"));
        selection.toggle("b", &meaning("2", "n"));

        let terms: Vec<&str> = selection.items().iter().map(|i| i.term.as_str()).collect();
        assert_eq!(terms, vec!["a", "c"]);
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let selection = Selection::new();
        assert_eq!(selection.to_request(), Err(ValidationError::EmptySelection));
    }

    #[test]
    fn test_retain_existing_drops_deleted_terms() {
        let mut selection = Selection::new();
        selection.toggle("kept", &meaning("1", "n"));
        selection.toggle("gone", &meaning("2", "n"));

        let entries = vec![Entry {
            id: "1".into(),
            kind: TermKind::Word,
            text: "kept".into(),
            meanings: vec![],
            created_at: None,
        }];
        selection.retain_existing(&entries);
        assert!(selection.contains("kept"));
        assert!(!selection.contains("gone"));
    }
}
