use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::format_date;

/// Which family of endpoints a term belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
    Word,
    Phrase,
}

impl TermKind {
    /// Path prefix on the backend (`/words/...`, `/phrases/...`)
    pub fn collection_path(&self) -> &'static str {
        match self {
            TermKind::Word => "words",
            TermKind::Phrase => "phrases",
        }
    }

    /// JSON key carrying the term text
    pub fn text_key(&self) -> &'static str {
        match self {
            TermKind::Word => "word",
            TermKind::Phrase => "phrase",
        }
    }

    /// JSON key carrying the meaning's category
    pub fn category_key(&self) -> &'static str {
        match self {
            TermKind::Word => "part_of_speech",
            TermKind::Phrase => "context",
        }
    }

    /// JSON key carrying related terms
    pub fn related_key(&self) -> &'static str {
        match self {
            TermKind::Word => "synonyms",
            TermKind::Phrase => "similar_phrases",
        }
    }

    /// Label for the category field in the UI
    pub fn category_label(&self) -> &'static str {
        match self {
            TermKind::Word => "Part of speech",
            TermKind::Phrase => "Context",
        }
    }

    /// Label for the related-terms field in the UI
    pub fn related_label(&self) -> &'static str {
        match self {
            TermKind::Word => "Synonyms",
            TermKind::Phrase => "Similar phrases",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            TermKind::Word => TermKind::Phrase,
            TermKind::Phrase => TermKind::Word,
        }
    }
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text_key())
    }
}

/// One sense of a term.
///
/// Words and phrases name their fields differently on the wire; the aliases
/// accept both so a single type serves lookups, saved entries and the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meaning {
    #[serde(default)]
    pub definition: String,
    #[serde(default, alias = "part_of_speech", alias = "context")]
    pub category: String,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default, alias = "synonyms", alias = "similar_phrases")]
    pub related: Vec<String>,
}

impl Meaning {
    /// Serialize with the field names the backend expects for `kind`
    pub fn to_wire(&self, kind: TermKind) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert("definition".into(), self.definition.clone().into());
        map.insert(kind.category_key().into(), self.category.clone().into());
        map.insert("examples".into(), self.examples.clone().into());
        map.insert(kind.related_key().into(), self.related.clone().into());
        serde_json::Value::Object(map)
    }

    pub fn category_display(&self) -> &str {
        if self.category.trim().is_empty() {
            "general"
        } else {
            self.category.as_str()
        }
    }
}

/// Result of a definition lookup. Not yet saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub kind: TermKind,
    pub text: String,
    pub meanings: Vec<Meaning>,
}

/// A saved word or phrase in the user's collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub kind: TermKind,
    pub text: String,
    pub meanings: Vec<Meaning>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Entry {
    /// First meaning's definition, for list rows
    pub fn summary(&self) -> &str {
        self.meanings
            .first()
            .map(|m| m.definition.as_str())
            .unwrap_or("")
    }

    pub fn saved_display(&self) -> String {
        match self.created_at {
            Some(ref ts) => format_date(ts),
            None => "-".to_string(),
        }
    }

    pub fn matches(&self, query: &str) -> bool {
        crate::utils::contains_ignore_case(&self.text, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meaning_accepts_both_wire_formats() {
        let word = r#"{"definition":"happy chance","part_of_speech":"noun","examples":["a"],"synonyms":["luck"]}"#;
        let phrase = r#"{"definition":"relax","context":"informal","examples":[],"similar_phrases":["take it easy"]}"#;

        let w: Meaning = serde_json::from_str(word).unwrap();
        assert_eq!(w.category, "noun");
        assert_eq!(w.related, vec!["luck"]);

        let p: Meaning = serde_json::from_str(phrase).unwrap();
        assert_eq!(p.category, "informal");
        assert_eq!(p.related, vec!["take it easy"]);

        // Missing fields fall back to defaults
        let sparse: Meaning = serde_json::from_str(r#"{"definition":"x"}"#).unwrap();
        assert!(sparse.examples.is_empty());
        assert_eq!(sparse.category_display(), "general");
    }

    #[test]
    fn test_meaning_to_wire_uses_kind_keys() {
        let m = Meaning {
            definition: "to relax".into(),
            category: "informal".into(),
            examples: vec!["Chill out!".into()],
            related: vec!["calm down".into()],
        };
        let wire = m.to_wire(TermKind::Phrase);
        assert_eq!(wire["context"], "informal");
        assert_eq!(wire["similar_phrases"][0], "calm down");
        assert!(wire.get("part_of_speech").is_none());

        let wire = m.to_wire(TermKind::Word);
        assert_eq!(wire["part_of_speech"], "informal");
        assert_eq!(wire["synonyms"][0], "calm down");
    }

    #[test]
    fn test_term_kind_keys() {
        assert_eq!(TermKind::Word.collection_path(), "words");
        assert_eq!(TermKind::Phrase.text_key(), "phrase");
        assert_eq!(TermKind::Word.toggle(), TermKind::Phrase);
        assert_eq!(TermKind::Phrase.to_string(), "phrase");
    }
}
