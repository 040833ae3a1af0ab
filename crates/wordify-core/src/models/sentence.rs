use serde::{Deserialize, Serialize};

use super::TermKind;

/// One term submitted for sentence generation, with the meaning to illustrate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceRequestItem {
    pub term: String,
    pub meaning: String,
    pub category: String,
}

impl SentenceRequestItem {
    pub fn to_wire(&self, kind: TermKind) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert(kind.text_key().into(), self.term.clone().into());
        map.insert("meaning".into(), self.meaning.clone().into());
        map.insert(kind.category_key().into(), self.category.clone().into());
        serde_json::Value::Object(map)
    }
}

/// Generated sentences for one term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceSet {
    #[serde(default, alias = "word", alias = "phrase")]
    pub term: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default, alias = "part_of_speech", alias = "context")]
    pub category: String,
    // The backend's parse fallback names this list `example_sentences`
    #[serde(default, alias = "example_sentences")]
    pub sentences: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_item_wire_keys() {
        let item = SentenceRequestItem {
            term: "break the ice".into(),
            meaning: "start a conversation".into(),
            category: "social".into(),
        };
        let wire = item.to_wire(TermKind::Phrase);
        assert_eq!(wire["phrase"], "break the ice");
        assert_eq!(wire["context"], "social");

        let wire = item.to_wire(TermKind::Word);
        assert_eq!(wire["word"], "break the ice");
        assert_eq!(wire["part_of_speech"], "social");
    }

    #[test]
    fn test_sentence_set_parses_both_kinds() {
        let word = r#"{"word":"lucid","meaning":"clear","part_of_speech":"adjective","sentences":["a","b"]}"#;
        let set: SentenceSet = serde_json::from_str(word).unwrap();
        assert_eq!(set.term, "lucid");
        assert_eq!(set.category, "adjective");
        assert_eq!(set.sentences.len(), 2);

        let fallback = r#"{"word":"unknown","meaning":"unknown","part_of_speech":"unknown","example_sentences":["raw text"]}"#;
        let set: SentenceSet = serde_json::from_str(fallback).unwrap();
        assert_eq!(set.sentences, vec!["raw text"]);
    }
}
