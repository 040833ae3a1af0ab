use proptest::prelude::*;
use wordify_core::models::{Entry, Meaning, TermKind};
use wordify_core::{Collection, Selection};

fn meaning(definition: &str) -> Meaning {
    Meaning {
        definition: definition.to_string(),
        category: "noun".to_string(),
        ..Default::default()
    }
}

fn entry(id: &str, text: &str) -> Entry {
    Entry {
        id: id.to_string(),
        kind: TermKind::Word,
        text: text.to_string(),
        meanings: vec![meaning("m")],
        created_at: None,
    }
}

proptest! {
    #[test]
    fn toggling_twice_restores_selection(
        preselected in proptest::collection::vec("[a-z]{1,8}", 0..6),
        term in "[a-z]{1,8}",
    ) {
        let mut selection = Selection::new();
        for t in &preselected {
            if !selection.contains(t) {
                selection.toggle(t, &meaning(t));
            }
        }
        let before = selection.clone();

        selection.toggle(&term, &meaning("picked"));
        selection.toggle(&term, &meaning("picked"));

        // Toggling a preselected term off and on moves it to the end
        let mut expected: Vec<_> = before.items().iter().map(|i| i.term.clone()).collect();
        if let Some(pos) = expected.iter().position(|t| *t == term) {
            let t = expected.remove(pos);
            expected.push(t);
        }
        let actual: Vec<_> = selection.items().iter().map(|i| i.term.clone()).collect();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(selection.len(), before.len());
    }

    #[test]
    fn selection_never_holds_duplicates(terms in proptest::collection::vec("[a-c]{1,2}", 0..20)) {
        let mut selection = Selection::new();
        for t in &terms {
            selection.toggle(t, &meaning(t));
        }
        let mut seen = std::collections::HashSet::new();
        for item in selection.items() {
            prop_assert!(seen.insert(item.term.clone()));
        }
    }

    #[test]
    fn removing_an_id_keeps_the_rest(count in 1usize..12, pick in 0usize..12) {
        let pick = pick % count;
        let entries: Vec<Entry> = (0..count)
            .map(|i| entry(&format!("id{}", i), &format!("term{}", i)))
            .collect();
        let mut collection = Collection::new(TermKind::Word);
        collection.replace(entries.clone());

        let target = format!("id{}", pick);
        let removed = collection.remove(&target);
        prop_assert_eq!(removed.map(|e| e.id), Some(target.clone()));

        let expected: Vec<Entry> = entries.into_iter().filter(|e| e.id != target).collect();
        prop_assert_eq!(collection.entries(), expected.as_slice());
    }
}
