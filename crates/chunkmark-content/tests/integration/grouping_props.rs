//! Property tests for section grouping over generated documents.

use proptest::prelude::*;

use crate::common::{document, process};

fn paragraph() -> impl Strategy<Value = String> {
    "[a-z]{1,8}( [a-z]{1,8}){0,3}"
}

fn sections() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
    prop::collection::vec(
        ("[a-z]{1,8}", prop::collection::vec(paragraph(), 0..4)),
        0..6,
    )
    .prop_map(|sections| {
        sections
            .into_iter()
            .enumerate()
            .map(|(index, (word, paragraphs))| (format!("{word} {index} {{#s{index}}}"), paragraphs))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_one_section_per_heading_in_order(sections in sections()) {
        let doc = process(&document(None, &sections));

        prop_assert_eq!(doc.chunks.len(), sections.len());
        for (index, chunk) in doc.chunks.iter().enumerate() {
            let expected = format!("s{index}");
            prop_assert_eq!(chunk.slug.as_deref(), Some(expected.as_str()));
        }
    }

    #[test]
    fn prop_paragraphs_stay_in_their_section(sections in sections()) {
        let doc = process(&document(None, &sections));
        let rendered: Vec<&str> = doc.html.split("</section>").collect();

        for (index, (_, paragraphs)) in sections.iter().enumerate() {
            let section = rendered[index];
            let mut cursor = 0;
            for paragraph in paragraphs {
                let needle = format!("<p>{paragraph}</p>");
                let found = section[cursor..].find(&needle);
                prop_assert!(found.is_some(), "missing {} in section {}", needle, index);
                cursor += found.unwrap_or(0) + needle.len();
            }
        }
    }

    #[test]
    fn prop_preamble_is_dropped(sections in sections()) {
        let doc = process(&document(Some("PREAMBLE TEXT"), &sections));
        prop_assert!(!doc.html.contains("PREAMBLE"));
        prop_assert_eq!(doc.chunks.len(), sections.len());
    }
}
