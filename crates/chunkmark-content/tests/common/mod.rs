//! Common helpers for content integration tests.

use chunkmark_content::{Document, Processor, RenderOptions};

/// The two-section document with one CRI entry.
pub const EXAMPLE: &str = r#"---
cri:
  - slug: intro
    question: "What is X?"
    answer: "X is Y."
---
## Intro {#intro .big}
Some text.
## Next
More text.
"#;

/// Render with default options, failing the test on error.
pub fn process(source: &str) -> Document {
    Processor::new(RenderOptions::default())
        .process(source, None)
        .expect("document should render")
}

/// Build a document from `(heading, paragraphs)` pairs, with an optional
/// preamble paragraph before the first heading.
pub fn document(preamble: Option<&str>, sections: &[(String, Vec<String>)]) -> String {
    let mut out = String::new();
    if let Some(text) = preamble {
        out.push_str(text);
        out.push_str("\n\n");
    }
    for (heading, paragraphs) in sections {
        out.push_str("## ");
        out.push_str(heading);
        out.push_str("\n\n");
        for paragraph in paragraphs {
            out.push_str(paragraph);
            out.push_str("\n\n");
        }
    }
    out
}
