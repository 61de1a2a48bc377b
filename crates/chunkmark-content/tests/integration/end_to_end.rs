//! Whole-document rendering tests.

use chunkmark_content::convert::to_html_tree;
use chunkmark_content::html::to_html;
use chunkmark_content::markdown::{ParseOptions, apply_heading_attributes, parse};
use chunkmark_content::transform::wrap_sections;
use chunkmark_content::{ChunkSummary, FrontmatterPolicy, Processor, RenderOptions};
use chunkmark_core::Error;

use crate::common::{EXAMPLE, process};

#[test]
fn test_example_renders_two_sections_in_order() {
    let doc = process(EXAMPLE);
    let slugs: Vec<_> = doc.chunks.iter().map(|c| c.slug.as_deref()).collect();
    assert_eq!(slugs, vec![Some("intro"), None]);
    assert_eq!(doc.html.matches("<section ").count(), 2);
}

#[test]
fn test_example_first_section_ends_with_question() {
    let doc = process(EXAMPLE);
    let sections: Vec<_> = doc.html.split("</section>").collect();
    assert!(
        sections[0]
            .trim_end()
            .ends_with(r#"<i-question question="What is X?" answer="X is Y."></i-question>"#)
    );
    assert!(!sections[1].contains("i-question"));
}

#[test]
fn test_example_idless_section_has_no_label() {
    let doc = process(EXAMPLE);
    let second = doc.html.split("</section>").nth(1).unwrap();
    assert!(second.contains(r#"<section class="content-chunk">"#));
    assert!(!second.contains("aria-labelledby"));
    assert!(!second.contains("data-chunk-slug"));
}

#[test]
fn test_heading_attributes_rendered() {
    let doc = process("## Program Structure {#structure .big .wide level=intro}\n\nText.\n");
    assert!(doc.html.contains(
        r#"<h2 id="structure" class="big wide" data-level="intro">Program Structure</h2>"#
    ));
}

#[test]
fn test_heading_without_annotation_unchanged() {
    let doc = process("## Plain {#x} tail\n\nText.\n");
    assert!(doc.html.contains("<h2>Plain {#x} tail</h2>"));
}

#[test]
fn test_no_frontmatter_matches_pipeline_without_join() {
    let source = "Lead.\n\n## A {#a}\n\nOne.\n\n### Sub\n\nTwo.\n\n## B\n\n- x\n- y\n";

    let mut md = parse(source, &ParseOptions::default());
    apply_heading_attributes(&mut md, false);
    let mut tree = to_html_tree(md);
    wrap_sections(&mut tree);
    let expected = to_html(&tree);

    assert_eq!(process(source).html, expected);
}

#[test]
fn test_frontmatter_only_document() {
    let doc = process("---\ncri: []\n---\n");
    assert!(doc.html.is_empty());
    assert!(doc.chunks.is_empty());
}

#[test]
fn test_strict_and_lenient_policies() {
    let source = "---\ncri: [unclosed\n---\n## A {#a}\n";

    let lenient = process(source);
    assert_eq!(
        lenient.chunks,
        vec![ChunkSummary {
            slug: Some("a".to_string()),
            title: "A".to_string(),
            has_question: false,
        }]
    );

    let strict = Processor::new(RenderOptions {
        frontmatter: FrontmatterPolicy::Strict,
        ..RenderOptions::default()
    });
    assert!(matches!(
        strict.process(source, None),
        Err(Error::MalformedFrontmatter(_))
    ));
}

#[test]
fn test_gfm_content_inside_sections() {
    let source = "## Data {#data}\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n- [x] done\n\nText with ~~old~~ new.\n";
    let html = process(source).html;
    assert!(html.contains("<table>"));
    assert!(html.contains(r#"<input type="checkbox" disabled checked>"#));
    assert!(html.contains("<del>old</del>"));
}

#[test]
fn test_annotation_after_inline_code() {
    let doc = process("## Using `Result` {#result}\n\nText.\n");
    assert!(
        doc.html
            .contains(r#"<h2 id="result">Using <code>Result</code></h2>"#)
    );
    assert_eq!(doc.chunks[0].slug.as_deref(), Some("result"));
}

#[test]
fn test_annotation_not_last_is_left_alone() {
    let doc = process("## Title {#x} `code`\n\nText.\n");
    assert!(doc.html.contains("<h2>Title {#x} <code>code</code></h2>"));
    assert!(doc.html.starts_with(r#"<section class="content-chunk">"#));
    assert_eq!(doc.chunks[0].slug, None);
}

#[test]
fn test_setext_heading_annotation() {
    let doc = process("Intro {#intro .big}\n------------------\n\nText.\n");
    assert!(doc.html.starts_with(
        r#"<section class="content-chunk" data-chunk-slug="intro" aria-labelledby="intro">"#
    ));
    assert!(doc.html.contains(r#"<h2 id="intro" class="big">Intro</h2>"#));
}

#[test]
fn test_duplicate_ids_each_get_question() {
    let source = "---\ncri:\n  - slug: dup\n    question: Q\n    answer: A\n---\n## A {#dup}\n\nOne.\n\n## B {#dup}\n\nTwo.\n";
    let doc = process(source);
    assert_eq!(doc.report.attached, 2);
    assert_eq!(doc.html.matches("<i-question ").count(), 2);
    assert!(doc.chunks.iter().all(|c| c.has_question));
}

#[test]
fn test_numeric_answer_keeps_other_questions() {
    let source = "---\ncri:\n  - slug: year\n    question: When?\n    answer: 1984\n  - slug: next\n    question: Q\n    answer: A\n---\n## Year {#year}\n\n## Next {#next}\n";
    let doc = process(source);
    assert_eq!(doc.report.attached, 2);
    assert!(doc.html.contains(r#"<i-question question="When?" answer="1984">"#));
    assert!(doc.chunks.iter().all(|c| c.has_question));
}

#[test]
fn test_raw_html_heading_opens_section() {
    let doc = process("## A {#a}\n\nOne.\n\n<h2 id=\"b\">B</h2>\n\nTwo.\n");
    let slugs: Vec<_> = doc.chunks.iter().map(|c| c.slug.as_deref()).collect();
    assert_eq!(slugs, vec![Some("a"), Some("b")]);

    let second = doc.html.split("</section>").nth(1).unwrap();
    assert!(second.contains(r#"<h2 id="b">B</h2>"#));
    assert!(second.contains("<p>Two.</p>"));
}
