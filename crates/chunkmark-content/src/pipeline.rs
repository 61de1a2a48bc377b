//! Document pipeline.
//!
//! Runs one document through every stage:
//!
//! 1. split the frontmatter and build the CRI table,
//! 2. parse the body,
//! 3. extract heading attributes,
//! 4. convert to the HTML tree,
//! 5. group sections,
//! 6. attach questions,
//! 7. serialize.
//!
//! A [`Processor`] holds only immutable options, so one instance can be
//! shared across tasks behind an `Arc`.
//!
//! # Example
//!
//! ```rust
//! use chunkmark_content::{Processor, RenderOptions};
//!
//! let processor = Processor::new(RenderOptions::default());
//! let html = processor.render("Intro text.\n\n## Start {#start}\n\nBody.").unwrap();
//! assert!(html.starts_with(r#"<section class="content-chunk" data-chunk-slug="start""#));
//! assert!(!html.contains("Intro text."));
//! ```

use std::path::Path;

use chunkmark_core::Result;

use crate::context::ProcessingContext;
use crate::convert::to_html_tree;
use crate::html::to_html;
use crate::markdown::attributes::apply_heading_attributes;
use crate::markdown::frontmatter::{FrontmatterPolicy, extract_frontmatter, read_cri_table};
use crate::markdown::parser::{ParseOptions, parse};
use crate::transform::{ChunkSummary, JoinReport, attach_questions, summarize, wrap_sections};

/// Options for rendering documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Enable GitHub-flavored Markdown extensions.
    pub gfm: bool,
    /// Give headings without an explicit id a slug of their text.
    pub auto_slug: bool,
    /// What to do with frontmatter that cannot be read.
    pub frontmatter: FrontmatterPolicy,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            auto_slug: false,
            frontmatter: FrontmatterPolicy::Lenient,
        }
    }
}

/// A rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// HTML fragment.
    pub html: String,
    /// One summary per section, in order.
    pub chunks: Vec<ChunkSummary>,
    /// What the question join did.
    pub report: JoinReport,
}

/// Renders Markdown documents into sectioned HTML.
#[derive(Debug, Clone, Default)]
pub struct Processor {
    options: RenderOptions,
}

impl Processor {
    /// Create a processor.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// The options this processor renders with.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Run the full pipeline on one document.
    ///
    /// `path` is used only to label log messages.
    ///
    /// # Errors
    ///
    /// Returns [`chunkmark_core::Error::MalformedFrontmatter`] when the
    /// frontmatter cannot be read and the policy is strict.
    pub fn process(&self, source: &str, path: Option<&Path>) -> Result<Document> {
        let mut ctx = ProcessingContext::new();
        ctx.path = path.map(Path::to_path_buf);
        let name = ctx.display_name();

        let split = extract_frontmatter(source);
        ctx.cri = read_cri_table(&split, self.options.frontmatter)
            .inspect_err(|e| log::debug!("{name}: frontmatter rejected: {e}"))?;
        log::debug!(
            "{name}: frontmatter {}, {} CRI entr(ies)",
            if split.has_frontmatter() { "present" } else { "absent" },
            ctx.cri.as_ref().map_or(0, |t| t.len())
        );

        let parse_options = ParseOptions {
            gfm: self.options.gfm,
        };
        let mut md = parse(split.body(), &parse_options);
        log::debug!("{name}: parsed {} top-level block(s)", md.children.len());

        apply_heading_attributes(&mut md, self.options.auto_slug);

        let mut tree = to_html_tree(md);
        wrap_sections(&mut tree);
        let report = attach_questions(&mut tree, &ctx);

        let chunks = summarize(&tree);
        let html = to_html(&tree);
        log::debug!("{name}: rendered {} byte(s)", html.len());

        Ok(Document {
            html,
            chunks,
            report,
        })
    }

    /// Render a document to HTML only.
    pub fn render(&self, source: &str) -> Result<String> {
        Ok(self.process(source, None)?.html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunkmark_core::Error;

    const EXAMPLE: &str = "---\ncri:\n  - slug: intro\n    question: \"What is X?\"\n    answer: \"X is Y.\"\n---\n## Intro {#intro .big}\nSome text.\n## Next\nMore text.\n";

    // ------------------------------------------------------------------------
    // End-to-end tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_process_example_chunks() {
        let doc = Processor::default().process(EXAMPLE, None).unwrap();
        assert_eq!(
            doc.chunks,
            vec![
                ChunkSummary {
                    slug: Some("intro".to_string()),
                    title: "Intro".to_string(),
                    has_question: true,
                },
                ChunkSummary {
                    slug: None,
                    title: "Next".to_string(),
                    has_question: false,
                },
            ]
        );
        assert_eq!(doc.report.attached, 1);
        assert!(doc.report.unmatched.is_empty());
    }

    #[test]
    fn test_process_example_markup() {
        let html = Processor::default().render(EXAMPLE).unwrap();
        assert!(html.starts_with(
            r#"<section class="content-chunk" data-chunk-slug="intro" aria-labelledby="intro">"#
        ));
        assert!(html.contains(r#"<h2 id="intro" class="big">Intro</h2>"#));
        assert!(html.contains(
            r#"<i-question question="What is X?" answer="X is Y."></i-question>"#
        ));
        assert!(html.contains("<section class=\"content-chunk\">\n\n<h2>Next</h2>"));
        assert!(!html.contains("cri:"));
        assert!(!html.contains("{#intro"));
    }

    #[test]
    fn test_question_closes_first_section() {
        let html = Processor::default().render(EXAMPLE).unwrap();
        let first = html.split("</section>").next().unwrap();
        assert!(first.trim_end().ends_with("</i-question>"));
    }

    #[test]
    fn test_auto_slug_option() {
        let processor = Processor::new(RenderOptions {
            auto_slug: true,
            ..RenderOptions::default()
        });
        let doc = processor.process(EXAMPLE, None).unwrap();
        assert_eq!(doc.chunks[1].slug.as_deref(), Some("next"));
    }

    // ------------------------------------------------------------------------
    // Frontmatter policy tests
    // ------------------------------------------------------------------------

    const BROKEN: &str = "---\ncri:\n  - slug: intro\n---\n## Intro {#intro}\nText.\n";

    #[test]
    fn test_lenient_policy_renders_without_questions() {
        let doc = Processor::default().process(BROKEN, None).unwrap();
        assert_eq!(doc.chunks.len(), 1);
        assert!(!doc.chunks[0].has_question);
    }

    #[test]
    fn test_strict_policy_fails_document() {
        let processor = Processor::new(RenderOptions {
            frontmatter: FrontmatterPolicy::Strict,
            ..RenderOptions::default()
        });
        let err = processor.process(BROKEN, None).unwrap_err();
        assert!(matches!(err, Error::MalformedFrontmatter(_)));
    }

    #[test]
    fn test_unmatched_slugs_reported() {
        let source = "---\ncri:\n  - slug: gone\n    question: Q\n    answer: A\n---\n## Here {#here}\n";
        let doc = Processor::default().process(source, None).unwrap();
        assert_eq!(doc.report.unmatched, vec!["gone".to_string()]);
    }

    #[test]
    fn test_empty_document() {
        let doc = Processor::default().process("", None).unwrap();
        assert_eq!(doc.html, "");
        assert!(doc.chunks.is_empty());
    }
}
