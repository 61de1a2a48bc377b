//! Markdown to sectioned HTML conversion for Chunkmark.
//!
//! A document goes through a fixed sequence of stages: the CRI frontmatter
//! is split off and read into a lookup table, the body is parsed, heading
//! attribute annotations are extracted, the tree is converted to HTML,
//! regrouped into one `section` per `h2`, and finally each section whose
//! slug appears in the table receives an `i-question` element.
//!
//! # Modules
//!
//! - [`markdown`]: source tree, parser, heading attributes, frontmatter
//! - [`tree`]: the HTML element tree
//! - [`convert`]: source tree to HTML tree
//! - [`raw`]: raw HTML fragments read back into elements
//! - [`transform`]: section grouping and question joining
//! - [`html`]: serialization
//! - [`pipeline`]: the [`Processor`] that runs everything
//!
//! # Example
//!
//! ```rust
//! use chunkmark_content::{Processor, RenderOptions};
//!
//! let source = "---
//! cri:
//!   - slug: intro
//!     question: What is X?
//!     answer: X is Y.
//! ---
//! ### Intro {#intro .big}
//! Some text.
//! ";
//!
//! let doc = Processor::new(RenderOptions::default()).process(source, None).unwrap();
//! assert_eq!(doc.chunks.len(), 1);
//! assert!(doc.html.contains(r#"<i-question question="What is X?" answer="X is Y.">"#));
//! ```

pub mod context;
pub mod convert;
pub mod html;
pub mod markdown;
pub mod pipeline;
pub mod raw;
pub mod transform;
pub mod tree;

// Re-export commonly used types
pub use context::ProcessingContext;
pub use markdown::{CriTable, FrontmatterPolicy, QuestionAnswer};
pub use pipeline::{Document, Processor, RenderOptions};
pub use transform::{ChunkSummary, JoinReport};
pub use tree::{Element, Node, Properties, Root};
