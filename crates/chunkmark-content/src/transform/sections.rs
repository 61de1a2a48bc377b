//! Section grouping.
//!
//! Regroups the flat top-level flow of a converted document into one
//! `section` per `h2` heading:
//!
//! ```html
//! <section class="content-chunk" data-chunk-slug="intro" aria-labelledby="intro">
//! <h2 id="intro">Intro</h2>
//! <p>...</p>
//! </section>
//! ```
//!
//! Content before the first `h2` is dropped. Deeper headings stay inside
//! the section they fall in.

use serde::Serialize;

use crate::tree::{Element, Node, Root};

/// Class every section container carries.
pub const SECTION_CLASS: &str = "content-chunk";

/// Tag of the heading that opens a section.
pub const SECTION_HEADING: &str = "h2";

const SEPARATOR: &str = "\n\n";

/// Replace the root's children with sections, one per `h2`.
///
/// The original list is consumed and a new one is built; each section holds
/// a fresh `h2` with the original heading's properties and children, then
/// every following node up to the next `h2`.
pub fn wrap_sections(root: &mut Root) {
    let mut sections: Vec<Element> = Vec::new();
    let mut current: Option<Element> = None;
    let mut dropped = 0usize;

    for node in std::mem::take(&mut root.children) {
        match node {
            Node::Element(el) if el.tag == SECTION_HEADING => {
                if let Some(section) = current.take() {
                    sections.push(section);
                }
                current = Some(open_section(el));
            }
            other => match current.as_mut() {
                Some(section) => section.children.push(other),
                None => dropped += 1,
            },
        }
    }
    if let Some(section) = current {
        sections.push(section);
    }

    if dropped > 0 {
        log::debug!("Dropped {dropped} node(s) before the first {SECTION_HEADING}");
    }
    log::debug!("Grouped document into {} section(s)", sections.len());

    let mut children = Vec::with_capacity(sections.len() * 2);
    for (index, section) in sections.into_iter().enumerate() {
        if index > 0 {
            children.push(Node::text(SEPARATOR));
        }
        children.push(section.into());
    }
    root.children = children;
}

fn open_section(heading: Element) -> Element {
    let Element {
        properties,
        children,
        ..
    } = heading;

    let mut section = Element::new("section").with_property("class", SECTION_CLASS);
    if let Some(id) = properties.get("id") {
        section.properties.insert("dataChunkSlug", id);
        section.properties.insert("ariaLabelledby", id);
    }

    let h2 = Element::new(SECTION_HEADING)
        .with_properties(properties)
        .with_children(children);

    section.with_children([Node::text(SEPARATOR), h2.into(), Node::text("\n")])
}

/// Summary of one section, for manifests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkSummary {
    /// Heading id, if any.
    pub slug: Option<String>,
    /// Visible heading text.
    pub title: String,
    /// Whether a question was attached.
    pub has_question: bool,
}

/// Summarize the sections of a grouped tree, in order.
pub fn summarize(root: &Root) -> Vec<ChunkSummary> {
    root.child_elements()
        .filter(|el| is_section(el))
        .map(|section| {
            let heading = section
                .child_elements()
                .find(|el| el.tag == SECTION_HEADING);
            ChunkSummary {
                slug: section.property("dataChunkSlug").map(str::to_string),
                title: heading.map(Element::text_content).unwrap_or_default(),
                has_question: section.child_elements().any(|el| el.tag == "i-question"),
            }
        })
        .collect()
}

/// Whether an element is a section container produced by [`wrap_sections`].
pub fn is_section(el: &Element) -> bool {
    el.tag == "section"
        && el
            .property("class")
            .is_some_and(|class| class.split_whitespace().any(|c| c == SECTION_CLASS))
}
