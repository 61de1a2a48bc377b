//! Heading attribute extraction.
//!
//! A heading may end with an attribute annotation:
//!
//! ```markdown
//! ## Program Structure {#structure .big .wide level=intro}
//! ```
//!
//! The annotation is stripped from the visible text and turned into a
//! property bag on the heading: `id`, a space-joined `class`, and one
//! `data<Key>` entry per `key=value` pair. The converter renders the bag as
//! HTML attributes; the heading's kind is not changed here.
//!
//! Only the heading's last child is inspected, and only when it is plain
//! text. Anything else leaves the heading untouched.

use std::sync::LazyLock;

use chunkmark_core::Slugger;
use regex::Regex;

use super::ast::{MdKind, MdNode};
use crate::tree::Properties;

// `*` rather than `+` so that empty braces `{}` still count as an annotation.
static TRAILING_ATTRIBUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" \{([^}]*)\}$").expect("valid trailing attribute regex"));

static ID_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)#([^\s}]+)").expect("valid id regex"));

static CLASS_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)\.([^\s}]+)").expect("valid class regex"));

static KEY_VALUE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)([A-Za-z_][\w-]*)\s*=\s*([^\s}]+)").expect("valid key=value regex")
});

/// Attributes parsed from one annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingAttributes {
    /// First `#id` token.
    pub id: Option<String>,
    /// Every `.class` token, in order.
    pub classes: Vec<String>,
    /// Every `key=value` pair, in order.
    pub data: Vec<(String, String)>,
}

impl HeadingAttributes {
    /// Parse the inside of an annotation (without the braces).
    ///
    /// # Example
    ///
    /// ```rust
    /// use chunkmark_content::markdown::attributes::HeadingAttributes;
    ///
    /// let attrs = HeadingAttributes::parse("#intro .big key=val");
    /// assert_eq!(attrs.id.as_deref(), Some("intro"));
    /// assert_eq!(attrs.classes, vec!["big"]);
    /// assert_eq!(attrs.data, vec![("key".to_string(), "val".to_string())]);
    /// ```
    pub fn parse(span: &str) -> Self {
        let id = ID_TOKEN
            .captures(span)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());

        let classes = CLASS_TOKEN
            .captures_iter(span)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect();

        let data = KEY_VALUE_TOKEN
            .captures_iter(span)
            .filter_map(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Self { id, classes, data }
    }

    /// Whether nothing was found.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.classes.is_empty() && self.data.is_empty()
    }

    /// Convert into the property bag the converter renders.
    pub fn into_properties(self) -> Properties {
        let mut props = Properties::new();
        if let Some(id) = self.id {
            props.insert("id", id);
        }
        if !self.classes.is_empty() {
            props.insert("class", self.classes.join(" "));
        }
        for (key, value) in self.data {
            props.insert(data_property_name(&key), value);
        }
        props
    }
}

/// Name of the property a `key=value` pair becomes: `data` followed by the
/// key with its first letter upper-cased.
///
/// ```rust
/// use chunkmark_content::markdown::attributes::data_property_name;
///
/// assert_eq!(data_property_name("key"), "dataKey");
/// assert_eq!(data_property_name("chunkType"), "dataChunkType");
/// ```
pub fn data_property_name(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => format!("data{}{}", first.to_uppercase(), chars.as_str()),
        None => "data".to_string(),
    }
}

/// Split heading text into the visible part and the annotation body.
///
/// The text is right-trimmed before matching. Returns `None` when there is
/// no trailing annotation.
pub fn split_trailing_attributes(text: &str) -> Option<(&str, &str)> {
    let trimmed = text.trim_end();
    let caps = TRAILING_ATTRIBUTES.captures(trimmed)?;
    let whole = caps.get(0)?;
    let span = caps.get(1).map_or("", |m| m.as_str());
    Some((&trimmed[..whole.start()], span))
}

/// Extract the annotation of one heading, in place.
///
/// Returns `true` if an annotation was found and stripped. Non-heading
/// nodes and headings whose last child is not text are left alone.
pub fn extract_heading_attributes(heading: &mut MdNode) -> bool {
    if heading.heading_depth().is_none() {
        return false;
    }
    let Some(MdNode {
        kind: MdKind::Text(text),
        ..
    }) = heading.children.last_mut()
    else {
        return false;
    };
    let Some((visible, span)) = split_trailing_attributes(text) else {
        return false;
    };

    let attrs = HeadingAttributes::parse(span);
    let visible = visible.to_string();
    *text = visible;

    if !attrs.is_empty() {
        log::debug!("Heading attributes: {attrs:?}");
    }
    heading.properties.extend_from(&attrs.into_properties());
    true
}

/// Run attribute extraction over every heading in the tree.
///
/// With `auto_slug`, headings that still have no `id` afterwards get a
/// slug of their visible text, unique within the document.
pub fn apply_heading_attributes(root: &mut MdNode, auto_slug: bool) {
    let mut slugger = Slugger::new();
    root.visit_mut(&mut |node: &mut MdNode| {
        if extract_heading_attributes(node) {
            if let Some(id) = node.properties.get("id") {
                slugger.reserve(id);
            }
        }
    });

    if !auto_slug {
        return;
    }
    root.visit_mut(&mut |node: &mut MdNode| {
        if node.heading_depth().is_some() && !node.properties.contains("id") {
            let slug = slugger.slug(&node.text_content());
            if !slug.is_empty() {
                node.properties.insert("id", slug);
            }
        }
    });
}
