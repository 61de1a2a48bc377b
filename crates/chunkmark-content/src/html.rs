//! HTML serialization of the element tree.
//!
//! Text is escaped, raw nodes are written verbatim, and void elements are
//! written without a closing tag. Camel-case property names produced by the
//! pipeline (`dataKey`, `ariaLabelledby`) become their kebab-case attribute
//! names.

use crate::tree::{Element, Node, Root};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const BOOLEAN_ATTRIBUTES: &[&str] = &["checked", "disabled", "hidden", "open"];

/// Serialize a tree to an HTML fragment.
///
/// ```rust
/// use chunkmark_content::html::to_html;
/// use chunkmark_content::tree::{Element, Node, Root};
///
/// let root = Root::new(vec![
///     Element::new("h2")
///         .with_property("dataKey", "v")
///         .with_children([Node::text("A & B")])
///         .into(),
/// ]);
/// assert_eq!(to_html(&root), r#"<h2 data-key="v">A &amp; B</h2>"#);
/// ```
pub fn to_html(root: &Root) -> String {
    let mut out = String::new();
    for node in &root.children {
        write_node(node, &mut out);
    }
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => escape_text(text, out),
        Node::Raw(html) => out.push_str(html),
        Node::Element(el) => write_element(el, out),
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in el.properties.iter() {
        out.push(' ');
        let attribute = attribute_name(name);
        out.push_str(&attribute);
        if value.is_empty() && BOOLEAN_ATTRIBUTES.contains(&attribute.as_str()) {
            continue;
        }
        out.push_str("=\"");
        escape_attribute(value, out);
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&el.tag.as_str()) {
        return;
    }
    for child in &el.children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

/// Attribute name for a property name.
///
/// `data*` and `aria*` names in camel case are split on upper-case letters
/// and joined with hyphens. Everything else is used as is.
///
/// ```rust
/// use chunkmark_content::html::attribute_name;
///
/// assert_eq!(attribute_name("dataChunkSlug"), "data-chunk-slug");
/// assert_eq!(attribute_name("ariaLabelledby"), "aria-labelledby");
/// assert_eq!(attribute_name("class"), "class");
/// ```
pub fn attribute_name(name: &str) -> String {
    let camel_prefixed = ["data", "aria"].iter().any(|prefix| {
        name.strip_prefix(prefix)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_ascii_uppercase())
    });
    if !camel_prefixed {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
