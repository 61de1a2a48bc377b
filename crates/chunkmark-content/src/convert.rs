//! Source tree to HTML tree conversion.
//!
//! Each Markdown construct maps to its HTML element. Property bags attached
//! to source nodes (heading attributes) become element properties. Block
//! siblings are separated by `"\n"` text nodes so the serialized output reads
//! one block per line; the section grouper and joiner rely on nothing more
//! than element tags and properties.

use std::collections::HashMap;

use crate::markdown::ast::{Align, MdKind, MdNode};
use crate::tree::{Element, Node, Root};

/// Convert a parsed Markdown tree into an HTML tree.
///
/// Footnote definitions are collected and emitted at the end of the
/// document in a `section.footnotes` block, numbered by first reference.
pub fn to_html_tree(root: MdNode) -> Root {
    let mut converter = Converter::default();
    let mut children = converter.all(root.children);
    children = wrap(children, false);

    if let Some(footnotes) = converter.footnotes() {
        if !children.is_empty() {
            children.push(Node::text("\n"));
        }
        children.push(footnotes.into());
    }
    Root::new(children)
}

#[derive(Default)]
struct Converter {
    footnote_numbers: HashMap<String, usize>,
    footnote_definitions: Vec<(String, Vec<Node>)>,
}

impl Converter {
    fn all(&mut self, nodes: Vec<MdNode>) -> Vec<Node> {
        nodes.into_iter().flat_map(|node| self.one(node)).collect()
    }

    fn one(&mut self, node: MdNode) -> Vec<Node> {
        let MdNode {
            kind,
            children,
            properties,
        } = node;

        let mut element = match kind {
            MdKind::Root => return self.all(children),
            MdKind::Text(value) => return vec![Node::Text(value)],
            MdKind::Html(html) => {
                return crate::raw::parse_fragment(&html).unwrap_or_else(|| {
                    log::debug!("Keeping raw HTML verbatim: {}", html.trim_end());
                    vec![Node::Raw(html)]
                });
            }
            MdKind::Other => return self.all(children),
            MdKind::Break => return vec![Element::new("br").into(), Node::text("\n")],
            MdKind::FootnoteDefinition(label) => {
                let content = wrap(self.all(children), true);
                self.footnote_definitions.push((label, content));
                return Vec::new();
            }
            MdKind::Heading { depth } => {
                Element::new(format!("h{depth}")).with_children(self.all(children))
            }
            MdKind::Paragraph => Element::new("p").with_children(self.all(children)),
            MdKind::Emphasis => Element::new("em").with_children(self.all(children)),
            MdKind::Strong => Element::new("strong").with_children(self.all(children)),
            MdKind::Delete => Element::new("del").with_children(self.all(children)),
            MdKind::InlineCode(code) => Element::new("code").with_children([Node::Text(code)]),
            MdKind::Code { lang, value } => {
                let mut code = Element::new("code");
                if let Some(lang) = lang {
                    code.properties.insert("class", format!("language-{lang}"));
                }
                let code = code.with_children([Node::Text(value)]);
                Element::new("pre").with_children([code.into()])
            }
            MdKind::Link { url, title } => {
                let mut link = Element::new("a").with_property("href", url);
                if !title.is_empty() {
                    link.properties.insert("title", title);
                }
                link.with_children(self.all(children))
            }
            MdKind::Image { url, title } => {
                let alt: String = children.iter().map(MdNode::text_content).collect();
                let mut image = Element::new("img")
                    .with_property("src", url)
                    .with_property("alt", alt);
                if !title.is_empty() {
                    image.properties.insert("title", title);
                }
                image
            }
            MdKind::List { start } => {
                let tag = if start.is_some() { "ol" } else { "ul" };
                let mut list = Element::new(tag);
                if let Some(n) = start.filter(|n| *n != 1) {
                    list.properties.insert("start", n.to_string());
                }
                if children
                    .iter()
                    .any(|item| matches!(item.kind, MdKind::ListItem { checked: Some(_) }))
                {
                    list.properties.insert("class", "contains-task-list");
                }
                list.with_children(wrap(self.all(children), true))
            }
            MdKind::ListItem { checked } => self.list_item(checked, children),
            MdKind::BlockQuote => {
                Element::new("blockquote").with_children(wrap(self.all(children), true))
            }
            MdKind::ThematicBreak => Element::new("hr"),
            MdKind::Table { align } => self.table(&align, children),
            MdKind::TableHead | MdKind::TableRow => {
                Element::new("tr").with_children(self.all(children))
            }
            MdKind::TableCell => Element::new("td").with_children(self.all(children)),
            MdKind::FootnoteReference(label) => self.footnote_reference(label),
        };

        element.properties.extend_from(&properties);
        vec![element.into()]
    }

    fn list_item(&mut self, checked: Option<bool>, children: Vec<MdNode>) -> Element {
        let spread = children.iter().any(MdNode::is_block);
        let mut content = self.all(children);
        let mut item = Element::new("li");

        if let Some(checked) = checked {
            item.properties.insert("class", "task-list-item");
            let mut input = Element::new("input")
                .with_property("type", "checkbox")
                .with_property("disabled", "");
            if checked {
                input.properties.insert("checked", "");
            }
            let marker = [input.into(), Node::text(" ")];
            match content.first_mut() {
                Some(Node::Element(first)) if spread && first.tag == "p" => {
                    prepend(&mut first.children, marker);
                }
                _ => prepend(&mut content, marker),
            }
        }

        if spread {
            item.with_children(wrap(content, true))
        } else {
            item.with_children(content)
        }
    }

    fn table(&mut self, align: &[Align], rows: Vec<MdNode>) -> Element {
        let mut head = Vec::new();
        let mut body = Vec::new();

        for row in rows {
            let is_head = row.kind == MdKind::TableHead;
            let cell_tag = if is_head { "th" } else { "td" };
            let cells: Vec<Node> = row
                .children
                .into_iter()
                .enumerate()
                .map(|(index, cell)| {
                    let mut el = Element::new(cell_tag).with_children(self.all(cell.children));
                    if let Some(value) = align.get(index).and_then(align_value) {
                        el.properties.insert("align", value);
                    }
                    el.into()
                })
                .collect();
            let tr = Element::new("tr").with_children(wrap(cells, true));
            if is_head {
                head.push(tr.into());
            } else {
                body.push(tr.into());
            }
        }

        let mut sections = Vec::new();
        if !head.is_empty() {
            sections.push(Element::new("thead").with_children(wrap(head, true)).into());
        }
        if !body.is_empty() {
            sections.push(Element::new("tbody").with_children(wrap(body, true)).into());
        }
        Element::new("table").with_children(wrap(sections, true))
    }

    fn footnote_reference(&mut self, label: String) -> Element {
        let next = self.footnote_numbers.len() + 1;
        let number = *self.footnote_numbers.entry(label.clone()).or_insert(next);
        let id = footnote_id(&label);
        let link = Element::new("a")
            .with_property("href", format!("#fn-{id}"))
            .with_property("id", format!("fnref-{id}"))
            .with_property("dataFootnoteRef", "")
            .with_children([Node::text(number.to_string())]);
        Element::new("sup").with_children([link.into()])
    }

    fn footnotes(&mut self) -> Option<Element> {
        if self.footnote_definitions.is_empty() {
            return None;
        }
        let mut definitions = std::mem::take(&mut self.footnote_definitions);
        definitions.sort_by_key(|(label, _)| {
            self.footnote_numbers
                .get(label)
                .copied()
                .unwrap_or(usize::MAX)
        });

        let items: Vec<Node> = definitions
            .into_iter()
            .map(|(label, mut content)| {
                let id = footnote_id(&label);
                let backref = Element::new("a")
                    .with_property("href", format!("#fnref-{id}"))
                    .with_property("class", "footnote-backref")
                    .with_children([Node::text("↩")]);
                content.push(backref.into());
                Element::new("li")
                    .with_property("id", format!("fn-{id}"))
                    .with_children(content)
                    .into()
            })
            .collect();

        let list = Element::new("ol").with_children(wrap(items, true));
        Some(
            Element::new("section")
                .with_property("class", "footnotes")
                .with_property("dataFootnotes", "")
                .with_children(wrap(vec![list.into()], true)),
        )
    }
}

fn prepend(target: &mut Vec<Node>, nodes: impl IntoIterator<Item = Node>) {
    let rest = std::mem::take(target);
    target.extend(nodes);
    target.extend(rest);
}

fn footnote_id(label: &str) -> String {
    chunkmark_core::slugify(label)
}

fn align_value(align: &Align) -> Option<&'static str> {
    match align {
        Align::None => None,
        Align::Left => Some("left"),
        Align::Center => Some("center"),
        Align::Right => Some("right"),
    }
}

/// Interleave `"\n"` text nodes between nodes; `loose` also pads both ends.
fn wrap(nodes: Vec<Node>, loose: bool) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len() * 2 + 1);
    if loose {
        out.push(Node::text("\n"));
    }
    let count = nodes.len();
    for (index, node) in nodes.into_iter().enumerate() {
        out.push(node);
        if index + 1 < count {
            out.push(Node::text("\n"));
        }
    }
    if loose && count > 0 {
        out.push(Node::text("\n"));
    }
    out
}
