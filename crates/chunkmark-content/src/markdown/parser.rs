//! Markdown parsing into the owned source tree.
//!
//! `pulldown-cmark` does the actual CommonMark work. This module folds its
//! balanced `Start`/`End` event stream into [`MdNode`]s with a stack.
//!
//! # Example
//!
//! ```rust
//! use chunkmark_content::markdown::ast::MdKind;
//! use chunkmark_content::markdown::parser::{parse, ParseOptions};
//!
//! let root = parse("## Intro {#intro}\n\nSome text.", &ParseOptions::default());
//! assert_eq!(root.children[0].kind, MdKind::Heading { depth: 2 });
//! assert_eq!(root.children[0].text_content(), "Intro {#intro}");
//! ```

use pulldown_cmark::{Alignment, CodeBlockKind, Event, Options, Parser, Tag};

use super::ast::{Align, MdKind, MdNode};

/// Parser switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Enable GitHub-flavored extensions: tables, strikethrough, task lists,
    /// footnotes.
    pub gfm: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { gfm: true }
    }
}

impl ParseOptions {
    fn to_cmark(self) -> Options {
        let mut options = Options::empty();
        if self.gfm {
            options.insert(Options::ENABLE_TABLES);
            options.insert(Options::ENABLE_STRIKETHROUGH);
            options.insert(Options::ENABLE_TASKLISTS);
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        options
    }
}

/// Parse Markdown into a source tree rooted at [`MdKind::Root`].
///
/// Heading attribute syntax is left in the heading text; the attribute
/// extractor handles it.
pub fn parse(content: &str, options: &ParseOptions) -> MdNode {
    let parser = Parser::new_ext(content, options.to_cmark());
    let mut stack: Vec<MdNode> = vec![MdNode::new(MdKind::Root)];

    for event in parser {
        match event {
            Event::Start(tag) => stack.push(MdNode::new(kind_for(tag))),
            Event::End(_) => close(&mut stack),
            Event::Text(text) => {
                let top = top_mut(&mut stack);
                match &mut top.kind {
                    MdKind::Code { value, .. } => value.push_str(&text),
                    MdKind::Html(html) => html.push_str(&text),
                    _ => top.push_child(MdNode::text(text.to_string())),
                }
            }
            Event::Code(code) => {
                top_mut(&mut stack).push_child(MdNode::new(MdKind::InlineCode(code.to_string())))
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                let top = top_mut(&mut stack);
                match &mut top.kind {
                    MdKind::Html(existing) => existing.push_str(&html),
                    _ => top.push_child(MdNode::new(MdKind::Html(html.to_string()))),
                }
            }
            Event::SoftBreak => top_mut(&mut stack).push_child(MdNode::text("\n")),
            Event::HardBreak => top_mut(&mut stack).push_child(MdNode::new(MdKind::Break)),
            Event::Rule => top_mut(&mut stack).push_child(MdNode::new(MdKind::ThematicBreak)),
            Event::TaskListMarker(checked) => mark_task(&mut stack, checked),
            Event::FootnoteReference(label) => top_mut(&mut stack)
                .push_child(MdNode::new(MdKind::FootnoteReference(label.to_string()))),
            _ => {}
        }
    }

    while stack.len() > 1 {
        close(&mut stack);
    }
    stack.pop().unwrap_or_else(|| MdNode::new(MdKind::Root))
}

fn kind_for(tag: Tag<'_>) -> MdKind {
    match tag {
        Tag::Heading { level, .. } => MdKind::Heading { depth: level as u8 },
        Tag::Paragraph => MdKind::Paragraph,
        Tag::Emphasis => MdKind::Emphasis,
        Tag::Strong => MdKind::Strong,
        Tag::Strikethrough => MdKind::Delete,
        Tag::CodeBlock(kind) => MdKind::Code {
            lang: match kind {
                CodeBlockKind::Fenced(info) => info
                    .split_whitespace()
                    .next()
                    .map(|lang| lang.to_string()),
                CodeBlockKind::Indented => None,
            },
            value: String::new(),
        },
        Tag::HtmlBlock => MdKind::Html(String::new()),
        Tag::Link {
            dest_url, title, ..
        } => MdKind::Link {
            url: dest_url.to_string(),
            title: title.to_string(),
        },
        Tag::Image {
            dest_url, title, ..
        } => MdKind::Image {
            url: dest_url.to_string(),
            title: title.to_string(),
        },
        Tag::List(start) => MdKind::List { start },
        Tag::Item => MdKind::ListItem { checked: None },
        Tag::BlockQuote(_) => MdKind::BlockQuote,
        Tag::Table(alignments) => MdKind::Table {
            align: alignments.into_iter().map(align_for).collect(),
        },
        Tag::TableHead => MdKind::TableHead,
        Tag::TableRow => MdKind::TableRow,
        Tag::TableCell => MdKind::TableCell,
        Tag::FootnoteDefinition(label) => MdKind::FootnoteDefinition(label.to_string()),
        _ => MdKind::Other,
    }
}

fn align_for(alignment: Alignment) -> Align {
    match alignment {
        Alignment::None => Align::None,
        Alignment::Left => Align::Left,
        Alignment::Center => Align::Center,
        Alignment::Right => Align::Right,
    }
}

fn top_mut(stack: &mut Vec<MdNode>) -> &mut MdNode {
    if stack.is_empty() {
        stack.push(MdNode::new(MdKind::Root));
    }
    let last = stack.len() - 1;
    &mut stack[last]
}

fn close(stack: &mut Vec<MdNode>) {
    if stack.len() < 2 {
        return;
    }
    if let Some(node) = stack.pop() {
        top_mut(stack).push_child(node);
    }
}

fn mark_task(stack: &mut [MdNode], checked: bool) {
    if let Some(item) = stack
        .iter_mut()
        .rev()
        .find(|node| matches!(node.kind, MdKind::ListItem { .. }))
    {
        item.kind = MdKind::ListItem {
            checked: Some(checked),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_default(content: &str) -> MdNode {
        parse(content, &ParseOptions::default())
    }

    // ------------------------------------------------------------------------
    // Block structure tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_parse_heading_and_paragraph() {
        let root = parse_default("## Intro\n\nSome text.");
        assert_eq!(root.kind, MdKind::Root);
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].heading_depth(), Some(2));
        assert_eq!(root.children[1].kind, MdKind::Paragraph);
        assert_eq!(root.children[1].text_content(), "Some text.");
    }

    #[test]
    fn test_heading_attribute_text_is_single_trailing_node() {
        let root = parse_default("## Title {#intro .big key=val}");
        let heading = &root.children[0];
        assert_eq!(heading.children.len(), 1);
        assert_eq!(
            heading.children[0].kind,
            MdKind::Text("Title {#intro .big key=val}".to_string())
        );
    }

    #[test]
    fn test_heading_with_trailing_code_child() {
        let root = parse_default("## Using `Result`");
        let heading = &root.children[0];
        assert!(matches!(
            heading.children.last().unwrap().kind,
            MdKind::InlineCode(_)
        ));
    }

    #[test]
    fn test_parse_fenced_code() {
        let root = parse_default("```rust\nfn main() {}\n```");
        assert_eq!(
            root.children[0].kind,
            MdKind::Code {
                lang: Some("rust".to_string()),
                value: "fn main() {}\n".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_html_block() {
        let root = parse_default("<div class=\"note\">\nhi\n</div>\n");
        assert!(matches!(&root.children[0].kind, MdKind::Html(html) if html.contains("note")));
    }

    #[test]
    fn test_parse_lists() {
        let root = parse_default("1. one\n2. two\n\n- a\n- b");
        assert_eq!(root.children[0].kind, MdKind::List { start: Some(1) });
        assert_eq!(root.children[0].children.len(), 2);
        assert_eq!(root.children[1].kind, MdKind::List { start: None });
    }

    #[test]
    fn test_parse_task_list() {
        let root = parse_default("- [x] done\n- [ ] todo");
        let list = &root.children[0];
        assert_eq!(list.children[0].kind, MdKind::ListItem { checked: Some(true) });
        assert_eq!(list.children[1].kind, MdKind::ListItem { checked: Some(false) });
    }

    #[test]
    fn test_parse_table() {
        let root = parse_default("| a | b |\n|:--|--:|\n| 1 | 2 |");
        let table = &root.children[0];
        assert_eq!(
            table.kind,
            MdKind::Table {
                align: vec![Align::Left, Align::Right]
            }
        );
        assert_eq!(table.children[0].kind, MdKind::TableHead);
        assert_eq!(table.children[1].kind, MdKind::TableRow);
    }

    #[test]
    fn test_gfm_disabled_leaves_tables_as_text() {
        let root = parse(
            "| a | b |\n|---|---|\n| 1 | 2 |",
            &ParseOptions { gfm: false },
        );
        assert_eq!(root.children[0].kind, MdKind::Paragraph);
    }

    // ------------------------------------------------------------------------
    // Inline tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_parse_inline_formatting() {
        let root = parse_default("Some **bold** and *em* and ~~gone~~.");
        let kinds: Vec<_> = root.children[0]
            .children
            .iter()
            .map(|c| c.kind.clone())
            .collect();
        assert!(kinds.contains(&MdKind::Strong));
        assert!(kinds.contains(&MdKind::Emphasis));
        assert!(kinds.contains(&MdKind::Delete));
    }

    #[test]
    fn test_parse_link_and_image() {
        let root = parse_default("[site](https://example.com \"T\") ![alt](a.png)");
        let para = &root.children[0];
        assert_eq!(
            para.children[0].kind,
            MdKind::Link {
                url: "https://example.com".to_string(),
                title: "T".to_string(),
            }
        );
        let image = para
            .children
            .iter()
            .find(|c| matches!(c.kind, MdKind::Image { .. }))
            .unwrap();
        assert_eq!(image.text_content(), "alt");
    }

    #[test]
    fn test_parse_footnote() {
        let root = parse_default("Text[^1].\n\n[^1]: Note.");
        assert!(
            root.children[0]
                .children
                .iter()
                .any(|c| c.kind == MdKind::FootnoteReference("1".to_string()))
        );
        assert_eq!(root.children[1].kind, MdKind::FootnoteDefinition("1".to_string()));
    }

    #[test]
    fn test_parse_empty() {
        let root = parse_default("");
        assert_eq!(root.kind, MdKind::Root);
        assert!(root.children.is_empty());
    }
}
