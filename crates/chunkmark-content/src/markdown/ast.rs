//! Owned Markdown source tree.
//!
//! `pulldown-cmark` produces a flat event stream; the attribute extractor
//! needs to look at a heading's last child and rewrite it, so the events are
//! folded into this small tree first. Each node carries a property bag that
//! later stages hand to the HTML converter.

use crate::tree::Properties;

/// Column alignment of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// No explicit alignment.
    None,
    /// `:---`
    Left,
    /// `:---:`
    Center,
    /// `---:`
    Right,
}

/// Kind of a Markdown node, with its inline payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MdKind {
    /// Document root.
    Root,
    /// ATX or setext heading of depth 1–6.
    Heading {
        /// Heading depth.
        depth: u8,
    },
    /// Paragraph.
    Paragraph,
    /// Plain text.
    Text(String),
    /// `*em*`
    Emphasis,
    /// `**strong**`
    Strong,
    /// `~~deleted~~`
    Delete,
    /// `` `code` ``
    InlineCode(String),
    /// Fenced or indented code block.
    Code {
        /// First word of the fence info string.
        lang: Option<String>,
        /// Literal content.
        value: String,
    },
    /// Inline link.
    Link {
        /// Destination.
        url: String,
        /// Title, empty when absent.
        title: String,
    },
    /// Image; children hold the alt text.
    Image {
        /// Source.
        url: String,
        /// Title, empty when absent.
        title: String,
    },
    /// Bullet or ordered list.
    List {
        /// Start number for ordered lists.
        start: Option<u64>,
    },
    /// List item; `checked` is set for task list items.
    ListItem {
        /// Task state, if this is a task list item.
        checked: Option<bool>,
    },
    /// Block quote.
    BlockQuote,
    /// `---`
    ThematicBreak,
    /// Hard line break.
    Break,
    /// Raw HTML, block or inline.
    Html(String),
    /// Table with per-column alignment.
    Table {
        /// Column alignments.
        align: Vec<Align>,
    },
    /// Header row of a table; children are cells.
    TableHead,
    /// Body row of a table.
    TableRow,
    /// Table cell.
    TableCell,
    /// `[^label]`
    FootnoteReference(String),
    /// `[^label]: ...`
    FootnoteDefinition(String),
    /// Construct without a dedicated kind; rendered as its children.
    Other,
}

/// A Markdown source node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MdNode {
    /// What this node is.
    pub kind: MdKind,
    /// Child nodes, in document order.
    pub children: Vec<MdNode>,
    /// Properties the converter renders as HTML attributes.
    pub properties: Properties,
}

impl MdNode {
    /// Create a node with no children.
    pub fn new(kind: MdKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            properties: Properties::new(),
        }
    }

    /// Create a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Self::new(MdKind::Text(value.into()))
    }

    /// Builder: append children.
    pub fn with_children(mut self, children: impl IntoIterator<Item = MdNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Heading depth, if this is a heading.
    pub fn heading_depth(&self) -> Option<u8> {
        match self.kind {
            MdKind::Heading { depth } => Some(depth),
            _ => None,
        }
    }

    /// Append a child, merging adjacent text so a heading's visible text is
    /// a single trailing node.
    pub fn push_child(&mut self, child: MdNode) {
        if let MdKind::Text(incoming) = &child.kind {
            if let Some(MdNode {
                kind: MdKind::Text(existing),
                ..
            }) = self.children.last_mut()
            {
                existing.push_str(incoming);
                return;
            }
        }
        self.children.push(child);
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.kind {
            MdKind::Text(value) | MdKind::InlineCode(value) => out.push_str(value),
            MdKind::Code { value, .. } => out.push_str(value),
            _ => {}
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Whether this node renders as a block in HTML.
    pub fn is_block(&self) -> bool {
        matches!(
            self.kind,
            MdKind::Heading { .. }
                | MdKind::Paragraph
                | MdKind::Code { .. }
                | MdKind::List { .. }
                | MdKind::BlockQuote
                | MdKind::ThematicBreak
                | MdKind::Table { .. }
                | MdKind::FootnoteDefinition(_)
        )
    }

    /// Visit this node and every descendant mutably, depth first.
    pub fn visit_mut(&mut self, visit: &mut impl FnMut(&mut MdNode)) {
        visit(self);
        for child in &mut self.children {
            child.visit_mut(visit);
        }
    }
}
