//! Raw HTML fragments read back into elements.
//!
//! HTML written directly in a document (an `<h2 id="x">` block, a `<div>`
//! wrapper) becomes ordinary [`Element`]s, so section grouping sees raw
//! headings the same way it sees Markdown ones.
//!
//! Fragments are tokenized with html5ever and rebuilt with a tag stack.
//! Anything that cannot be rebuilt faithfully on its own (unbalanced tags,
//! comments, doctypes, raw-text elements such as `<script>`) is reported as
//! `None` and the caller keeps the fragment verbatim.

use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

use crate::tree::{Element, Node};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "textarea", "title", "xmp", "iframe", "noembed", "noframes", "noscript",
    "plaintext",
];

/// Parse a fragment into nodes.
///
/// Returns `None` when the fragment does not stand alone as a balanced
/// sequence of elements and text.
///
/// ```rust
/// use chunkmark_content::raw::parse_fragment;
///
/// let nodes = parse_fragment(r#"<h2 id="b">B</h2>"#).unwrap();
/// let h2 = nodes[0].as_element().unwrap();
/// assert_eq!(h2.property("id"), Some("b"));
///
/// assert!(parse_fragment("<span>").is_none());
/// ```
pub fn parse_fragment(html: &str) -> Option<Vec<Node>> {
    let input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(html));

    let tokenizer = Tokenizer::new(FragmentSink::default(), TokenizerOpts::default());
    let _ = tokenizer.feed(&input);
    tokenizer.end();

    tokenizer.sink.state.take().finish()
}

#[derive(Default)]
struct FragmentSink {
    state: RefCell<FragmentState>,
}

impl TokenSink for FragmentSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        self.state.borrow_mut().token(token);
        TokenSinkResult::Continue
    }
}

#[derive(Default)]
struct FragmentState {
    open: Vec<Element>,
    nodes: Vec<Node>,
    unsupported: bool,
}

impl FragmentState {
    fn token(&mut self, token: Token) {
        if self.unsupported {
            return;
        }
        match token {
            Token::CharacterTokens(text) => self.push_text(&text),
            Token::TagToken(tag) => {
                let name = tag.name.to_string();
                match tag.kind {
                    TagKind::StartTag => {
                        if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                            self.unsupported = true;
                            return;
                        }
                        let element = tag.attrs.iter().fold(Element::new(&name), |el, attr| {
                            el.with_property(attr.name.local.to_string(), attr.value.to_string())
                        });
                        if tag.self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
                            self.push(element.into());
                        } else {
                            self.open.push(element);
                        }
                    }
                    TagKind::EndTag => {
                        if VOID_ELEMENTS.contains(&name.as_str()) {
                            return;
                        }
                        match self.open.pop() {
                            Some(element) if element.tag == name => self.push(element.into()),
                            _ => self.unsupported = true,
                        }
                    }
                }
            }
            Token::CommentToken(_) | Token::DoctypeToken(_) => self.unsupported = true,
            _ => {}
        }
    }

    fn push(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.nodes.push(node),
        }
    }

    fn push_text(&mut self, text: &str) {
        let siblings = match self.open.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.nodes,
        };
        match siblings.last_mut() {
            Some(Node::Text(existing)) => existing.push_str(text),
            _ => siblings.push(Node::text(text)),
        }
    }

    fn finish(self) -> Option<Vec<Node>> {
        (!self.unsupported && self.open.is_empty()).then_some(self.nodes)
    }
}
