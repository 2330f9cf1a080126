//! Tolerant markup reader
//!
//! Turns an exported markup fragment into a small element tree that the
//! importer can query by tag and class. The lexer runs in two modes: content
//! mode splits text from tags, and tag mode reads attributes until the tag
//! closes. Nesting errors are repaired (unclosed elements are closed at their
//! parent's end tag or at end of input). A start tag that is cut short by
//! another `<` or by the end of input is kept as text. Parsing only fails when
//! no element survives.

use logos::Logos;

/// Elements that never have children or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum ContentToken {
    #[regex(r"<!--([^-]|-[^-]|--[^>])*-->")]
    Comment,

    #[regex(r"<![^-][^>]*>")]
    Declaration,

    #[regex(r"<[a-zA-Z][a-zA-Z0-9-]*")]
    TagOpen,

    #[regex(r"</[a-zA-Z][a-zA-Z0-9-]*[ \t\r\n]*>")]
    TagClose,

    #[token("<")]
    StrayAngle,

    #[regex(r"[^<]+")]
    Text,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum TagToken {
    #[regex(r#"[^ \t\r\n\f"'=<>/][^ \t\r\n\f=<>/]*"#)]
    Name,

    #[token("=")]
    Eq,

    #[regex(r#""[^"]*""#)]
    DoubleQuoted,

    #[regex(r"'[^']*'")]
    SingleQuoted,

    #[token(">")]
    End,

    #[token("/>")]
    SelfClose,

    #[token("/")]
    Slash,

    /// Quote that is never closed
    #[regex(r#"["']"#)]
    StrayQuote,

    /// Start of the next tag: the current one was never closed
    #[token("<")]
    Interrupted,
}

/// Markup that cannot be read at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    /// Input contained no elements
    #[error("no elements found in markup")]
    Empty,
}

/// A node of the element tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// A parsed element with entity-decoded attributes and text
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Lower-cased tag name
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    /// Direct child elements
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// All descendants in document order, excluding `self`
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        collect_descendants(self, &mut out);
        out
    }

    /// First descendant satisfying `pred`
    pub fn find(&self, pred: impl Fn(&Element) -> bool) -> Option<&Element> {
        self.descendants().into_iter().find(|el| pred(el))
    }

    /// All descendants satisfying `pred`, in document order
    pub fn find_all(&self, pred: impl Fn(&Element) -> bool) -> Vec<&Element> {
        self.descendants().into_iter().filter(|el| pred(el)).collect()
    }

    pub fn first_tag(&self, name: &str) -> Option<&Element> {
        self.find(|el| el.is(name))
    }

    pub fn first_class(&self, class: &str) -> Option<&Element> {
        self.find(|el| el.has_class(class))
    }

    pub fn all_tag(&self, name: &str) -> Vec<&Element> {
        self.find_all(|el| el.is(name))
    }

    pub fn all_class(&self, class: &str) -> Vec<&Element> {
        self.find_all(|el| el.has_class(class))
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Trimmed text content
    pub fn text(&self) -> String {
        self.text_content().trim().to_string()
    }
}

fn collect_descendants<'a>(el: &'a Element, out: &mut Vec<&'a Element>) {
    for child in el.elements() {
        out.push(child);
        collect_descendants(child, out);
    }
}

fn collect_text(el: &Element, out: &mut String) {
    for node in &el.children {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(child) => collect_text(child, out),
        }
    }
}

/// Trimmed text of an optional element, empty when absent
pub fn text_of(el: Option<&Element>) -> String {
    el.map(Element::text).unwrap_or_default()
}

/// A parsed fragment: the top-level nodes of the input
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fragment {
    pub nodes: Vec<Node>,
}

impl Fragment {
    /// Parse `input` into an element tree.
    pub fn parse(input: &str) -> Result<Self, MarkupError> {
        let mut builder = TreeBuilder::default();
        let mut lex = ContentToken::lexer(input);

        while let Some(token) = lex.next() {
            match token {
                Ok(ContentToken::Text) | Ok(ContentToken::StrayAngle) | Err(()) => {
                    builder.text(lex.slice());
                }
                Ok(ContentToken::Comment) | Ok(ContentToken::Declaration) => {}
                Ok(ContentToken::TagClose) => {
                    let name = close_name(lex.slice());
                    builder.close(&name);
                }
                Ok(ContentToken::TagOpen) => {
                    let name = lex.slice()[1..].to_ascii_lowercase();
                    let start = lex.span().start;
                    match read_attributes(&input[lex.span().end..]) {
                        StartTag::Closed {
                            attrs,
                            self_closing,
                            len,
                        } => {
                            lex.bump(len);
                            builder.open(name, attrs, self_closing);
                        }
                        StartTag::Broken { len } => {
                            lex.bump(len);
                            builder.text(&input[start..lex.span().end]);
                        }
                    }
                }
            }
        }

        let fragment = builder.finish();
        if fragment.elements().next().is_none() {
            return Err(MarkupError::Empty);
        }
        Ok(fragment)
    }

    /// Top-level elements
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// First element anywhere in the fragment satisfying `pred`
    pub fn find(&self, pred: impl Fn(&Element) -> bool) -> Option<&Element> {
        for root in self.elements() {
            if pred(root) {
                return Some(root);
            }
            if let Some(found) = root.find(&pred) {
                return Some(found);
            }
        }
        None
    }
}

fn close_name(slice: &str) -> String {
    slice
        .trim_start_matches("</")
        .trim_end_matches('>')
        .trim()
        .to_ascii_lowercase()
}

fn decode(raw: &str) -> String {
    html_escape::decode_html_entities(raw).into_owned()
}

/// Outcome of reading a start tag after its name
enum StartTag {
    Closed {
        attrs: Vec<(String, String)>,
        self_closing: bool,
        /// Bytes consumed, including the closing `>`
        len: usize,
    },
    /// Cut short by `<` or end of input; `len` stops before the interruption
    Broken { len: usize },
}

/// Read attributes from `rest`, the input following `<name`.
fn read_attributes(rest: &str) -> StartTag {
    let mut lex = TagToken::lexer(rest);
    let mut attrs = Vec::new();
    let mut pending: Option<String> = None;
    let mut expecting_value = false;

    while let Some(token) = lex.next() {
        match token {
            Ok(TagToken::Name) => {
                if expecting_value {
                    let name = pending.take().unwrap_or_default();
                    attrs.push((name, decode(lex.slice())));
                    expecting_value = false;
                } else if let Some(bare) = pending.replace(lex.slice().to_ascii_lowercase()) {
                    attrs.push((bare, String::new()));
                }
            }
            Ok(TagToken::Eq) => {
                expecting_value = pending.is_some();
            }
            Ok(TagToken::DoubleQuoted) | Ok(TagToken::SingleQuoted) => {
                if expecting_value {
                    let raw = lex.slice();
                    let name = pending.take().unwrap_or_default();
                    attrs.push((name, decode(&raw[1..raw.len() - 1])));
                    expecting_value = false;
                }
            }
            Ok(TagToken::Slash) | Ok(TagToken::StrayQuote) | Err(()) => {}
            Ok(TagToken::End) | Ok(TagToken::SelfClose) => {
                if let Some(bare) = pending.take() {
                    attrs.push((bare, String::new()));
                }
                return StartTag::Closed {
                    attrs,
                    self_closing: token == Ok(TagToken::SelfClose),
                    len: lex.span().end,
                };
            }
            Ok(TagToken::Interrupted) => {
                return StartTag::Broken {
                    len: lex.span().start,
                };
            }
        }
    }

    StartTag::Broken { len: rest.len() }
}

#[derive(Default)]
struct TreeBuilder {
    roots: Vec<Node>,
    stack: Vec<Element>,
}

impl TreeBuilder {
    fn push_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn text(&mut self, raw: &str) {
        self.push_node(Node::Text(decode(raw)));
    }

    fn open(&mut self, name: String, attrs: Vec<(String, String)>, self_closing: bool) {
        let void = self_closing || VOID_ELEMENTS.contains(&name.as_str());
        let el = Element {
            name,
            attrs,
            children: Vec::new(),
        };
        if void {
            self.push_node(Node::Element(el));
        } else {
            self.stack.push(el);
        }
    }

    fn close(&mut self, name: &str) {
        // Stray end tags are ignored; otherwise close everything opened since.
        let Some(pos) = self.stack.iter().rposition(|el| el.name == name) else {
            return;
        };
        while self.stack.len() > pos {
            if let Some(el) = self.stack.pop() {
                self.push_node(Node::Element(el));
            }
        }
    }

    fn finish(mut self) -> Fragment {
        while let Some(el) = self.stack.pop() {
            self.push_node(Node::Element(el));
        }
        Fragment { nodes: self.roots }
    }
}
