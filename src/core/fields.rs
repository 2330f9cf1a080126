//! Structured sub-fields decoded from a record's `text`
//!
//! Every block kind owns a small grammar over two delimiters: a line break
//! separates top-level fields and `|` separates sub-fields within a line.
//! The helpers at the bottom of this module implement the shared pieces of
//! those grammars; the per-kind field order lives with each kind in
//! [`crate::categories`].

use serde::{Deserialize, Serialize};

/// Line separator between top-level fields.
pub const LINE: char = '\n';
/// Separator between sub-fields on one line.
pub const PART: char = '|';

/// A card inside a two- or three-column grid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCard {
    pub title: String,
    pub icon: String,
    pub body: String,
}

/// A card inside a masonry grid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasonryCard {
    pub title: String,
    pub icon: String,
    /// `short`, `medium` or `long`
    pub size: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtaButton {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub date: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccordionItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub value: String,
    pub label: String,
}

/// Structured view of a block's `text`.
///
/// Repeatable groups are plain vectors: element order is display and edit
/// order, there is no separate index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum BlockFields {
    /// Verbatim text (headings, paragraphs, code, text divider)
    Text { text: String },
    /// One item per line
    List { items: Vec<String> },
    /// Kinds that carry no data
    Empty,
    Image { url: String, title: String, caption: String },
    Embed { provider: String, url: String, caption: String },
    /// Title followed by free body text (tips and simple cards)
    Titled { title: String, body: String },
    Quote { label: String, body: String, author: String },
    Steps { title: String, steps: Vec<String> },
    ImageCard { title: String, body: String, image_url: String },
    IconCard { icon: String, title: String, body: String },
    Stat { number: String, label: String, description: String },
    CardGrid { cards: Vec<GridCard> },
    Masonry { cards: Vec<MasonryCard> },
    Cta { title: String, description: String, buttons: Vec<CtaButton> },
    Newsletter { title: String, description: String, placeholder: String, button: CtaButton },
    Table { rows: Vec<Vec<String>> },
    Timeline { events: Vec<TimelineEvent> },
    Accordion { items: Vec<AccordionItem> },
    Poll { question: String, options: Vec<PollOption> },
}

impl BlockFields {
    /// Name of the variant, used to check that edited fields fit a kind.
    pub fn shape(&self) -> &'static str {
        match self {
            BlockFields::Text { .. } => "text",
            BlockFields::List { .. } => "list",
            BlockFields::Empty => "empty",
            BlockFields::Image { .. } => "image",
            BlockFields::Embed { .. } => "embed",
            BlockFields::Titled { .. } => "titled",
            BlockFields::Quote { .. } => "quote",
            BlockFields::Steps { .. } => "steps",
            BlockFields::ImageCard { .. } => "image_card",
            BlockFields::IconCard { .. } => "icon_card",
            BlockFields::Stat { .. } => "stat",
            BlockFields::CardGrid { .. } => "card_grid",
            BlockFields::Masonry { .. } => "masonry",
            BlockFields::Cta { .. } => "cta",
            BlockFields::Newsletter { .. } => "newsletter",
            BlockFields::Table { .. } => "table",
            BlockFields::Timeline { .. } => "timeline",
            BlockFields::Accordion { .. } => "accordion",
            BlockFields::Poll { .. } => "poll",
        }
    }
}

// ---------------------------------------------------------------------------
// Grammar helpers
// ---------------------------------------------------------------------------

/// Split `text` into its `|`-separated sub-fields.
pub fn parts(line: &str) -> Vec<&str> {
    line.split(PART).collect()
}

/// Sub-field `index` of `parts`, empty when missing.
pub fn part(parts: &[&str], index: usize) -> String {
    parts.get(index).map(|s| s.to_string()).unwrap_or_default()
}

/// Line `index` of `text`, empty when missing.
pub fn line(text: &str, index: usize) -> String {
    text.split(LINE).nth(index).map(str::to_string).unwrap_or_default()
}

/// All lines from `index` on, joined back with line breaks.
pub fn rest(text: &str, index: usize) -> String {
    text.split(LINE).skip(index).collect::<Vec<_>>().join("\n")
}

/// Non-blank lines starting at `index`, in order.
pub fn items(text: &str, index: usize) -> Vec<String> {
    text.split(LINE)
        .skip(index)
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Join sub-fields of one line.
pub fn join_parts<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("|")
}

/// Join top-level fields.
pub fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n")
}
