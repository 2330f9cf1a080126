//! Block kind trait
//!
//! Every block kind (a record's `type`, or its `tag` when untyped) is one entry
//! in the dispatch table held by the registry. A kind owns the whole codec for
//! its records: the text grammar, the markup it renders, and the inverse
//! structural import.

use std::borrow::Cow;

use super::fields::BlockFields;
use super::markup::Element;
use super::BlockRecord;

/// Codec, renderer and structural importer for one block kind
pub trait BlockKind: Send + Sync {
    /// Dispatch key, matched against [`BlockRecord::kind`]
    fn name(&self) -> &'static str;

    /// Structural tag of records of this kind
    fn tag(&self) -> &'static str {
        "div"
    }

    /// Value written to `type`; `None` for kinds identified by tag alone
    fn record_type(&self) -> Option<&'static str> {
        Some(self.name())
    }

    /// Default layout hint for new and imported records
    fn layout(&self) -> &'static str {
        "column"
    }

    /// Decode `text` into structured fields. Total: any input yields fields.
    fn decode(&self, text: &str) -> BlockFields;

    /// Encode fields back into `text`.
    ///
    /// Returns `None` when `fields` has a shape this kind does not use.
    fn encode(&self, fields: &BlockFields) -> Option<String>;

    /// Render a record of this kind to a markup fragment.
    fn render(&self, record: &BlockRecord) -> String;

    /// Rebuild a record from an element this kind recognised.
    fn import(&self, el: &Element) -> BlockRecord;

    /// Whether `el` is the rendered form of this kind
    fn matches(&self, el: &Element) -> bool {
        crate::categories::detect(el) == Some(self.name())
    }

    /// A new record of this kind carrying `text`
    fn record(&self, text: String) -> BlockRecord {
        let mut record = BlockRecord::new(self.tag())
            .with_text(text)
            .with_layout(self.layout());
        record.block_type = self.record_type().map(str::to_string);
        record
    }
}

/// Escape text for element content and quoted attribute values.
pub fn escape(text: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(text)
}

/// `value`, or `fallback` when `value` is empty.
pub fn or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
