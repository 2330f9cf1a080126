//! Divider blocks

use std::sync::Arc;

use super::variant;
use crate::core::block::{escape, or, BlockKind};
use crate::core::fields::BlockFields;
use crate::core::markup::Element;
use crate::core::BlockRecord;

const LINE_DIVIDERS: &[&str] = &[
    "divider-line",
    "divider-dashed",
    "divider-dotted",
    "divider-gradient",
];

/// Plain rule variants; they carry no data
pub struct LineDividerKind {
    name: &'static str,
}

impl BlockKind for LineDividerKind {
    fn name(&self) -> &'static str {
        self.name
    }

    fn decode(&self, _text: &str) -> BlockFields {
        BlockFields::Empty
    }

    fn encode(&self, fields: &BlockFields) -> Option<String> {
        match fields {
            BlockFields::Empty => Some(String::new()),
            _ => None,
        }
    }

    fn render(&self, _record: &BlockRecord) -> String {
        format!("  <div class=\"ef-divider ef-{}\"></div>\n", self.name)
    }

    fn import(&self, _el: &Element) -> BlockRecord {
        self.record(String::new())
    }
}

/// Divider with an inline ornament such as `* * *`
pub struct TextDividerKind;

impl BlockKind for TextDividerKind {
    fn name(&self) -> &'static str {
        "divider-text"
    }

    fn decode(&self, text: &str) -> BlockFields {
        BlockFields::Text { text: text.to_string() }
    }

    fn encode(&self, fields: &BlockFields) -> Option<String> {
        match fields {
            BlockFields::Text { text } => Some(text.clone()),
            _ => None,
        }
    }

    fn render(&self, record: &BlockRecord) -> String {
        format!(
            "  <div class=\"ef-divider ef-divider-text\">{}</div>\n",
            escape(or(&record.text, "* * *"))
        )
    }

    fn import(&self, el: &Element) -> BlockRecord {
        self.record(el.text())
    }
}

pub fn kinds() -> Vec<Arc<dyn BlockKind>> {
    let mut kinds: Vec<Arc<dyn BlockKind>> = LINE_DIVIDERS
        .iter()
        .map(|name| Arc::new(LineDividerKind { name: *name }) as Arc<dyn BlockKind>)
        .collect();
    kinds.push(Arc::new(TextDividerKind));
    kinds
}

pub fn detect(el: &Element) -> Option<&'static str> {
    if !el.has_class("ef-divider") {
        return None;
    }
    variant(el, LINE_DIVIDERS).or_else(|| variant(el, &["divider-text"]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markup::Fragment;

    #[test]
    fn test_detect_divider_variants() {
        for &name in LINE_DIVIDERS {
            let kind = LineDividerKind { name };
            let html = kind.render(&kind.record(String::new()));
            let fragment = Fragment::parse(&html).unwrap();
            assert_eq!(detect(fragment.elements().next().unwrap()), Some(name));
        }
    }

    #[test]
    fn test_text_divider_default_ornament() {
        let html = TextDividerKind.render(&TextDividerKind.record(String::new()));
        assert!(html.contains("* * *"));
    }

    #[test]
    fn test_unknown_divider_not_detected() {
        let fragment = Fragment::parse(r#"<div class="ef-divider ef-divider-wavy"></div>"#).unwrap();
        assert_eq!(detect(fragment.elements().next().unwrap()), None);
    }
}
