//! General blocks: headings, paragraphs, lists and code

use std::sync::Arc;

use crate::core::block::{escape, BlockKind};
use crate::core::fields::{items, join_lines, BlockFields};
use crate::core::markup::Element;
use crate::core::BlockRecord;

/// `h2`, `h3` and `h4`, identified by tag
pub struct HeadingKind {
    level: &'static str,
}

impl BlockKind for HeadingKind {
    fn name(&self) -> &'static str {
        self.level
    }

    fn tag(&self) -> &'static str {
        self.level
    }

    fn record_type(&self) -> Option<&'static str> {
        None
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
        format!("  <{0}>{1}</{0}>\n", self.level, escape(&record.text))
    }

    fn import(&self, el: &Element) -> BlockRecord {
        self.record(el.text())
    }
}

/// Paragraphs; the `class` hint survives because `p-large` relies on it
pub struct ParagraphKind;

impl BlockKind for ParagraphKind {
    fn name(&self) -> &'static str {
        "p"
    }

    fn tag(&self) -> &'static str {
        "p"
    }

    fn record_type(&self) -> Option<&'static str> {
        None
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
        let class = if record.class.is_empty() {
            String::new()
        } else {
            format!(" class=\"{}\"", escape(&record.class))
        };
        format!("  <p{}>{}</p>\n", class, escape(&record.text))
    }

    fn import(&self, el: &Element) -> BlockRecord {
        let mut record = self.record(el.text());
        record.class = el.attr("class").unwrap_or("").to_string();
        record
    }
}

/// `ol` and `ul`, one item per line
pub struct ListKind {
    tag: &'static str,
}

impl BlockKind for ListKind {
    fn name(&self) -> &'static str {
        self.tag
    }

    fn tag(&self) -> &'static str {
        self.tag
    }

    fn record_type(&self) -> Option<&'static str> {
        None
    }

    fn decode(&self, text: &str) -> BlockFields {
        BlockFields::List { items: items(text, 0) }
    }

    fn encode(&self, fields: &BlockFields) -> Option<String> {
        match fields {
            BlockFields::List { items } => Some(join_lines(items)),
            _ => None,
        }
    }

    fn render(&self, record: &BlockRecord) -> String {
        let mut html = format!("  <{}>\n", self.tag);
        for item in items(&record.text, 0) {
            html.push_str(&format!("    <li>{}</li>\n", escape(&item)));
        }
        html.push_str(&format!("  </{}>\n", self.tag));
        html
    }

    fn import(&self, el: &Element) -> BlockRecord {
        let lines: Vec<String> = el.all_tag("li").iter().map(|li| li.text()).collect();
        self.record(join_lines(&lines))
    }
}

/// Preformatted code; the text is kept verbatim, including surrounding whitespace
pub struct CodeBlockKind;

impl BlockKind for CodeBlockKind {
    fn name(&self) -> &'static str {
        "code-block"
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
            "  <pre class=\"ef-code-block\"><code>{}</code></pre>\n",
            escape(&record.text)
        )
    }

    fn import(&self, el: &Element) -> BlockRecord {
        let text = match el.first_tag("code") {
            Some(code) => code.text_content(),
            None => el.text_content(),
        };
        self.record(text)
    }
}

pub fn kinds() -> Vec<Arc<dyn BlockKind>> {
    vec![
        Arc::new(HeadingKind { level: "h2" }),
        Arc::new(HeadingKind { level: "h3" }),
        Arc::new(HeadingKind { level: "h4" }),
        Arc::new(ParagraphKind),
        Arc::new(ListKind { tag: "ol" }),
        Arc::new(ListKind { tag: "ul" }),
        Arc::new(CodeBlockKind),
    ]
}

pub fn detect(el: &Element) -> Option<&'static str> {
    match el.name.as_str() {
        "h2" => Some("h2"),
        "h3" => Some("h3"),
        "h4" => Some("h4"),
        "p" => Some("p"),
        "ol" => Some("ol"),
        "ul" => Some("ul"),
        "pre" if el.has_class("ef-code-block") => Some("code-block"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markup::Fragment;

    fn reimport(kind: &dyn BlockKind, record: &BlockRecord) -> BlockRecord {
        let fragment = Fragment::parse(&kind.render(record)).unwrap();
        let imported = kind.import(fragment.elements().next().unwrap());
        imported
    }

    #[test]
    fn test_heading_escapes_text() {
        let kind = HeadingKind { level: "h2" };
        let html = kind.render(&kind.record("Fish & <Chips>".into()));
        assert_eq!(html, "  <h2>Fish &amp; &lt;Chips&gt;</h2>\n");
    }

    #[test]
    fn test_paragraph_keeps_class() {
        let record = ParagraphKind.record("Lead".into()).with_class("text-xl");
        let html = ParagraphKind.render(&record);
        assert!(html.contains(r#"<p class="text-xl">"#));
        assert_eq!(reimport(&ParagraphKind, &record), record);
    }

    #[test]
    fn test_list_drops_blank_items() {
        let kind = ListKind { tag: "ul" };
        let record = kind.record("one\n\ntwo\n".into());
        let html = kind.render(&record);
        assert_eq!(html.matches("<li>").count(), 2);
        assert_eq!(reimport(&kind, &record).text, "one\ntwo");
    }

    #[test]
    fn test_heading_text_is_trimmed_on_import() {
        let kind = HeadingKind { level: "h2" };
        let back = reimport(&kind, &kind.record("  padded ".into()));
        assert_eq!(back.text, "padded");
    }

    #[test]
    fn test_code_block_verbatim() {
        let record = CodeBlockKind.record("  fn main() {\n    <T>\n  }\n".into());
        let back = reimport(&CodeBlockKind, &record);
        assert_eq!(back, record);
        assert_eq!(back.block_type.as_deref(), Some("code-block"));
        assert_eq!(back.tag, "div");
    }
}
