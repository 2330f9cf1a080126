//! Tip callouts, quotes and step lists

use std::sync::Arc;

use super::variant;
use crate::core::block::{escape, or, BlockKind};
use crate::core::fields::{items, join_lines, line, rest, BlockFields};
use crate::core::markup::{text_of, Element};
use crate::core::BlockRecord;

/// Plain tip variants and their icons
const PLAIN_TIPS: &[(&str, &str)] = &[
    ("tip-info", "info-circle"),
    ("tip-success", "check-circle"),
    ("tip-warning", "exclamation-triangle"),
    ("tip-danger", "exclamation-circle"),
    ("tip-note", "sticky-note"),
    ("tip-question", "question-circle"),
    ("tip-star", "star"),
    ("tip-check", "check-square"),
];

pub const TIP_KINDS: &[&str] = &[
    "tip-info",
    "tip-success",
    "tip-warning",
    "tip-danger",
    "tip-note",
    "tip-question",
    "tip-star",
    "tip-check",
    "tip-quote",
    "tip-steps",
];

const DEFAULT_QUOTE_LABEL: &str = "Quote";
const CITE_PREFIX: &str = "— ";

/// Decode `title\nbody...`.
pub(crate) fn decode_titled(text: &str) -> BlockFields {
    BlockFields::Titled {
        title: line(text, 0),
        body: rest(text, 1),
    }
}

pub(crate) fn encode_titled(fields: &BlockFields) -> Option<String> {
    match fields {
        BlockFields::Titled { title, body } if body.is_empty() => Some(title.clone()),
        BlockFields::Titled { title, body } => Some(format!("{title}\n{body}")),
        _ => None,
    }
}

fn tip_open(name: &str, icon: &str) -> String {
    format!(
        "  <div class=\"ef-tip-block ef-{name}\">\n    <div class=\"ef-tip-icon\"><i class=\"fas fa-{icon}\"></i></div>\n    <div class=\"ef-tip-content\">\n"
    )
}

const TIP_CLOSE: &str = "    </div>\n  </div>\n";

/// `title\nbody...`
pub struct TipKind {
    name: &'static str,
    icon: &'static str,
}

impl BlockKind for TipKind {
    fn name(&self) -> &'static str {
        self.name
    }

    fn decode(&self, text: &str) -> BlockFields {
        decode_titled(text)
    }

    fn encode(&self, fields: &BlockFields) -> Option<String> {
        encode_titled(fields)
    }

    fn render(&self, record: &BlockRecord) -> String {
        let title = line(&record.text, 0);
        let body = rest(&record.text, 1);
        let mut html = tip_open(self.name, self.icon);
        html.push_str(&format!(
            "      <strong>{}</strong>\n      <p>{}</p>\n",
            escape(&title),
            escape(body.trim())
        ));
        html.push_str(TIP_CLOSE);
        html
    }

    fn import(&self, el: &Element) -> BlockRecord {
        let title = text_of(el.first_tag("strong"));
        let body = text_of(el.first_tag("p"));
        let text = encode_titled(&BlockFields::Titled { title, body }).unwrap_or_default();
        self.record(text)
    }
}

/// `label\nbody\nauthor`
pub struct QuoteKind;

impl BlockKind for QuoteKind {
    fn name(&self) -> &'static str {
        "tip-quote"
    }

    fn decode(&self, text: &str) -> BlockFields {
        BlockFields::Quote {
            label: line(text, 0),
            body: line(text, 1),
            author: line(text, 2),
        }
    }

    fn encode(&self, fields: &BlockFields) -> Option<String> {
        match fields {
            BlockFields::Quote { label, body, author } => Some(join_lines(&[label, body, author])),
            _ => None,
        }
    }

    fn render(&self, record: &BlockRecord) -> String {
        let label = line(&record.text, 0);
        let label = or(&label, DEFAULT_QUOTE_LABEL);
        let body = line(&record.text, 1);
        let author = line(&record.text, 2);

        let mut html = tip_open("tip-quote", "quote-left");
        if label != DEFAULT_QUOTE_LABEL {
            html.push_str(&format!("      <small>{}</small>\n", escape(label)));
        }
        html.push_str(&format!("      <blockquote>{}</blockquote>\n", escape(&body)));
        if !author.is_empty() {
            html.push_str(&format!("      <cite>{CITE_PREFIX}{}</cite>\n", escape(&author)));
        }
        html.push_str(TIP_CLOSE);
        html
    }

    fn import(&self, el: &Element) -> BlockRecord {
        let label = el
            .first_tag("small")
            .map(Element::text)
            .unwrap_or_else(|| DEFAULT_QUOTE_LABEL.to_string());
        let body = text_of(el.first_tag("blockquote"));
        let cite = text_of(el.first_tag("cite"));
        let author = cite.strip_prefix(CITE_PREFIX.trim_end()).unwrap_or(&cite).trim();
        self.record(join_lines(&[label.as_str(), body.as_str(), author]))
    }
}

/// `title\nstep\nstep...`
pub struct StepsKind;

impl BlockKind for StepsKind {
    fn name(&self) -> &'static str {
        "tip-steps"
    }

    fn decode(&self, text: &str) -> BlockFields {
        BlockFields::Steps {
            title: line(text, 0),
            steps: items(text, 1),
        }
    }

    fn encode(&self, fields: &BlockFields) -> Option<String> {
        match fields {
            BlockFields::Steps { title, steps } => {
                let mut lines = vec![title.clone()];
                lines.extend(steps.iter().cloned());
                Some(join_lines(&lines))
            }
            _ => None,
        }
    }

    fn render(&self, record: &BlockRecord) -> String {
        let title = line(&record.text, 0);
        let mut html = tip_open("tip-steps", "list-ol");
        html.push_str(&format!(
            "      <strong>{}</strong>\n      <ol class=\"ef-steps-list\">\n",
            escape(or(&title, "Quick Steps"))
        ));
        for step in items(&record.text, 1) {
            html.push_str(&format!("        <li>{}</li>\n", escape(&step)));
        }
        html.push_str("      </ol>\n");
        html.push_str(TIP_CLOSE);
        html
    }

    fn import(&self, el: &Element) -> BlockRecord {
        let mut lines = vec![text_of(el.first_tag("strong"))];
        if let Some(list) = el.first_tag("ol") {
            lines.extend(list.all_tag("li").iter().map(|li| li.text()));
        }
        self.record(join_lines(&lines))
    }
}

pub fn kinds() -> Vec<Arc<dyn BlockKind>> {
    let mut kinds: Vec<Arc<dyn BlockKind>> = PLAIN_TIPS
        .iter()
        .map(|&(name, icon)| Arc::new(TipKind { name, icon }) as Arc<dyn BlockKind>)
        .collect();
    kinds.push(Arc::new(QuoteKind));
    kinds.push(Arc::new(StepsKind));
    kinds
}

pub fn detect(el: &Element) -> Option<&'static str> {
    if el.is("div") && el.has_class("ef-tip-block") {
        variant(el, TIP_KINDS)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markup::Fragment;

    fn reimport(kind: &dyn BlockKind, record: &BlockRecord) -> BlockRecord {
        let fragment = Fragment::parse(&kind.render(record)).unwrap();
        let el = fragment.elements().next().unwrap();
        assert_eq!(detect(el), Some(kind.name()));
        kind.import(el)
    }

    #[test]
    fn test_tip_codec() {
        let kind = TipKind { name: "tip-info", icon: "info-circle" };
        let fields = kind.decode("Heads up\nFirst line\nSecond line");
        assert_eq!(
            fields,
            BlockFields::Titled {
                title: "Heads up".into(),
                body: "First line\nSecond line".into()
            }
        );
        assert_eq!(kind.encode(&fields).unwrap(), "Heads up\nFirst line\nSecond line");
        assert_eq!(kind.decode("Only title"), BlockFields::Titled {
            title: "Only title".into(),
            body: String::new()
        });
    }

    #[test]
    fn test_tip_detected_by_prefixed_class() {
        let kind = TipKind { name: "tip-warning", icon: "exclamation-triangle" };
        let record = kind.record("Careful\nHot surface".into());
        assert_eq!(reimport(&kind, &record), record);
    }

    #[test]
    fn test_quote_default_label_and_cite() {
        let record = QuoteKind.record("Quote\nStay hungry\nSteve".into());
        let html = QuoteKind.render(&record);
        assert!(!html.contains("<small>"));
        assert!(html.contains("<cite>— Steve</cite>"));
        assert_eq!(reimport(&QuoteKind, &record), record);

        let labelled = QuoteKind.record("Motto\nShip it\n".into());
        assert!(QuoteKind.render(&labelled).contains("<small>Motto</small>"));
        assert_eq!(reimport(&QuoteKind, &labelled), labelled);
    }

    #[test]
    fn test_steps_roundtrip() {
        let record = StepsKind.record("Setup\nInstall\nConfigure\nRun".into());
        assert_eq!(
            StepsKind.decode(&record.text),
            BlockFields::Steps {
                title: "Setup".into(),
                steps: vec!["Install".into(), "Configure".into(), "Run".into()]
            }
        );
        assert_eq!(reimport(&StepsKind, &record), record);
    }

    #[test]
    fn test_wrong_shape_not_encoded() {
        assert!(QuoteKind.encode(&BlockFields::Empty).is_none());
        assert!(StepsKind.encode(&BlockFields::Text { text: "x".into() }).is_none());
    }
}
