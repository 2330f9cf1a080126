//! Single cards

use std::sync::Arc;

use super::tips::{decode_titled, encode_titled};
use super::variant;
use crate::core::block::{escape, or, BlockKind};
use crate::core::fields::{join_lines, join_parts, line, part, parts, rest, BlockFields};
use crate::core::markup::{text_of, Element};
use crate::core::BlockRecord;

const SIMPLE_CARDS: &[&str] = &["card-basic", "card-hover", "card-bordered", "card-gradient"];

pub const CARD_KINDS: &[&str] = &[
    "card-basic",
    "card-hover",
    "card-bordered",
    "card-gradient",
    "card-image",
    "card-icon-top",
    "card-stat",
];

pub const DEFAULT_ICON: &str = "fas fa-star";

/// `title\nbody...`
pub struct SimpleCardKind {
    name: &'static str,
}

impl BlockKind for SimpleCardKind {
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
        format!(
            "  <div class=\"ef-card ef-{}\">\n    <h4>{}</h4>\n    <p>{}</p>\n  </div>\n",
            self.name,
            escape(&line(&record.text, 0)),
            escape(rest(&record.text, 1).trim())
        )
    }

    fn import(&self, el: &Element) -> BlockRecord {
        let title = text_of(el.first_tag("h4"));
        let body = text_of(el.first_tag("p"));
        self.record(encode_titled(&BlockFields::Titled { title, body }).unwrap_or_default())
    }
}

/// `title\nbody\nimageUrl`
pub struct ImageCardKind;

impl BlockKind for ImageCardKind {
    fn name(&self) -> &'static str {
        "card-image"
    }

    fn decode(&self, text: &str) -> BlockFields {
        BlockFields::ImageCard {
            title: line(text, 0),
            body: line(text, 1),
            image_url: line(text, 2),
        }
    }

    fn encode(&self, fields: &BlockFields) -> Option<String> {
        match fields {
            BlockFields::ImageCard { title, body, image_url } => {
                Some(join_lines(&[title, body, image_url]))
            }
            _ => None,
        }
    }

    fn render(&self, record: &BlockRecord) -> String {
        let title = line(&record.text, 0);
        format!(
            "  <div class=\"ef-card ef-card-image\">\n    <img src=\"{}\" alt=\"{}\" class=\"ef-card-img\">\n    <div class=\"ef-card-body\">\n      <h4>{}</h4>\n      <p>{}</p>\n    </div>\n  </div>\n",
            escape(&line(&record.text, 2)),
            escape(&title),
            escape(&title),
            escape(&line(&record.text, 1))
        )
    }

    fn import(&self, el: &Element) -> BlockRecord {
        let title = text_of(el.first_tag("h4"));
        let body = text_of(el.first_tag("p"));
        let image_url = el.first_tag("img").and_then(|img| img.attr("src")).unwrap_or("");
        self.record(join_lines(&[title.as_str(), body.as_str(), image_url]))
    }
}

/// `icon\ntitle\nbody`
pub struct IconCardKind;

impl BlockKind for IconCardKind {
    fn name(&self) -> &'static str {
        "card-icon-top"
    }

    fn decode(&self, text: &str) -> BlockFields {
        BlockFields::IconCard {
            icon: line(text, 0),
            title: line(text, 1),
            body: line(text, 2),
        }
    }

    fn encode(&self, fields: &BlockFields) -> Option<String> {
        match fields {
            BlockFields::IconCard { icon, title, body } => Some(join_lines(&[icon, title, body])),
            _ => None,
        }
    }

    fn render(&self, record: &BlockRecord) -> String {
        let icon = line(&record.text, 0);
        format!(
            "  <div class=\"ef-card ef-card-icon-top\">\n    <div class=\"ef-card-icon-large\"><i class=\"{}\"></i></div>\n    <h4>{}</h4>\n    <p>{}</p>\n  </div>\n",
            escape(or(&icon, DEFAULT_ICON)),
            escape(&line(&record.text, 1)),
            escape(&line(&record.text, 2))
        )
    }

    fn import(&self, el: &Element) -> BlockRecord {
        let icon = el
            .first_class("ef-card-icon-large")
            .and_then(|wrap| wrap.first_tag("i"))
            .and_then(|i| i.attr("class"))
            .unwrap_or(DEFAULT_ICON);
        let title = text_of(el.first_tag("h4"));
        let body = text_of(el.first_tag("p"));
        self.record(join_lines(&[icon, title.as_str(), body.as_str()]))
    }
}

/// `number|label\ndescription...`
pub struct StatCardKind;

impl BlockKind for StatCardKind {
    fn name(&self) -> &'static str {
        "card-stat"
    }

    fn decode(&self, text: &str) -> BlockFields {
        let head = line(text, 0);
        let p = parts(&head);
        BlockFields::Stat {
            number: part(&p, 0),
            label: part(&p, 1),
            description: rest(text, 1),
        }
    }

    fn encode(&self, fields: &BlockFields) -> Option<String> {
        match fields {
            BlockFields::Stat { number, label, description } => {
                let head = join_parts(&[number, label]);
                if description.is_empty() {
                    Some(head)
                } else {
                    Some(format!("{head}\n{description}"))
                }
            }
            _ => None,
        }
    }

    fn render(&self, record: &BlockRecord) -> String {
        let head = line(&record.text, 0);
        let p = parts(&head);
        let number = part(&p, 0);
        let description = rest(&record.text, 1);
        let description = description.trim();

        let mut html = format!(
            "  <div class=\"ef-card ef-card-stat\">\n    <div class=\"ef-stat-number\">{}</div>\n    <div class=\"ef-stat-label\">{}</div>\n",
            escape(or(&number, "0")),
            escape(&part(&p, 1))
        );
        if !description.is_empty() {
            html.push_str(&format!(
                "    <p class=\"ef-stat-desc\">{}</p>\n",
                escape(description)
            ));
        }
        html.push_str("  </div>\n");
        html
    }

    fn import(&self, el: &Element) -> BlockRecord {
        let fields = BlockFields::Stat {
            number: text_of(el.first_class("ef-stat-number")),
            label: text_of(el.first_class("ef-stat-label")),
            description: text_of(el.first_class("ef-stat-desc")),
        };
        self.record(self.encode(&fields).unwrap_or_default())
    }
}

pub fn kinds() -> Vec<Arc<dyn BlockKind>> {
    let mut kinds: Vec<Arc<dyn BlockKind>> = SIMPLE_CARDS
        .iter()
        .map(|&name| Arc::new(SimpleCardKind { name }) as Arc<dyn BlockKind>)
        .collect();
    kinds.push(Arc::new(ImageCardKind));
    kinds.push(Arc::new(IconCardKind));
    kinds.push(Arc::new(StatCardKind));
    kinds
}

/// A bare `ef-card` is a basic card.
pub fn detect(el: &Element) -> Option<&'static str> {
    if el.is("div") && el.has_class("ef-card") {
        variant(el, CARD_KINDS).or(Some("card-basic"))
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
    fn test_stat_codec() {
        let fields = StatCardKind.decode("98%|Uptime\nMeasured monthly");
        assert_eq!(
            fields,
            BlockFields::Stat {
                number: "98%".into(),
                label: "Uptime".into(),
                description: "Measured monthly".into()
            }
        );
        assert_eq!(StatCardKind.encode(&fields).unwrap(), "98%|Uptime\nMeasured monthly");
    }

    #[test]
    fn test_cards_reimport() {
        let records: [(&dyn BlockKind, &str); 4] = [
            (&SimpleCardKind { name: "card-gradient" }, "Fast\nBuilt for speed"),
            (&ImageCardKind, "Trip\nAlong the coast\nhttps://img.example/c.jpg"),
            (&IconCardKind, "fas fa-rocket\nLaunch\nGo live today"),
            (&StatCardKind, "12k|Users\nAnd counting"),
        ];
        for (kind, text) in records {
            let record = kind.record(text.to_string());
            assert_eq!(reimport(kind, &record), record, "{}", kind.name());
        }
    }

    #[test]
    fn test_plain_card_falls_back_to_basic() {
        let fragment = Fragment::parse(r#"<div class="ef-card"><h4>T</h4><p>B</p></div>"#).unwrap();
        assert_eq!(detect(fragment.elements().next().unwrap()), Some("card-basic"));
    }

    #[test]
    fn test_icon_defaults() {
        let html = IconCardKind.render(&IconCardKind.record("\nTitle\nBody".into()));
        assert!(html.contains(DEFAULT_ICON));
    }
}
