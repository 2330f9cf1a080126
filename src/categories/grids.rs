//! Card grids

use std::sync::Arc;

use super::cards::DEFAULT_ICON;
use crate::core::block::{escape, or, BlockKind};
use crate::core::fields::{items, join_lines, join_parts, part, parts, BlockFields, GridCard, MasonryCard};
use crate::core::markup::{text_of, Element};
use crate::core::BlockRecord;

const MASONRY_SIZES: &[&str] = &["short", "medium", "long"];

fn card_icon(card: &Element) -> String {
    card.first_class("ef-card-icon")
        .and_then(|wrap| wrap.first_tag("i"))
        .and_then(|i| i.attr("class"))
        .unwrap_or(DEFAULT_ICON)
        .to_string()
}

fn grid_card_html(class: &str, icon: &str, title: &str, body: &str) -> String {
    format!(
        "    <div class=\"{}\">\n      <div class=\"ef-card-icon\"><i class=\"{}\"></i></div>\n      <h4>{}</h4>\n      <p>{}</p>\n    </div>\n",
        class,
        escape(or(icon, DEFAULT_ICON)),
        escape(title),
        escape(body)
    )
}

/// One `title|icon|body` per line
pub struct GridKind {
    name: &'static str,
}

impl BlockKind for GridKind {
    fn name(&self) -> &'static str {
        self.name
    }

    fn layout(&self) -> &'static str {
        "row"
    }

    fn decode(&self, text: &str) -> BlockFields {
        let cards = items(text, 0)
            .iter()
            .map(|l| {
                let p = parts(l);
                GridCard {
                    title: part(&p, 0),
                    icon: part(&p, 1),
                    body: part(&p, 2),
                }
            })
            .collect();
        BlockFields::CardGrid { cards }
    }

    fn encode(&self, fields: &BlockFields) -> Option<String> {
        match fields {
            BlockFields::CardGrid { cards } => {
                let lines: Vec<String> = cards
                    .iter()
                    .map(|c| join_parts(&[&c.title, &c.icon, &c.body]))
                    .collect();
                Some(join_lines(&lines))
            }
            _ => None,
        }
    }

    fn render(&self, record: &BlockRecord) -> String {
        let mut html = format!("  <div class=\"ef-card-grid ef-{}\">\n", self.name);
        for l in items(&record.text, 0) {
            let p = parts(&l);
            html.push_str(&grid_card_html("ef-card", &part(&p, 1), &part(&p, 0), &part(&p, 2)));
        }
        html.push_str("  </div>\n");
        html
    }

    fn import(&self, el: &Element) -> BlockRecord {
        let lines: Vec<String> = el
            .all_class("ef-card")
            .iter()
            .map(|card| {
                let title = text_of(card.first_tag("h4"));
                let body = text_of(card.first_tag("p"));
                join_parts(&[title, card_icon(card), body])
            })
            .collect();
        self.record(join_lines(&lines))
    }
}

/// One `title|icon|size|body` per line
pub struct MasonryKind;

impl BlockKind for MasonryKind {
    fn name(&self) -> &'static str {
        "card-grid-masonry"
    }

    fn layout(&self) -> &'static str {
        "row"
    }

    fn decode(&self, text: &str) -> BlockFields {
        let cards = items(text, 0)
            .iter()
            .map(|l| {
                let p = parts(l);
                MasonryCard {
                    title: part(&p, 0),
                    icon: part(&p, 1),
                    size: part(&p, 2),
                    body: part(&p, 3),
                }
            })
            .collect();
        BlockFields::Masonry { cards }
    }

    fn encode(&self, fields: &BlockFields) -> Option<String> {
        match fields {
            BlockFields::Masonry { cards } => {
                let lines: Vec<String> = cards
                    .iter()
                    .map(|c| join_parts(&[&c.title, &c.icon, &c.size, &c.body]))
                    .collect();
                Some(join_lines(&lines))
            }
            _ => None,
        }
    }

    fn render(&self, record: &BlockRecord) -> String {
        let mut html = String::from("  <div class=\"ef-card-grid ef-card-grid-masonry\">\n");
        for l in items(&record.text, 0) {
            let p = parts(&l);
            let size = part(&p, 2);
            let class = format!("ef-card ef-card-{}", escape(or(&size, "medium")));
            html.push_str(&grid_card_html(&class, &part(&p, 1), &part(&p, 0), &part(&p, 3)));
        }
        html.push_str("  </div>\n");
        html
    }

    fn import(&self, el: &Element) -> BlockRecord {
        let lines: Vec<String> = el
            .all_class("ef-card")
            .iter()
            .map(|card| {
                let size = MASONRY_SIZES
                    .iter()
                    .copied()
                    .find(|size| card.has_class(&format!("ef-card-{size}")))
                    .unwrap_or("medium");
                let title = text_of(card.first_tag("h4"));
                let body = text_of(card.first_tag("p"));
                join_parts(&[title, card_icon(card), size.to_string(), body])
            })
            .collect();
        self.record(join_lines(&lines))
    }
}

pub fn kinds() -> Vec<Arc<dyn BlockKind>> {
    vec![
        Arc::new(GridKind { name: "card-grid-2col" }),
        Arc::new(GridKind { name: "card-grid-3col" }),
        Arc::new(MasonryKind),
    ]
}

pub fn detect(el: &Element) -> Option<&'static str> {
    if el.is("div") && el.has_class("ef-card-grid") {
        super::variant(el, &["card-grid-2col", "card-grid-3col", "card-grid-masonry"])
    } else {
        None
    }
}
