//! Timelines: one `date|title|body` event per line

use std::sync::Arc;

use crate::core::block::{escape, BlockKind};
use crate::core::fields::{items, join_lines, join_parts, part, parts, BlockFields, TimelineEvent};
use crate::core::markup::{text_of, Element};
use crate::core::BlockRecord;

pub struct TimelineKind {
    name: &'static str,
    horizontal: bool,
}

impl BlockKind for TimelineKind {
    fn name(&self) -> &'static str {
        self.name
    }

    fn layout(&self) -> &'static str {
        if self.horizontal {
            "row"
        } else {
            "column"
        }
    }

    fn decode(&self, text: &str) -> BlockFields {
        let events = items(text, 0)
            .iter()
            .map(|l| {
                let p = parts(l);
                TimelineEvent {
                    date: part(&p, 0),
                    title: part(&p, 1),
                    body: part(&p, 2),
                }
            })
            .collect();
        BlockFields::Timeline { events }
    }

    fn encode(&self, fields: &BlockFields) -> Option<String> {
        match fields {
            BlockFields::Timeline { events } => {
                let lines: Vec<String> = events
                    .iter()
                    .map(|e| join_parts(&[&e.date, &e.title, &e.body]))
                    .collect();
                Some(join_lines(&lines))
            }
            _ => None,
        }
    }

    fn render(&self, record: &BlockRecord) -> String {
        let mut html = format!("  <div class=\"ef-timeline ef-{}\">\n", self.name);
        for (idx, l) in items(&record.text, 0).iter().enumerate() {
            let p = parts(l);
            let class = match (self.horizontal, idx % 2) {
                (true, _) => "ef-timeline-item",
                (false, 0) => "ef-timeline-item ef-timeline-left",
                (false, _) => "ef-timeline-item ef-timeline-right",
            };
            html.push_str(&format!(
                "    <div class=\"{}\">\n      <div class=\"ef-timeline-marker\"></div>\n      <div class=\"ef-timeline-content\">\n        <div class=\"ef-timeline-date\">{}</div>\n        <h4>{}</h4>\n        <p>{}</p>\n      </div>\n    </div>\n",
                class,
                escape(&part(&p, 0)),
                escape(&part(&p, 1)),
                escape(&part(&p, 2))
            ));
        }
        html.push_str("  </div>\n");
        html
    }

    fn import(&self, el: &Element) -> BlockRecord {
        let lines: Vec<String> = el
            .all_class("ef-timeline-item")
            .iter()
            .map(|item| {
                join_parts(&[
                    text_of(item.first_class("ef-timeline-date")),
                    text_of(item.first_tag("h4")),
                    text_of(item.first_tag("p")),
                ])
            })
            .collect();
        self.record(join_lines(&lines))
    }
}

pub fn kinds() -> Vec<Arc<dyn BlockKind>> {
    vec![
        Arc::new(TimelineKind { name: "timeline-vertical", horizontal: false }),
        Arc::new(TimelineKind { name: "timeline-horizontal", horizontal: true }),
    ]
}

/// Anything that is not horizontal is vertical.
pub fn detect(el: &Element) -> Option<&'static str> {
    if !(el.is("div") && el.has_class("ef-timeline")) {
        None
    } else if el.has_class("ef-timeline-horizontal") {
        Some("timeline-horizontal")
    } else {
        Some("timeline-vertical")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markup::Fragment;

    #[test]
    fn test_vertical_alternates_sides() {
        let kind = TimelineKind { name: "timeline-vertical", horizontal: false };
        let html = kind.render(&kind.record("2020|Start|Founded\n2022|Grow|Series A\n2024|Scale|Global".into()));
        assert_eq!(html.matches("ef-timeline-left").count(), 2);
        assert_eq!(html.matches("ef-timeline-right").count(), 1);
    }

    #[test]
    fn test_timeline_reimport() {
        for kind in [
            TimelineKind { name: "timeline-vertical", horizontal: false },
            TimelineKind { name: "timeline-horizontal", horizontal: true },
        ] {
            let record = kind.record("Q1|Plan|Scope it\nQ2|Build|Ship it".into());
            let fragment = Fragment::parse(&kind.render(&record)).unwrap();
            let el = fragment.elements().next().unwrap();
            assert_eq!(detect(el), Some(kind.name()));
            assert_eq!(kind.import(el), record);
        }
    }

    #[test]
    fn test_horizontal_layout_is_row() {
        let kind = TimelineKind { name: "timeline-horizontal", horizontal: true };
        assert_eq!(kind.record(String::new()).layout, "row");
    }
}
