//! Accordions: one `question|answer` item per line

use std::sync::Arc;

use crate::core::block::{escape, BlockKind};
use crate::core::fields::{items, join_lines, join_parts, part, parts, AccordionItem, BlockFields};
use crate::core::markup::{text_of, Element};
use crate::core::BlockRecord;

pub struct AccordionKind {
    name: &'static str,
    icon: &'static str,
}

impl BlockKind for AccordionKind {
    fn name(&self) -> &'static str {
        self.name
    }

    fn decode(&self, text: &str) -> BlockFields {
        let items = items(text, 0)
            .iter()
            .map(|l| {
                let p = parts(l);
                AccordionItem {
                    question: part(&p, 0),
                    answer: part(&p, 1),
                }
            })
            .collect();
        BlockFields::Accordion { items }
    }

    fn encode(&self, fields: &BlockFields) -> Option<String> {
        match fields {
            BlockFields::Accordion { items } => {
                let lines: Vec<String> = items
                    .iter()
                    .map(|item| join_parts(&[&item.question, &item.answer]))
                    .collect();
                Some(join_lines(&lines))
            }
            _ => None,
        }
    }

    fn render(&self, record: &BlockRecord) -> String {
        let mut html = format!("  <div class=\"ef-accordion ef-{}\">\n", self.name);
        for l in items(&record.text, 0) {
            let p = parts(&l);
            html.push_str(&format!(
                "    <div class=\"ef-accordion-item\">\n      <div class=\"ef-accordion-header\" onclick=\"this.parentElement.classList.toggle('ef-accordion-open')\">\n        <i class=\"fas fa-{} ef-accordion-icon\"></i>\n        <span>{}</span>\n        <i class=\"fas fa-chevron-down ef-accordion-arrow\"></i>\n      </div>\n      <div class=\"ef-accordion-content\">\n        <p>{}</p>\n      </div>\n    </div>\n",
                self.icon,
                escape(&part(&p, 0)),
                escape(&part(&p, 1))
            ));
        }
        html.push_str("  </div>\n");
        html
    }

    fn import(&self, el: &Element) -> BlockRecord {
        let lines: Vec<String> = el
            .all_class("ef-accordion-item")
            .iter()
            .map(|item| {
                let question = item
                    .first_class("ef-accordion-header")
                    .and_then(|header| header.first_tag("span"));
                let answer = item
                    .first_class("ef-accordion-content")
                    .and_then(|content| content.first_tag("p"));
                join_parts(&[text_of(question), text_of(answer)])
            })
            .collect();
        self.record(join_lines(&lines))
    }
}

pub fn kinds() -> Vec<Arc<dyn BlockKind>> {
    vec![
        Arc::new(AccordionKind { name: "accordion-faq", icon: "question-circle" }),
        Arc::new(AccordionKind { name: "accordion-simple", icon: "chevron-right" }),
    ]
}

/// Anything that is not an FAQ accordion is a simple one.
pub fn detect(el: &Element) -> Option<&'static str> {
    if !(el.is("div") && el.has_class("ef-accordion")) {
        None
    } else if el.has_class("ef-accordion-faq") {
        Some("accordion-faq")
    } else {
        Some("accordion-simple")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markup::Fragment;

    #[test]
    fn test_accordion_reimport() {
        let kind = AccordionKind { name: "accordion-faq", icon: "question-circle" };
        let record = kind.record("Is it free?|Yes, forever\nCan I cancel?|Any time".into());
        let fragment = Fragment::parse(&kind.render(&record)).unwrap();
        let el = fragment.elements().next().unwrap();
        assert_eq!(detect(el), Some("accordion-faq"));
        assert_eq!(kind.import(el), record);
    }

    #[test]
    fn test_missing_answer_decodes_empty() {
        let kind = AccordionKind { name: "accordion-simple", icon: "chevron-right" };
        assert_eq!(
            kind.decode("Question only"),
            BlockFields::Accordion {
                items: vec![AccordionItem {
                    question: "Question only".into(),
                    answer: String::new()
                }]
            }
        );
    }
}
