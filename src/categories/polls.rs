//! Polls: `question|value|label|value|label...` on a single line

use std::sync::Arc;

use super::variant;
use crate::core::block::{escape, BlockKind};
use crate::core::fields::{part, parts, BlockFields, PollOption};
use crate::core::markup::{text_of, Element};
use crate::core::BlockRecord;
use crate::license::signature::rolling_hash;

pub const POLL_KINDS: &[&str] = &["poll-vote", "poll-emoji", "poll-rating"];

const OPTION_ONCLICK: &str = "this.parentElement.querySelectorAll('.ef-poll-option').forEach(o => o.classList.remove('ef-poll-selected')); this.classList.add('ef-poll-selected');";

pub struct PollKind {
    name: &'static str,
}

impl PollKind {
    fn options(text: &str) -> (String, Vec<PollOption>) {
        let p = parts(text);
        let question = part(&p, 0);
        let options = p
            .get(1..)
            .unwrap_or_default()
            .chunks(2)
            .map(|pair| PollOption {
                value: part(pair, 0),
                label: part(pair, 1),
            })
            .filter(|option| !(option.value.is_empty() && option.label.is_empty()))
            .collect();
        (question, options)
    }
}

impl BlockKind for PollKind {
    fn name(&self) -> &'static str {
        self.name
    }

    fn decode(&self, text: &str) -> BlockFields {
        let (question, options) = Self::options(text);
        BlockFields::Poll { question, options }
    }

    fn encode(&self, fields: &BlockFields) -> Option<String> {
        match fields {
            BlockFields::Poll { question, options } => {
                let mut text = question.clone();
                for option in options {
                    text.push('|');
                    text.push_str(&option.value);
                    text.push('|');
                    text.push_str(&option.label);
                }
                Some(text)
            }
            _ => None,
        }
    }

    fn render(&self, record: &BlockRecord) -> String {
        let (question, options) = Self::options(&record.text);
        // Stable across exports so identical content renders identically.
        let id = format!("poll-{:08x}", rolling_hash(&record.text));

        let mut html = format!(
            "  <div class=\"ef-poll ef-{}\" id=\"{}\">\n    <div class=\"ef-poll-question\">{}</div>\n    <div class=\"ef-poll-options\">\n",
            self.name,
            id,
            escape(&question)
        );
        for option in options {
            html.push_str(&format!(
                "      <div class=\"ef-poll-option\" onclick=\"{}\">\n        <div class=\"ef-poll-option-value\">{}</div>\n        <div class=\"ef-poll-option-label\">{}</div>\n      </div>\n",
                OPTION_ONCLICK,
                escape(&option.value),
                escape(&option.label)
            ));
        }
        html.push_str("    </div>\n  </div>\n");
        html
    }

    fn import(&self, el: &Element) -> BlockRecord {
        let options = el
            .all_class("ef-poll-option")
            .iter()
            .map(|option| PollOption {
                value: text_of(option.first_class("ef-poll-option-value")),
                label: text_of(option.first_class("ef-poll-option-label")),
            })
            .collect();
        let fields = BlockFields::Poll {
            question: text_of(el.first_class("ef-poll-question")),
            options,
        };
        self.record(self.encode(&fields).unwrap_or_default())
    }
}

pub fn kinds() -> Vec<Arc<dyn BlockKind>> {
    POLL_KINDS
        .iter()
        .map(|&name| Arc::new(PollKind { name }) as Arc<dyn BlockKind>)
        .collect()
}

/// A bare `ef-poll` is a vote poll.
pub fn detect(el: &Element) -> Option<&'static str> {
    if el.is("div") && el.has_class("ef-poll") {
        variant(el, POLL_KINDS).or(Some("poll-vote"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markup::Fragment;

    #[test]
    fn test_poll_codec() {
        let kind = PollKind { name: "poll-emoji" };
        let fields = kind.decode("How was it?|😀|Great|😐|Okay");
        let BlockFields::Poll { question, options } = &fields else {
            panic!("wrong shape");
        };
        assert_eq!(question, "How was it?");
        assert_eq!(options.len(), 2);
        assert_eq!(options[1].label, "Okay");
        assert_eq!(kind.encode(&fields).unwrap(), "How was it?|😀|Great|😐|Okay");
    }

    #[test]
    fn test_question_only_has_no_trailing_bar() {
        let kind = PollKind { name: "poll-vote" };
        let fields = kind.decode("Ready?");
        assert_eq!(kind.encode(&fields).unwrap(), "Ready?");
    }

    #[test]
    fn test_dangling_value_decodes_empty_label() {
        let kind = PollKind { name: "poll-rating" };
        let BlockFields::Poll { options, .. } = kind.decode("Rate|5") else {
            panic!("wrong shape");
        };
        assert_eq!(options, vec![PollOption { value: "5".into(), label: String::new() }]);
    }

    #[test]
    fn test_poll_reimport_and_stable_id() {
        let kind = PollKind { name: "poll-rating" };
        let record = kind.record("Rate us|1|Bad|5|Great".into());
        let html = kind.render(&record);
        assert_eq!(html, kind.render(&record));

        let fragment = Fragment::parse(&html).unwrap();
        let el = fragment.elements().next().unwrap();
        assert_eq!(detect(el), Some("poll-rating"));
        assert_eq!(kind.import(el), record);
    }
}
