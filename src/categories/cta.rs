//! Call-to-action blocks

use std::sync::Arc;

use super::variant;
use crate::core::block::{escape, or, BlockKind};
use crate::core::fields::{items, join_lines, join_parts, line, part, parts, BlockFields, CtaButton};
use crate::core::markup::{text_of, Element};
use crate::core::BlockRecord;

pub const CTA_KINDS: &[&str] = &[
    "cta-center",
    "cta-split",
    "cta-urgent",
    "cta-minimal",
    "cta-newsletter",
];

const DEFAULT_PLACEHOLDER: &str = "your@email.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Center,
    Split,
    Urgent,
    Minimal,
}

fn button(l: &str) -> CtaButton {
    let p = parts(l);
    CtaButton {
        label: part(&p, 0),
        href: part(&p, 1),
    }
}

fn button_line(b: &CtaButton) -> String {
    join_parts(&[&b.label, &b.href])
}

fn anchor(b: &CtaButton, primary: bool) -> String {
    let class = if primary { "ef-cta-btn ef-cta-btn-primary" } else { "ef-cta-btn" };
    format!(
        "<a href=\"{}\" class=\"{}\">{}</a>",
        escape(or(&b.href, "#")),
        class,
        escape(&b.label)
    )
}

/// Buttons found in a rendered CTA, in document order
fn imported_buttons(el: &Element) -> Vec<CtaButton> {
    el.all_class("ef-cta-btn")
        .iter()
        .filter(|btn| btn.is("a"))
        .map(|btn| CtaButton {
            label: btn.text(),
            href: btn.attr("href").unwrap_or("").to_string(),
        })
        .collect()
}

/// `title\ndescription\nlabel|href...`
pub struct CtaKind {
    name: &'static str,
    layout: Layout,
}

impl BlockKind for CtaKind {
    fn name(&self) -> &'static str {
        self.name
    }

    fn decode(&self, text: &str) -> BlockFields {
        BlockFields::Cta {
            title: line(text, 0),
            description: line(text, 1),
            buttons: items(text, 2).iter().map(|l| button(l)).collect(),
        }
    }

    fn encode(&self, fields: &BlockFields) -> Option<String> {
        match fields {
            BlockFields::Cta { title, description, buttons } => {
                let mut lines = vec![title.clone(), description.clone()];
                lines.extend(buttons.iter().map(button_line));
                Some(join_lines(&lines))
            }
            _ => None,
        }
    }

    fn render(&self, record: &BlockRecord) -> String {
        let BlockFields::Cta { title, description, buttons } = self.decode(&record.text) else {
            return String::new();
        };
        let heading = format!(
            "<h3>{}</h3>\n    <p>{}</p>",
            escape(&title),
            escape(&description)
        );

        let mut html = format!("  <div class=\"ef-cta-block ef-{}\">\n", self.name);
        match self.layout {
            Layout::Minimal => {
                html.push_str(&format!("    {heading}\n"));
                if let Some(first) = buttons.first() {
                    html.push_str(&format!("    {}\n", anchor(first, true)));
                }
                html.push_str("  </div>\n");
                return html;
            }
            Layout::Split => {
                html.push_str(&format!(
                    "    <div class=\"ef-cta-content\">\n      <h3>{}</h3>\n      <p>{}</p>\n    </div>\n",
                    escape(&title),
                    escape(&description)
                ));
            }
            Layout::Urgent => {
                html.push_str("    <div class=\"ef-cta-badge\">Limited Time</div>\n");
                html.push_str(&format!("    {heading}\n"));
            }
            Layout::Center => html.push_str(&format!("    {heading}\n")),
        }

        html.push_str("    <div class=\"ef-cta-buttons\">\n");
        for (idx, b) in buttons.iter().enumerate() {
            html.push_str(&format!("      {}\n", anchor(b, idx == 0)));
        }
        html.push_str("    </div>\n  </div>\n");
        html
    }

    fn import(&self, el: &Element) -> BlockRecord {
        let mut buttons = imported_buttons(el);
        if self.layout == Layout::Minimal {
            buttons.truncate(1);
        }
        let fields = BlockFields::Cta {
            title: text_of(el.first_tag("h3")),
            description: text_of(el.first_tag("p")),
            buttons,
        };
        self.record(self.encode(&fields).unwrap_or_default())
    }
}

/// `title\ndescription\nplaceholder\nlabel|action`
pub struct NewsletterKind;

impl BlockKind for NewsletterKind {
    fn name(&self) -> &'static str {
        "cta-newsletter"
    }

    fn decode(&self, text: &str) -> BlockFields {
        BlockFields::Newsletter {
            title: line(text, 0),
            description: line(text, 1),
            placeholder: line(text, 2),
            button: button(&line(text, 3)),
        }
    }

    fn encode(&self, fields: &BlockFields) -> Option<String> {
        match fields {
            BlockFields::Newsletter { title, description, placeholder, button } => Some(join_lines(&[
                title.clone(),
                description.clone(),
                placeholder.clone(),
                button_line(button),
            ])),
            _ => None,
        }
    }

    fn render(&self, record: &BlockRecord) -> String {
        let BlockFields::Newsletter { title, description, placeholder, button } =
            self.decode(&record.text)
        else {
            return String::new();
        };
        format!(
            "  <div class=\"ef-cta-block ef-cta-newsletter\">\n    <h3>{}</h3>\n    <p>{}</p>\n    <form class=\"ef-newsletter-form\" action=\"{}\" method=\"post\">\n      <input type=\"email\" class=\"ef-newsletter-input\" placeholder=\"{}\" required>\n      <button type=\"submit\" class=\"ef-cta-btn ef-cta-btn-primary\">{}</button>\n    </form>\n  </div>\n",
            escape(&title),
            escape(&description),
            escape(or(&button.href, "#")),
            escape(or(&placeholder, DEFAULT_PLACEHOLDER)),
            escape(or(&button.label, "Subscribe"))
        )
    }

    fn import(&self, el: &Element) -> BlockRecord {
        let placeholder = el
            .first_class("ef-newsletter-input")
            .and_then(|input| input.attr("placeholder"))
            .unwrap_or(DEFAULT_PLACEHOLDER)
            .to_string();
        let href = el
            .first_class("ef-newsletter-form")
            .and_then(|form| form.attr("action"))
            .unwrap_or("")
            .to_string();
        let label = text_of(el.first_tag("button"));
        let fields = BlockFields::Newsletter {
            title: text_of(el.first_tag("h3")),
            description: text_of(el.first_tag("p")),
            placeholder,
            button: CtaButton { label, href },
        };
        self.record(self.encode(&fields).unwrap_or_default())
    }
}

pub fn kinds() -> Vec<Arc<dyn BlockKind>> {
    vec![
        Arc::new(CtaKind { name: "cta-center", layout: Layout::Center }),
        Arc::new(CtaKind { name: "cta-split", layout: Layout::Split }),
        Arc::new(CtaKind { name: "cta-urgent", layout: Layout::Urgent }),
        Arc::new(CtaKind { name: "cta-minimal", layout: Layout::Minimal }),
        Arc::new(NewsletterKind),
    ]
}

/// A bare `ef-cta-block` is a centred CTA.
pub fn detect(el: &Element) -> Option<&'static str> {
    if el.is("div") && el.has_class("ef-cta-block") {
        variant(el, CTA_KINDS).or(Some("cta-center"))
    } else {
        None
    }
}
