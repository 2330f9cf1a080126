//! Block families and classification
//!
//! Each submodule implements [`BlockKind`] for one family of related kinds and
//! exposes `kinds()` for the dispatch table and `detect()` for the importer.
//! This module stitches them together, holds the fixed premium membership
//! set, and provides the built-in descriptor catalogues.

pub mod accordion;
pub mod cards;
pub mod cta;
pub mod dividers;
pub mod general;
pub mod grids;
pub mod media;
pub mod polls;
pub mod tables;
pub mod timeline;
pub mod tips;

use std::sync::Arc;

use crate::core::block::BlockKind;
use crate::core::markup::Element;
use crate::core::registry::BlockTypeDescriptor;
use crate::core::BlockRecord;

/// Kinds that require an entitlement. Fixed in code so registry, renderer and
/// importer always agree.
pub const PREMIUM_KINDS: &[&str] = &[
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
    "card-basic",
    "card-hover",
    "card-bordered",
    "card-gradient",
    "card-image",
    "card-icon-top",
    "card-stat",
    "card-grid-2col",
    "card-grid-3col",
    "card-grid-masonry",
    "cta-center",
    "cta-split",
    "cta-urgent",
    "cta-minimal",
    "cta-newsletter",
    "table-basic",
    "table-striped",
    "table-comparison",
    "timeline-vertical",
    "timeline-horizontal",
    "accordion-faq",
    "accordion-simple",
    "poll-vote",
    "poll-emoji",
    "poll-rating",
];

pub fn is_premium(kind: &str) -> bool {
    PREMIUM_KINDS.contains(&kind)
}

/// Every kind with a codec, free and premium
pub fn builtin_kinds() -> Vec<Arc<dyn BlockKind>> {
    let mut kinds = general::kinds();
    kinds.extend(media::kinds());
    kinds.extend(dividers::kinds());
    kinds.extend(tips::kinds());
    kinds.extend(cards::kinds());
    kinds.extend(grids::kinds());
    kinds.extend(cta::kinds());
    kinds.extend(tables::kinds());
    kinds.extend(timeline::kinds());
    kinds.extend(accordion::kinds());
    kinds.extend(polls::kinds());
    kinds
}

/// Identify the kind an exported element was rendered from.
///
/// Elements matching no family yield `None` and are dropped by the importer.
pub fn detect(el: &Element) -> Option<&'static str> {
    general::detect(el)
        .or_else(|| media::detect(el))
        .or_else(|| dividers::detect(el))
        .or_else(|| tips::detect(el))
        .or_else(|| grids::detect(el))
        .or_else(|| cards::detect(el))
        .or_else(|| cta::detect(el))
        .or_else(|| tables::detect(el))
        .or_else(|| timeline::detect(el))
        .or_else(|| accordion::detect(el))
        .or_else(|| polls::detect(el))
}

/// First kind in `family` whose `ef-` prefixed class is on `el`
pub(crate) fn variant(el: &Element, family: &[&'static str]) -> Option<&'static str> {
    family
        .iter()
        .copied()
        .find(|kind| el.has_class(&format!("ef-{kind}")))
}

fn typed(kind: &str, text: &str) -> BlockRecord {
    BlockRecord::new("div").with_type(kind).with_text(text)
}

/// The free catalogue every editor starts with
pub fn free_descriptors() -> Vec<BlockTypeDescriptor> {
    let general = "General";
    let media = "Media";
    let dividers = "Dividers";

    vec![
        BlockTypeDescriptor::new("h2", BlockRecord::new("h2").with_text("Judul Bagian"), general, "H2 Heading", "heading"),
        BlockTypeDescriptor::new("h3", BlockRecord::new("h3").with_text("Sub Judul"), general, "H3 Heading", "heading"),
        BlockTypeDescriptor::new("h4", BlockRecord::new("h4").with_text("Heading 4"), general, "H4 Heading", "heading"),
        BlockTypeDescriptor::new(
            "p",
            BlockRecord::new("p").with_text("Ini adalah paragraf. Klik untuk mengedit konten ini."),
            general,
            "Paragraph",
            "paragraph",
        ),
        BlockTypeDescriptor::new(
            "p-large",
            BlockRecord::new("p")
                .with_text("Paragraf pembuka yang lebih besar.")
                .with_class("text-xl"),
            general,
            "Large Paragraph",
            "text-height",
        ),
        BlockTypeDescriptor::new(
            "ol",
            BlockRecord::new("ol").with_text("Item pertama\nItem kedua\nItem ketiga"),
            general,
            "Ordered List",
            "list-ol",
        ),
        BlockTypeDescriptor::new(
            "ul",
            BlockRecord::new("ul").with_text("Item pertama\nItem kedua\nItem ketiga"),
            general,
            "Unordered List",
            "list-ul",
        ),
        BlockTypeDescriptor::new(
            "code",
            typed("code-block", "// Contoh code\nfunction hello() {\n  console.log(\"Hello World\");\n}"),
            general,
            "Code Block",
            "code",
        ),
        BlockTypeDescriptor::new(
            "image",
            typed("image", "https://placehold.co/800x400|Image Title|This is an image caption"),
            media,
            "Image Block",
            "image",
        ),
        BlockTypeDescriptor::new(
            "embed",
            typed("embed", "youtube|https://www.youtube.com/watch?v=jNQXAC9IVRw|Video Title (Optional)"),
            media,
            "Embed Media",
            "video",
        ),
        BlockTypeDescriptor::new("divider-line", typed("divider-line", ""), dividers, "Solid Line", "minus"),
        BlockTypeDescriptor::new("divider-dashed", typed("divider-dashed", ""), dividers, "Dashed Line", "grip-lines"),
        BlockTypeDescriptor::new("divider-dotted", typed("divider-dotted", ""), dividers, "Dotted Line", "ellipsis-h"),
        BlockTypeDescriptor::new("divider-gradient", typed("divider-gradient", ""), dividers, "Gradient Line", "stream"),
        BlockTypeDescriptor::new("divider-text", typed("divider-text", "* * *"), dividers, "Text Divider", "asterisk"),
    ]
}

/// Descriptors shipped with the standard premium module
pub fn premium_descriptors() -> Vec<BlockTypeDescriptor> {
    let entries: &[(&str, &str, &str, &str, &str)] = &[
        ("tip-info", "Tips", "Info Tip", "info-circle", "Did you know?\nA short, helpful note for the reader."),
        ("tip-success", "Tips", "Success Tip", "check-circle", "Well done\nEverything is set up correctly."),
        ("tip-warning", "Tips", "Warning Tip", "exclamation-triangle", "Heads up\nDouble-check this step before continuing."),
        ("tip-danger", "Tips", "Danger Tip", "exclamation-circle", "Careful\nThis action cannot be undone."),
        ("tip-note", "Tips", "Note", "sticky-note", "Note\nKeep this in mind for later."),
        ("tip-question", "Tips", "Question", "question-circle", "Question\nWhat would you do differently?"),
        ("tip-star", "Tips", "Highlight", "star", "Pro tip\nThe one trick worth remembering."),
        ("tip-check", "Tips", "Checklist Tip", "check-square", "Checked\nThis has been verified."),
        ("tip-quote", "Tips", "Quote", "quote-left", "Quote\nSimplicity is the soul of efficiency.\nAustin Freeman"),
        ("tip-steps", "Tips", "Quick Steps", "list-ol", "Quick Steps\nOpen the editor\nAdd a block\nPublish"),
        ("card-basic", "Cards", "Basic Card", "square", "Card title\nA short description of the card."),
        ("card-hover", "Cards", "Hover Card", "hand-pointer", "Hover me\nLifts on hover."),
        ("card-bordered", "Cards", "Bordered Card", "border-all", "Bordered\nA card with an accent border."),
        ("card-gradient", "Cards", "Gradient Card", "fill-drip", "Gradient\nA card with a gradient background."),
        ("card-image", "Cards", "Image Card", "image", "Card title\nA card with a cover image.\nhttps://placehold.co/600x300"),
        ("card-icon-top", "Cards", "Icon Card", "icons", "fas fa-rocket\nFast setup\nUp and running in minutes."),
        ("card-stat", "Cards", "Stat Card", "chart-line", "99%|Uptime\nMeasured over the last year."),
        ("card-grid-2col", "Card Grids", "2 Column Grid", "th-large", "Fast|fas fa-bolt|Loads in a blink\nSecure|fas fa-lock|Private by default"),
        ("card-grid-3col", "Card Grids", "3 Column Grid", "th", "Plan|fas fa-map|Outline the work\nBuild|fas fa-hammer|Make it real\nShip|fas fa-rocket|Put it out there"),
        ("card-grid-masonry", "Card Grids", "Masonry Grid", "grip-horizontal", "Short|fas fa-feather|short|Brief note\nLong|fas fa-book|long|A longer piece of writing that spans more space"),
        ("cta-center", "Call to Action", "Centered CTA", "bullhorn", "Ready to start?\nJoin thousands of writers today.\nGet started|#start\nLearn more|#learn"),
        ("cta-split", "Call to Action", "Split CTA", "columns", "Try it free\nNo credit card required.\nSign up|#signup"),
        ("cta-urgent", "Call to Action", "Urgent CTA", "clock", "Offer ends soon\nSave 50% this week only.\nClaim offer|#offer"),
        ("cta-minimal", "Call to Action", "Minimal CTA", "mouse-pointer", "Questions?\nWe are happy to help.\nContact us|#contact"),
        ("cta-newsletter", "Call to Action", "Newsletter", "envelope", "Stay in the loop\nOne email a week, no spam.\nyour@email.com\nSubscribe|#subscribe"),
        ("table-basic", "Tables", "Basic Table", "table", "Name|Role\nAda|Engineer\nGrace|Admiral"),
        ("table-striped", "Tables", "Striped Table", "bars", "Month|Visitors\nJanuary|1,200\nFebruary|1,450"),
        ("table-comparison", "Tables", "Comparison Table", "balance-scale", "Feature|Basic|Pro\nPrice|$9|$29\nSupport|Email|Priority"),
        ("timeline-vertical", "Timeline", "Vertical Timeline", "stream", "2022|Founded|The idea takes shape\n2023|Launch|First public release\n2024|Growth|Ten thousand users"),
        ("timeline-horizontal", "Timeline", "Horizontal Timeline", "ellipsis-h", "Q1|Plan|Scope the work\nQ2|Build|Write the code\nQ3|Ship|Release it"),
        ("accordion-faq", "Accordion", "FAQ", "question", "Is there a free plan?|Yes, the core editor is free.\nCan I cancel any time?|Yes, no questions asked."),
        ("accordion-simple", "Accordion", "Simple Accordion", "chevron-down", "Section one|Details for section one.\nSection two|Details for section two."),
        ("poll-vote", "Polls", "Vote Poll", "vote-yea", "Which feature next?|A|Dark mode|B|Offline mode"),
        ("poll-emoji", "Polls", "Emoji Poll", "smile", "How was this article?|😍|Loved it|🙂|Good|😐|Meh"),
        ("poll-rating", "Polls", "Rating Poll", "star-half-alt", "Rate this guide|1|Poor|3|Okay|5|Excellent"),
    ];

    entries
        .iter()
        .map(|&(kind, group, label, icon, text)| {
            let mut defaults = if kind.starts_with("table-") {
                BlockRecord::new("table").with_type(kind).with_text(text)
            } else {
                typed(kind, text)
            };
            if matches!(kind, "card-grid-2col" | "card-grid-3col" | "card-grid-masonry" | "timeline-horizontal") {
                defaults.layout = "row".into();
            }
            BlockTypeDescriptor::new(kind, defaults, group, label, icon)
        })
        .collect()
}
