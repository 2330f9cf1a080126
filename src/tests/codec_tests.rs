//! Codec tests across the dispatch table
//!
//! Each kind is reached through the registry, the same way the editor,
//! renderer and importer reach it.

use crate::core::fields::{AccordionItem, BlockFields, GridCard, TimelineEvent};
use crate::core::registry::Registry;

fn decode(kind: &str, text: &str) -> BlockFields {
    Registry::new().kind(kind).unwrap().decode(text)
}

fn encode(kind: &str, fields: &BlockFields) -> Option<String> {
    Registry::new().kind(kind).unwrap().encode(fields)
}

#[test]
fn test_table_rows_keep_order_and_cells() {
    let rows = vec![
        vec!["Feature".to_string(), "Basic".into(), "Pro".into()],
        vec!["Price".to_string(), "$9".into(), "$29".into()],
    ];
    let text = encode("table-comparison", &BlockFields::Table { rows: rows.clone() }).unwrap();
    assert_eq!(text, "Feature|Basic|Pro\nPrice|$9|$29");

    let BlockFields::Table { rows: decoded } = decode("table-comparison", &text) else {
        panic!("expected table fields");
    };
    assert_eq!(decoded, rows);
    assert!(decoded.iter().all(|row| row.len() == 3));
}

#[test]
fn test_missing_trailing_fields_decode_empty() {
    let BlockFields::Timeline { events } = decode("timeline-vertical", "2024|Launch") else {
        panic!("expected timeline fields");
    };
    assert_eq!(
        events,
        vec![TimelineEvent {
            date: "2024".into(),
            title: "Launch".into(),
            body: String::new(),
        }]
    );

    assert_eq!(
        decode("image", "https://x.test/a.png"),
        BlockFields::Image {
            url: "https://x.test/a.png".into(),
            title: String::new(),
            caption: String::new(),
        }
    );
}

#[test]
fn test_extra_fields_ignored() {
    let BlockFields::Accordion { items } = decode("accordion-simple", "Q?|A.|surplus|more") else {
        panic!("expected accordion fields");
    };
    assert_eq!(
        items,
        vec![AccordionItem {
            question: "Q?".into(),
            answer: "A.".into(),
        }]
    );
}

#[test]
fn test_reordering_reencodes_sequence() {
    let text = "One|star|first\nTwo|heart|second\nThree|bolt|third";
    let BlockFields::CardGrid { mut cards } = decode("card-grid-3col", text) else {
        panic!("expected grid fields");
    };
    cards.rotate_left(1);
    let reordered = encode("card-grid-3col", &BlockFields::CardGrid { cards }).unwrap();
    assert_eq!(reordered, "Two|heart|second\nThree|bolt|third\nOne|star|first");
}

#[test]
fn test_decode_is_total() {
    let registry = Registry::new();
    let inputs = ["", "\n\n", "|||", "a|b\n|\n\nc", "only one line"];
    for kind in crate::categories::builtin_kinds() {
        for input in inputs {
            let fields = kind.decode(input);
            assert!(kind.encode(&fields).is_some(), "{} rejected its own fields", kind.name());
        }
        assert!(registry.kind(kind.name()).is_some());
    }
}

#[test]
fn test_wrong_shape_rejected_everywhere() {
    let stray = BlockFields::CardGrid {
        cards: vec![GridCard::default()],
    };
    for kind in crate::categories::builtin_kinds() {
        if matches!(kind.name(), "card-grid-2col" | "card-grid-3col") {
            continue;
        }
        assert!(kind.encode(&stray).is_none(), "{} accepted grid fields", kind.name());
    }
}
