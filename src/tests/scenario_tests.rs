//! End-to-end licensing scenarios through the editor surface

use crate::config::EditorOptions;
use crate::core::fields::BlockFields;
use crate::core::StoredBlock;
use crate::license::lock::NOTE_TAMPERED;
use crate::render::premium::PremiumModule;
use crate::runtime::{Editor, EditorError};

fn free_editor() -> Editor {
    Editor::new(EditorOptions::default())
}

fn premium_editor() -> Editor {
    let mut editor = free_editor();
    editor.activate_premium(&PremiumModule::standard());
    editor
}

fn with_secret_tip(editor: &mut Editor) -> usize {
    let index = editor.add_block("tip-warning").unwrap();
    editor
        .update_fields(
            index,
            &BlockFields::Titled {
                title: "Vault code".into(),
                body: "Open sesame 4471".into(),
            },
        )
        .unwrap();
    index
}

#[test]
fn scenario_premium_add_rejected_without_entitlement() {
    let mut editor = free_editor();
    editor.add_block("h2").unwrap();
    let before = editor.blocks().to_vec();

    for key in ["tip-info", "card-grid-masonry", "poll-rating", "cta-newsletter"] {
        assert!(matches!(editor.add_block(key), Err(EditorError::PremiumRequired(_))));
        assert!(matches!(editor.insert_block(0, key), Err(EditorError::PremiumRequired(_))));
    }
    assert_eq!(editor.blocks(), before.as_slice());
}

#[test]
fn scenario_export_then_import_without_entitlement() {
    let mut paid = premium_editor();
    with_secret_tip(&mut paid);
    let markup = paid.export_markup();
    assert!(markup.contains("data-payload"));

    paid.revoke_entitlement();
    assert!(paid.import(&markup));

    let StoredBlock::Locked(locked) = &paid.blocks()[0] else {
        panic!("expected a locked record");
    };
    assert_eq!(locked.locked_type, "tip-warning");

    let public = locked.public_value();
    assert_eq!(public["type"], "premium-locked");
    assert_eq!(public["lockedType"], "tip-warning");

    assert!(!paid.export_json().contains("Open sesame"));
    assert!(!paid.export_markup().contains("Open sesame"));
    assert!(!paid.render_preview().contains("Vault code"));
}

#[test]
fn scenario_corrupted_signature_locks_with_note() {
    let mut paid = premium_editor();
    with_secret_tip(&mut paid);
    let markup = paid.export_markup();

    let start = markup.find("data-signature=\"").unwrap() + "data-signature=\"".len();
    let original = markup.as_bytes()[start];
    let replacement = if original == b'0' { "1" } else { "0" };
    let mut corrupted = markup.clone();
    corrupted.replace_range(start..start + 1, replacement);

    let mut reader = premium_editor();
    let summary = reader.try_import(&corrupted).unwrap();
    assert_eq!(summary.locked, 1);

    let StoredBlock::Locked(locked) = &reader.blocks()[0] else {
        panic!("expected a locked record");
    };
    assert_eq!(locked.note, NOTE_TAMPERED);
    assert!(!locked.has_payload());
}

#[test]
fn scenario_legacy_fragment_restored_with_note() {
    let legacy = r#"<div class="ef-article-content">
  <h2>Release notes</h2>
  <div class="ef-tip-block ef-tip-note">
    <div class="ef-tip-icon"><i class="fas fa-sticky-note"></i></div>
    <div class="ef-tip-content">
      <strong>Before upgrading</strong>
      <p>Back up your data.</p>
    </div>
  </div>
</div>"#;

    let mut editor = premium_editor();
    assert!(editor.import(legacy));
    assert_eq!(editor.len(), 2);

    let StoredBlock::Content(record) = &editor.blocks()[1] else {
        panic!("expected restored content");
    };
    assert_eq!(record.kind(), "tip-note");
    assert!(record.text.starts_with("Before upgrading"));
    assert!(record.note.as_deref().unwrap_or_default().contains("legacy"));
}

#[test]
fn scenario_legacy_fragment_locked_without_entitlement() {
    let legacy = r#"<div class="ef-card ef-card-basic"><h4>Members only</h4><p>Hidden body</p></div>"#;
    let mut editor = free_editor();
    assert!(editor.import(legacy));

    let StoredBlock::Locked(locked) = &editor.blocks()[0] else {
        panic!("expected a locked record");
    };
    assert!(locked.has_payload());
    assert!(!editor.export_json().contains("Hidden body"));
}

#[test]
fn scenario_restore_on_renew_via_replayed_payload() {
    let mut paid = premium_editor();
    with_secret_tip(&mut paid);
    let first = paid.export_markup();
    let second = paid.export_markup();
    assert_eq!(first, second);

    let mut lapsed = free_editor();
    assert!(lapsed.import(&first));
    assert!(lapsed.blocks()[0].is_locked());

    assert_eq!(lapsed.activate_premium(&PremiumModule::standard()), 1);
    let StoredBlock::Content(record) = &lapsed.blocks()[0] else {
        panic!("expected restored content");
    };
    assert_eq!(record.text, "Vault code\nOpen sesame 4471");
}

#[test]
fn scenario_malformed_import_leaves_store_untouched() {
    let mut editor = free_editor();
    editor.add_block("p").unwrap();
    let before = editor.blocks().to_vec();

    assert!(!editor.import(r#"{"content": [1, 2"#));
    assert!(!editor.import("<div class=\"unterminated"));
    assert_eq!(editor.blocks(), before.as_slice());
}
