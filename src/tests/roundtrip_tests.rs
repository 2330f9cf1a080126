//! Render then import: records survive the markup export

use std::sync::Arc;

use crate::categories::{free_descriptors, premium_descriptors};
use crate::core::markup::Fragment;
use crate::core::registry::Registry;
use crate::core::{BlockRecord, StoredBlock};
use crate::import::Importer;
use crate::license::signature::Signer;
use crate::license::LicenseGate;
use crate::render::premium::StandardPremiumRenderer;
use crate::render::Renderer;
use crate::theme::Theme;

fn reimport(registry: &Registry, gate: &LicenseGate, record: &BlockRecord) -> Vec<StoredBlock> {
    let html = Renderer::new(registry, gate).render_record(record);
    Importer::new(registry, gate)
        .import_markup(&html)
        .unwrap()
        .content
        .unwrap()
}

#[test]
fn test_every_free_default_survives() {
    let registry = Registry::new();
    let gate = LicenseGate::default();
    for descriptor in free_descriptors() {
        let record = descriptor.defaults;
        assert_eq!(
            reimport(&registry, &gate, &record),
            vec![StoredBlock::Content(record.clone())],
            "{} did not survive",
            descriptor.key
        );
    }
}

#[test]
fn test_every_premium_default_survives_signed() {
    let registry = Registry::new();
    let gate = LicenseGate::granted(Signer::default(), Arc::new(StandardPremiumRenderer));
    for descriptor in premium_descriptors() {
        let record = descriptor.defaults;
        assert_eq!(
            reimport(&registry, &gate, &record),
            vec![StoredBlock::Content(record.clone())],
            "{} did not survive",
            descriptor.key
        );
    }
}

#[test]
fn test_markup_characters_survive_escaping() {
    let registry = Registry::new();
    let gate = LicenseGate::default();
    let hostile = r#"<script>alert("x")</script> & 'quoted'"#;

    for tag in ["h2", "h3", "h4", "p"] {
        let record = BlockRecord::new(tag).with_text(hostile);
        let html = Renderer::new(&registry, &gate).render_record(&record);
        assert!(!html.contains("<script>"));

        let fragment = Fragment::parse(&html).unwrap();
        assert_eq!(fragment.elements().count(), 1);
        assert!(fragment.find(|el| el.is("script")).is_none());

        assert_eq!(
            reimport(&registry, &gate, &record),
            vec![StoredBlock::Content(record.clone())]
        );
    }
}

#[test]
fn test_whole_document_survives() {
    let registry = Registry::new();
    let gate = LicenseGate::default();
    let blocks: Vec<StoredBlock> = free_descriptors()
        .into_iter()
        .map(|d| StoredBlock::Content(d.defaults))
        .collect();
    let theme = Theme::named("simple-modern");

    let html = Renderer::new(&registry, &gate).render_document(&blocks, &theme);
    let doc = Importer::new(&registry, &gate).import(&html).unwrap();

    assert_eq!(doc.content_theme, Some(theme));
    assert_eq!(doc.skipped, 0);
    assert_eq!(doc.content.unwrap(), blocks);
}
