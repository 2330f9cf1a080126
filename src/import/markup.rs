use tracing::{debug, warn};

use super::{ImportError, ImportFormat, ImportedDocument, Importer};
use crate::categories;
use crate::core::markup::{Element, Fragment};
use crate::core::{LockedBlockRecord, StoredBlock};
use crate::license::lock::{
    lock_record, open, NOTE_LEGACY_RESTORED, NOTE_LICENSE_REQUIRED, NOTE_PLACEHOLDER, NOTE_TAMPERED,
};
use crate::license::Decision;
use crate::render::{DOCUMENT_ROOT_CLASS, LOCKED_PLACEHOLDER_CLASS, PREMIUM_WRAPPER_CLASS};
use crate::theme::Theme;

/// Older exports wrapped blocks in this class instead of the preview root
const LEGACY_ROOT_CLASS: &str = "ef-article-content";

impl Importer<'_> {
    /// Import exported markup.
    ///
    /// Blocks are the children of the document root when one is present,
    /// otherwise the top-level elements. The root's inline style supplies the
    /// content theme.
    pub fn import_markup(&self, input: &str) -> Result<ImportedDocument, ImportError> {
        let fragment = Fragment::parse(input)?;
        let mut doc = ImportedDocument::new(ImportFormat::Markup);

        let root = fragment.find(|el| el.has_class(DOCUMENT_ROOT_CLASS) || el.has_class(LEGACY_ROOT_CLASS));
        let children: Vec<&Element> = match root {
            Some(root) => {
                doc.content_theme = root.attr("style").and_then(Theme::from_style);
                root.elements().collect()
            }
            None => fragment.elements().collect(),
        };

        let mut blocks = Vec::with_capacity(children.len());
        for el in children {
            match self.import_element(el) {
                Some(block) => blocks.push(block),
                None => {
                    debug!(element = %el.name, "skipping unrecognised element");
                    doc.skipped += 1;
                }
            }
        }
        doc.content = Some(blocks);

        Ok(doc)
    }

    fn import_element(&self, el: &Element) -> Option<StoredBlock> {
        if el.has_class(PREMIUM_WRAPPER_CLASS) {
            return Some(self.import_signed(el));
        }

        if el.has_class(LOCKED_PLACEHOLDER_CLASS) {
            let kind = el.attr("data-locked-type").unwrap_or("unknown");
            return Some(LockedBlockRecord::new(kind, NOTE_PLACEHOLDER).into());
        }

        let name = categories::detect(el)?;
        let kind = self.registry.kind(name)?;
        let record = kind.import(el);

        Some(match self.gate.decide(name) {
            Decision::Free => record.into(),
            // Premium markup without a signed wrapper predates signing.
            Decision::Granted => record.with_note(NOTE_LEGACY_RESTORED).into(),
            Decision::Denied => lock_record(&record, self.gate.signer(), NOTE_LICENSE_REQUIRED).into(),
        })
    }

    /// Restore a signed wrapper from its payload, never from its inner markup.
    fn import_signed(&self, el: &Element) -> StoredBlock {
        let declared = el.attr("data-block-type").unwrap_or("unknown");
        let payload = el.attr("data-payload").unwrap_or_default();
        let signature = el.attr("data-signature").unwrap_or_default();

        match open(payload, signature, self.gate.signer()) {
            Ok(record) => {
                if self.gate.decide(record.kind()).allows_content() {
                    record.into()
                } else {
                    lock_record(&record, self.gate.signer(), NOTE_LICENSE_REQUIRED).into()
                }
            }
            Err(e) => {
                warn!(kind = declared, error = %e, "signed block failed verification");
                LockedBlockRecord::new(declared, NOTE_TAMPERED).into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::registry::Registry;
    use crate::core::{BlockRecord, StoredBlock};
    use crate::import::Importer;
    use crate::license::lock::{NOTE_PLACEHOLDER, NOTE_TAMPERED};
    use crate::license::signature::Signer;
    use crate::license::LicenseGate;
    use crate::render::premium::StandardPremiumRenderer;
    use crate::render::Renderer;
    use crate::theme::Theme;
    use std::sync::Arc;

    fn granted() -> LicenseGate {
        LicenseGate::granted(Signer::default(), Arc::new(StandardPremiumRenderer))
    }

    #[test]
    fn test_root_children_and_theme() {
        let registry = Registry::new();
        let gate = LicenseGate::default();
        let blocks = vec![
            StoredBlock::Content(BlockRecord::new("h2").with_text("Title")),
            StoredBlock::Content(BlockRecord::new("p").with_text("Body")),
        ];
        let html = Renderer::new(&registry, &gate).render_document(&blocks, &Theme::named("colorful"));

        let doc = Importer::new(&registry, &gate).import_markup(&html).unwrap();
        assert_eq!(doc.content_theme, Some(Theme::named("colorful")));
        assert_eq!(doc.content.unwrap(), blocks);
    }

    #[test]
    fn test_bare_fragment_without_root() {
        let registry = Registry::new();
        let gate = LicenseGate::default();
        let doc = Importer::new(&registry, &gate)
            .import_markup("<h3>Sub</h3>\n<marquee>gone</marquee>\n<p>Text</p>")
            .unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.skipped, 1);
        assert!(doc.content_theme.is_none());
    }

    #[test]
    fn test_signed_block_restored_when_granted() {
        let registry = Registry::new();
        let gate = granted();
        let record = BlockRecord::new("div")
            .with_type("accordion-faq")
            .with_text("Question?\nAnswer.");
        let html = Renderer::new(&registry, &gate).render_record(&record);

        let doc = Importer::new(&registry, &gate).import_markup(&html).unwrap();
        assert_eq!(doc.content.unwrap(), vec![StoredBlock::Content(record)]);
    }

    #[test]
    fn test_signed_block_locked_when_denied() {
        let registry = Registry::new();
        let record = BlockRecord::new("div").with_type("tip-info").with_text("Tip\nBody");
        let html = Renderer::new(&registry, &granted()).render_record(&record);

        let free = LicenseGate::default();
        let doc = Importer::new(&registry, &free).import_markup(&html).unwrap();
        let StoredBlock::Locked(locked) = &doc.content.unwrap()[0] else {
            panic!("expected locked record");
        };
        assert_eq!(locked.locked_type, "tip-info");
        assert!(locked.has_payload());
    }

    #[test]
    fn test_forged_signature_locks_without_payload() {
        let registry = Registry::new();
        let gate = granted();
        let record = BlockRecord::new("div").with_type("tip-info").with_text("Tip\nBody");
        let html = Renderer::new(&registry, &gate)
            .render_record(&record)
            .replace("data-signature=\"", "data-signature=\"x");

        let doc = Importer::new(&registry, &gate).import_markup(&html).unwrap();
        let StoredBlock::Locked(locked) = &doc.content.unwrap()[0] else {
            panic!("expected locked record");
        };
        assert_eq!(locked.note, NOTE_TAMPERED);
        assert!(!locked.has_payload());
    }

    #[test]
    fn test_broken_tag_skips_only_that_element() {
        let registry = Registry::new();
        let gate = LicenseGate::default();
        let importer = Importer::new(&registry, &gate);

        let doc = importer
            .import_markup("<h2>Keep me</h2>\n<p class=it's>broken attr</p>\n<p>After</p>")
            .unwrap();
        let content = doc.content.unwrap();
        assert_eq!(content[0], StoredBlock::Content(BlockRecord::new("h2").with_text("Keep me")));
        assert_eq!(content.last(), Some(&StoredBlock::Content(BlockRecord::new("p").with_text("After"))));

        let doc = importer.import_markup("<h2>Keep me</h2>\n<p>if a<b then c</p>").unwrap();
        let content = doc.content.unwrap();
        assert_eq!(content.len(), 2);
        assert_eq!(content[0], StoredBlock::Content(BlockRecord::new("h2").with_text("Keep me")));
    }

    #[test]
    fn test_placeholder_imports_as_locked() {
        let registry = Registry::new();
        let gate = granted();
        let html = crate::render::placeholder("card-stat");

        let doc = Importer::new(&registry, &gate).import_markup(&html).unwrap();
        let StoredBlock::Locked(locked) = &doc.content.unwrap()[0] else {
            panic!("expected locked record");
        };
        assert_eq!(locked.locked_type, "card-stat");
        assert_eq!(locked.note, NOTE_PLACEHOLDER);
    }

    #[test]
    fn test_unsigned_premium_markup() {
        let registry = Registry::new();
        let record = BlockRecord::new("div").with_type("tip-success").with_text("Done\nAll good");
        let plain = crate::categories::builtin_kinds()
            .into_iter()
            .find(|k| k.name() == "tip-success")
            .unwrap()
            .render(&record);

        let doc = Importer::new(&registry, &granted()).import_markup(&plain).unwrap();
        let StoredBlock::Content(restored) = &doc.content.unwrap()[0] else {
            panic!("expected content");
        };
        assert_eq!(restored.text, record.text);
        assert!(restored.note.as_deref().unwrap().contains("legacy"));

        let free = LicenseGate::default();
        let doc = Importer::new(&registry, &free).import_markup(&plain).unwrap();
        assert_eq!(doc.locked(), 1);
    }
}
