//! Importer: exported JSON or markup back into block records
//!
//! The format is picked by the first non-blank character: `<` means markup,
//! anything else is JSON. Individual elements or entries that cannot be
//! understood are skipped; only an outer document that cannot be parsed at
//! all fails the import.

mod json;
mod markup;

use tracing::warn;

use crate::core::markup::MarkupError;
use crate::core::registry::Registry;
use crate::core::StoredBlock;
use crate::license::lock::{lock, unlock, NOTE_LICENSE_REQUIRED};
use crate::license::{Decision, LicenseGate};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Json,
    Markup,
}

/// Result of a successful import
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedDocument {
    /// Replacement store content; `None` when the input only carried themes
    pub content: Option<Vec<StoredBlock>>,
    pub editor_theme: Option<String>,
    pub content_theme: Option<Theme>,
    pub format: ImportFormat,
    /// Entries or elements that were dropped
    pub skipped: usize,
}

impl ImportedDocument {
    fn new(format: ImportFormat) -> Self {
        Self {
            content: None,
            editor_theme: None,
            content_theme: None,
            format,
            skipped: 0,
        }
    }

    /// Number of records that will replace the store
    pub fn len(&self) -> usize {
        self.content.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of locked records in the content
    pub fn locked(&self) -> usize {
        self.content
            .as_ref()
            .map_or(0, |blocks| blocks.iter().filter(|b| b.is_locked()).count())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("expected a JSON object or array, found {0}")]
    UnexpectedJson(&'static str),

    #[error("malformed markup: {0}")]
    MalformedMarkup(#[from] MarkupError),
}

/// Imports documents against one editor's registry and gate
pub struct Importer<'a> {
    registry: &'a Registry,
    gate: &'a LicenseGate,
}

impl<'a> Importer<'a> {
    pub fn new(registry: &'a Registry, gate: &'a LicenseGate) -> Self {
        Self { registry, gate }
    }

    /// Import either format, detected from the input.
    pub fn import(&self, input: &str) -> Result<ImportedDocument, ImportError> {
        let result = if input.trim_start().starts_with('<') {
            self.import_markup(input)
        } else {
            self.import_json(input)
        };
        if let Err(e) = &result {
            warn!(error = %e, "import failed, store left untouched");
        }
        result
    }

    /// Apply the gate to a block entering the store.
    ///
    /// Denied premium content is locked with its payload retained; locked
    /// records are restored when the gate grants their kind and the payload
    /// verifies.
    fn admit(&self, block: StoredBlock) -> StoredBlock {
        match block {
            StoredBlock::Content(record) => {
                if self.gate.decide(record.kind()) == Decision::Denied {
                    lock(StoredBlock::Content(record), self.gate.signer(), NOTE_LICENSE_REQUIRED)
                } else {
                    StoredBlock::Content(record)
                }
            }
            StoredBlock::Locked(locked) => {
                if self.gate.decide(&locked.locked_type) == Decision::Granted && locked.has_payload() {
                    match unlock(&locked, self.gate) {
                        Ok(record) => return StoredBlock::Content(record),
                        Err(e) => {
                            warn!(kind = %locked.locked_type, error = %e, "locked payload failed re-validation");
                        }
                    }
                }
                StoredBlock::Locked(locked)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        let registry = Registry::new();
        let gate = LicenseGate::default();
        let importer = Importer::new(&registry, &gate);

        let doc = importer.import("  \n<h2>Title</h2>").unwrap();
        assert_eq!(doc.format, ImportFormat::Markup);

        let doc = importer.import(r#"[{"tag":"h2","text":"Title"}]"#).unwrap();
        assert_eq!(doc.format, ImportFormat::Json);
    }

    #[test]
    fn test_malformed_input_fails() {
        let registry = Registry::new();
        let gate = LicenseGate::default();
        let importer = Importer::new(&registry, &gate);

        assert!(matches!(importer.import("{not json"), Err(ImportError::MalformedJson(_))));
        assert!(matches!(importer.import("42"), Err(ImportError::UnexpectedJson(_))));
        assert!(matches!(
            importer.import(r#"<div class="x"#),
            Err(ImportError::MalformedMarkup(_))
        ));
    }
}
