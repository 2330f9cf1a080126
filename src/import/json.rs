use serde_json::Value;
use tracing::debug;

use super::{ImportError, ImportFormat, ImportedDocument, Importer};
use crate::core::StoredBlock;
use crate::theme::Theme;

impl Importer<'_> {
    /// Import the JSON export format.
    ///
    /// Accepts `{ editorTheme?, contentTheme?, content? }` or a bare array of
    /// records. An object without `content` only changes themes.
    pub fn import_json(&self, input: &str) -> Result<ImportedDocument, ImportError> {
        let value: Value = serde_json::from_str(input)?;
        let mut doc = ImportedDocument::new(ImportFormat::Json);

        let entries = match value {
            Value::Array(entries) => Some(entries),
            Value::Object(mut obj) => {
                doc.editor_theme = obj
                    .get("editorTheme")
                    .and_then(Value::as_str)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string);
                doc.content_theme = obj
                    .remove("contentTheme")
                    .and_then(|theme| serde_json::from_value::<Theme>(theme).ok());
                match obj.remove("content") {
                    Some(Value::Array(entries)) => Some(entries),
                    _ => None,
                }
            }
            Value::Null => return Err(ImportError::UnexpectedJson("null")),
            Value::Bool(_) => return Err(ImportError::UnexpectedJson("a boolean")),
            Value::Number(_) => return Err(ImportError::UnexpectedJson("a number")),
            Value::String(_) => return Err(ImportError::UnexpectedJson("a string")),
        };

        if let Some(entries) = entries {
            let mut blocks = Vec::with_capacity(entries.len());
            for (index, entry) in entries.into_iter().enumerate() {
                match StoredBlock::from_value(entry) {
                    Some(block) => blocks.push(self.admit(block)),
                    None => {
                        debug!(index, "skipping JSON entry without a tag");
                        doc.skipped += 1;
                    }
                }
            }
            doc.content = Some(blocks);
        }

        Ok(doc)
    }
}
