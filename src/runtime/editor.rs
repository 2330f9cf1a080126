//! Editor: one block store with its registry, gate and themes
//!
//! Every mutation goes through the license gate. Premium kinds cannot be added
//! or edited without an entitlement, and exports never carry the text of a
//! record the gate denies.

use serde_json::{json, Value};
use tracing::{debug, info};

use crate::config::EditorOptions;
use crate::core::fields::BlockFields;
use crate::core::registry::Registry;
use crate::core::{EditorId, StoredBlock};
use crate::import::{ImportError, ImportFormat, Importer};
use crate::license::lock::{lock_record, unlock, NOTE_LICENSE_REQUIRED};
use crate::license::{Decision, LicenseGate};
use crate::render::premium::PremiumModule;
use crate::render::Renderer;
use crate::theme::Theme;

use super::store::BlockStore;

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Block type '{0}' requires a premium license")]
    PremiumRequired(String),

    #[error("Block type '{0}' is not enabled for this editor")]
    ComponentDisabled(String),

    #[error("Index {index} out of bounds for {len} blocks")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Fields of shape '{shape}' do not fit block kind '{kind}'")]
    FieldShapeMismatch { kind: String, shape: &'static str },

    #[error("Import failed: {0}")]
    Import(#[from] ImportError),
}

/// What a successful import changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub format: ImportFormat,
    /// Whether the store was replaced
    pub replaced: bool,
    pub imported: usize,
    pub locked: usize,
    pub skipped: usize,
}

pub struct Editor {
    id: EditorId,
    registry: Registry,
    gate: LicenseGate,
    store: BlockStore,
    options: EditorOptions,
    editor_theme: String,
    content_theme: Theme,
}

impl Editor {
    /// Create a free-mode editor with the free catalogue
    pub fn new(options: EditorOptions) -> Self {
        Self {
            id: EditorId::new(),
            registry: Registry::new(),
            gate: LicenseGate::free(options.signer()),
            store: BlockStore::new(),
            editor_theme: options.editor_theme.clone(),
            content_theme: options.content_theme(),
            options,
        }
    }

    pub fn id(&self) -> EditorId {
        self.id
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn gate(&self) -> &LicenseGate {
        &self.gate
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn blocks(&self) -> &[StoredBlock] {
        self.store.as_slice()
    }

    pub fn block(&self, index: usize) -> Option<&StoredBlock> {
        self.store.get(index)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn editor_theme(&self) -> &str {
        &self.editor_theme
    }

    pub fn content_theme(&self) -> &Theme {
        &self.content_theme
    }

    pub fn set_editor_theme(&mut self, name: impl Into<String>) {
        self.editor_theme = name.into();
    }

    pub fn set_content_theme(&mut self, theme: Theme) {
        self.content_theme = theme;
    }

    /// Append a block instantiated from the descriptor `key`
    ///
    /// # Returns
    /// * `Ok(index)` of the new block
    /// * `Err(EditorError)` if the key is unknown, disabled, or premium
    ///   without an entitlement; the store is unchanged
    pub fn add_block(&mut self, key: &str) -> Result<usize, EditorError> {
        self.insert_block(self.store.len(), key)
    }

    /// Insert a block from the descriptor `key` at `index` (clamped)
    pub fn insert_block(&mut self, index: usize, key: &str) -> Result<usize, EditorError> {
        if self.gate.decide(key) == Decision::Denied {
            return Err(EditorError::PremiumRequired(key.to_string()));
        }
        let descriptor = self
            .registry
            .describe(key)
            .ok_or_else(|| EditorError::UnknownBlockType(key.to_string()))?;
        if !self.options.allows(key) {
            return Err(EditorError::ComponentDisabled(key.to_string()));
        }
        if self.gate.decide(descriptor.defaults.kind()) == Decision::Denied {
            return Err(EditorError::PremiumRequired(key.to_string()));
        }

        let index = index.min(self.store.len());
        self.store.insert(index, descriptor.defaults.into());
        debug!(editor = %self.id, key, index, "block added");
        Ok(index)
    }

    pub fn remove_block(&mut self, index: usize) -> Result<StoredBlock, EditorError> {
        let len = self.store.len();
        self.store
            .remove(index)
            .ok_or(EditorError::IndexOutOfBounds { index, len })
    }

    pub fn move_block(&mut self, from: usize, to: usize) -> Result<(), EditorError> {
        let len = self.store.len();
        for index in [from, to] {
            if index >= len {
                return Err(EditorError::IndexOutOfBounds { index, len });
            }
        }
        self.store.move_block(from, to);
        Ok(())
    }

    /// Decode the block at `index` into its structured fields
    pub fn fields(&self, index: usize) -> Result<BlockFields, EditorError> {
        let record = self.editable(index)?;
        let kind = self
            .registry
            .kind_for(record)
            .ok_or_else(|| EditorError::UnknownBlockType(record.kind().to_string()))?;
        Ok(kind.decode(&record.text))
    }

    /// Re-encode the block at `index` from structured fields
    pub fn update_fields(&mut self, index: usize, fields: &BlockFields) -> Result<(), EditorError> {
        let record = self.editable(index)?;
        let kind = self
            .registry
            .kind_for(record)
            .ok_or_else(|| EditorError::UnknownBlockType(record.kind().to_string()))?;
        let text = kind.encode(fields).ok_or_else(|| EditorError::FieldShapeMismatch {
            kind: kind.name().to_string(),
            shape: fields.shape(),
        })?;

        if let Some(StoredBlock::Content(record)) = self.store.get_mut(index) {
            record.text = text;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// JSON export: `{ editorTheme, contentTheme, isPremium, content }`
    pub fn export_json(&self) -> String {
        let content: Vec<Value> = self.store.iter().map(|block| self.export_value(block)).collect();
        let document = json!({
            "editorTheme": self.editor_theme,
            "contentTheme": self.content_theme,
            "isPremium": self.gate.is_granted(),
            "content": content,
        });
        serde_json::to_string_pretty(&document).unwrap_or_default()
    }

    /// Markup export wrapped in the themed document root
    pub fn export_markup(&self) -> String {
        Renderer::new(&self.registry, &self.gate).render_document(self.store.iter(), &self.content_theme)
    }

    /// Rendered fragments without the document root
    pub fn render_preview(&self) -> String {
        Renderer::new(&self.registry, &self.gate).render_blocks(self.store.iter())
    }

    /// Import JSON or markup, replacing the store and themes it carries.
    ///
    /// On error the editor is left exactly as it was.
    pub fn try_import(&mut self, input: &str) -> Result<ImportSummary, EditorError> {
        let doc = Importer::new(&self.registry, &self.gate).import(input)?;

        let summary = ImportSummary {
            format: doc.format,
            replaced: doc.content.is_some(),
            imported: doc.len(),
            locked: doc.locked(),
            skipped: doc.skipped,
        };

        if let Some(name) = doc.editor_theme {
            self.editor_theme = name;
        }
        if let Some(theme) = doc.content_theme {
            self.content_theme = theme;
        }
        if let Some(content) = doc.content {
            self.store.replace_all(content);
        }

        debug!(editor = %self.id, ?summary, "import applied");
        Ok(summary)
    }

    /// Import and report success only
    pub fn import(&mut self, input: &str) -> bool {
        self.try_import(input).is_ok()
    }

    /// Install the premium module and set the entitlement
    ///
    /// # Returns
    /// The number of locked records restored from their retained payloads
    pub fn activate_premium(&mut self, module: &PremiumModule) -> usize {
        self.gate.entitle();
        self.install_premium(module)
    }

    /// Install the premium module's descriptors and renderer; the entitlement
    /// flag is left as it is.
    pub fn install_premium(&mut self, module: &PremiumModule) -> usize {
        let added = self.registry.register_premium(&module.descriptors);
        self.gate.install(module.renderer.clone());
        let restored = self.restore_locked();
        info!(
            editor = %self.id,
            descriptors = added,
            restored,
            granted = self.gate.is_granted(),
            "premium module installed"
        );
        restored
    }

    /// Set the entitlement flag, restoring locked records if the renderer is present
    pub fn grant_entitlement(&mut self) -> usize {
        self.gate.entitle();
        self.restore_locked()
    }

    /// Drop the entitlement. Stored premium records stay, but render and
    /// export as locked.
    pub fn revoke_entitlement(&mut self) {
        self.gate.revoke();
        info!(editor = %self.id, "premium entitlement revoked");
    }

    /// Re-validate the retained payload of every locked record
    fn restore_locked(&mut self) -> usize {
        if !self.gate.is_granted() {
            return 0;
        }
        let mut restored = 0;
        for block in self.store.iter_mut() {
            let StoredBlock::Locked(locked) = block else {
                continue;
            };
            if !locked.has_payload() {
                continue;
            }
            match unlock(locked, &self.gate) {
                Ok(record) => {
                    *block = StoredBlock::Content(record);
                    restored += 1;
                }
                Err(e) => {
                    debug!(kind = %locked.locked_type, error = %e, "locked record not restored");
                }
            }
        }
        restored
    }

    /// The record at `index` if it may be edited
    fn editable(&self, index: usize) -> Result<&crate::core::BlockRecord, EditorError> {
        let len = self.store.len();
        match self.store.get(index) {
            None => Err(EditorError::IndexOutOfBounds { index, len }),
            Some(StoredBlock::Locked(locked)) => Err(EditorError::PremiumRequired(locked.locked_type.clone())),
            Some(StoredBlock::Content(record)) => {
                if self.gate.decide(record.kind()) == Decision::Denied {
                    Err(EditorError::PremiumRequired(record.kind().to_string()))
                } else {
                    Ok(record)
                }
            }
        }
    }

    fn export_value(&self, block: &StoredBlock) -> Value {
        match block {
            StoredBlock::Content(record) => {
                if self.gate.decide(record.kind()) == Decision::Denied {
                    lock_record(record, self.gate.signer(), NOTE_LICENSE_REQUIRED).public_value()
                } else {
                    serde_json::to_value(record).unwrap_or(Value::Null)
                }
            }
            StoredBlock::Locked(locked) if self.gate.is_granted() => locked.to_value(),
            StoredBlock::Locked(locked) => locked.public_value(),
        }
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("id", &self.id)
            .field("blocks", &self.store.len())
            .field("gate", &self.gate)
            .finish()
    }
}
