//! Editor manager: the explicit registry of live editors
//!
//! Editors are added by `create_editor` and removed by `destroy_editor`.
//! A premium module registered through the manager is installed into every
//! live editor and remembered for editors created afterwards.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::EditorOptions;
use crate::core::EditorId;
use crate::render::premium::PremiumModule;

use super::editor::Editor;

/// Result of exchanging a license key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementGrant {
    pub granted: bool,
    /// Where the host loads the premium module from, when granted
    #[serde(default)]
    pub premium_module_url: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum EntitlementError {
    #[error("license rejected: {0}")]
    Rejected(String),

    #[error("license validation failed: {0}")]
    Transport(#[from] anyhow::Error),
}

/// Exchanges a license key for an entitlement
///
/// The network call lives in the host; the manager only consumes the result.
#[async_trait]
pub trait EntitlementValidator: Send + Sync {
    async fn validate(&self, license_key: &str) -> Result<EntitlementGrant, EntitlementError>;
}

#[derive(Default)]
pub struct EditorManager {
    editors: HashMap<EditorId, Editor>,
    premium: Option<PremiumModule>,
}

impl EditorManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an editor and track it
    ///
    /// # Arguments
    /// * `options` - Editor options; `initialContent` is imported on creation
    /// * `entitled` - Result of license validation
    ///
    /// # Returns
    /// The new editor's ID
    pub fn create_editor(&mut self, options: EditorOptions, entitled: bool) -> EditorId {
        let initial = options.initial_content.clone();
        let mut editor = Editor::new(options);

        if entitled {
            editor.grant_entitlement();
        }
        if let Some(module) = &self.premium {
            editor.install_premium(module);
        }
        if let Some(content) = initial.filter(|c| !c.trim().is_empty()) {
            if !editor.import(&content) {
                warn!(editor = %editor.id(), "initial content could not be imported, starting empty");
            }
        }

        let id = editor.id();
        info!(editor = %id, entitled, "editor created");
        self.editors.insert(id, editor);
        id
    }

    /// Validate the options' license key, then create the editor.
    ///
    /// Validation failures degrade to a free editor.
    pub async fn create_validated(
        &mut self,
        options: EditorOptions,
        validator: &dyn EntitlementValidator,
    ) -> EditorId {
        let entitled = match options.license_key.as_deref().filter(|k| !k.is_empty()) {
            Some(key) => match validator.validate(key).await {
                Ok(grant) => grant.granted,
                Err(e) => {
                    warn!(error = %e, "license validation failed, continuing in free mode");
                    false
                }
            },
            None => false,
        };
        self.create_editor(options, entitled)
    }

    /// Drop an editor. Returns whether it existed.
    pub fn destroy_editor(&mut self, id: EditorId) -> bool {
        let removed = self.editors.remove(&id).is_some();
        if removed {
            info!(editor = %id, "editor destroyed");
        }
        removed
    }

    pub fn editor(&self, id: EditorId) -> Option<&Editor> {
        self.editors.get(&id)
    }

    pub fn editor_mut(&mut self, id: EditorId) -> Option<&mut Editor> {
        self.editors.get_mut(&id)
    }

    /// Install a premium module into every live editor and remember it
    ///
    /// # Returns
    /// The number of editors the module was installed into
    pub fn register_premium(&mut self, module: PremiumModule) -> usize {
        for editor in self.editors.values_mut() {
            editor.install_premium(&module);
        }
        let count = self.editors.len();
        info!(editors = count, descriptors = module.descriptors.len(), "premium module registered");
        self.premium = Some(module);
        count
    }

    pub fn has_premium(&self) -> bool {
        self.premium.is_some()
    }

    pub fn ids(&self) -> Vec<EditorId> {
        self.editors.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.editors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }
}

impl std::fmt::Debug for EditorManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorManager")
            .field("editors", &self.editors.len())
            .field("premium", &self.premium.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_destroy() {
        let mut manager = EditorManager::new();
        let id = manager.create_editor(EditorOptions::default(), false);
        assert_eq!(manager.len(), 1);
        assert!(manager.editor(id).is_some());
        assert!(manager.destroy_editor(id));
        assert!(!manager.destroy_editor(id));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_initial_content_imported() {
        let mut manager = EditorManager::new();
        let options = EditorOptions::default().with_initial_content("<h2>Hello</h2>\n<p>World</p>");
        let id = manager.create_editor(options, false);
        assert_eq!(manager.editor(id).unwrap().len(), 2);
    }

    #[test]
    fn test_register_premium_retrofits_entitled_editors() {
        let mut manager = EditorManager::new();
        let paid = manager.create_editor(EditorOptions::default(), true);
        let free = manager.create_editor(EditorOptions::default(), false);

        assert!(!manager.editor(paid).unwrap().gate().is_granted());
        assert_eq!(manager.register_premium(PremiumModule::standard()), 2);

        assert!(manager.editor_mut(paid).unwrap().add_block("cta-center").is_ok());
        assert!(manager.editor_mut(free).unwrap().add_block("cta-center").is_err());
        assert!(manager.editor(free).unwrap().registry().contains("cta-center"));
    }

    #[test]
    fn test_module_remembered_for_later_editors() {
        let mut manager = EditorManager::new();
        manager.register_premium(PremiumModule::standard());
        let id = manager.create_editor(EditorOptions::default(), true);
        assert!(manager.editor(id).unwrap().gate().is_granted());
    }
}
