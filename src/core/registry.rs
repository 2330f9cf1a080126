//! Block Registry - catalogue of block type descriptors and the kind dispatch table
//!
//! The registry answers two questions:
//! - which descriptor keys can be instantiated (`describe`), with their
//!   default record and sidebar metadata
//! - which [`BlockKind`] handles a record (`kind_for`), used by codec,
//!   renderer and importer alike
//!
//! Descriptors start as the free catalogue. Premium activation may add
//! descriptors later, but never removes or replaces one.

use crate::categories;
use crate::core::block::BlockKind;
use crate::core::BlockRecord;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry entry for one instantiable block type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockTypeDescriptor {
    /// Key used by `add_block` (`h2`, `p-large`, `tip-info`, ...)
    pub key: String,
    /// Record created when the type is added
    pub defaults: BlockRecord,
    /// Derived from the fixed premium membership set
    pub is_premium: bool,
    /// Sidebar group
    pub group: String,
    pub label: String,
    /// Icon identifier
    pub icon: String,
}

impl BlockTypeDescriptor {
    pub fn new(
        key: impl Into<String>,
        defaults: BlockRecord,
        group: impl Into<String>,
        label: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        let is_premium = categories::is_premium(defaults.kind());
        Self {
            key: key.into(),
            defaults,
            is_premium,
            group: group.into(),
            label: label.into(),
            icon: icon.into(),
        }
    }
}

#[derive(Default)]
struct Catalogue {
    descriptors: HashMap<String, BlockTypeDescriptor>,
    /// Registration order, used for listing
    order: Vec<String>,
}

/// Block registry
///
/// Descriptors sit behind `Arc<RwLock<..>>` so clones of one registry observe
/// later premium registrations. The kind table is fixed at construction.
#[derive(Clone)]
pub struct Registry {
    catalogue: Arc<RwLock<Catalogue>>,
    kinds: Arc<HashMap<&'static str, Arc<dyn BlockKind>>>,
}

impl Registry {
    /// Create a registry with every built-in kind and the free descriptors
    ///
    /// # Example
    /// ```
    /// use block_editor::core::registry::Registry;
    ///
    /// let registry = Registry::new();
    /// assert!(registry.describe("h2").is_some());
    /// assert!(registry.describe("tip-info").is_none());
    /// ```
    pub fn new() -> Self {
        let registry = Self::empty();
        for descriptor in categories::free_descriptors() {
            // Built-in keys are unique and their kinds are in the table.
            let _ = registry.register(descriptor);
        }
        registry
    }

    /// Create a registry with the built-in kind table and no descriptors
    pub fn empty() -> Self {
        let kinds = categories::builtin_kinds()
            .into_iter()
            .map(|kind| (kind.name(), kind))
            .collect();
        Self {
            catalogue: Arc::new(RwLock::new(Catalogue::default())),
            kinds: Arc::new(kinds),
        }
    }

    /// Register a descriptor
    ///
    /// # Arguments
    /// * `descriptor` - The descriptor to add
    ///
    /// # Returns
    /// * `Ok(())` if registration succeeds
    /// * `Err(RegistryError)` if the key exists, the default record is
    ///   invalid, or no kind handles it
    pub fn register(&self, descriptor: BlockTypeDescriptor) -> Result<(), RegistryError> {
        self.validate_descriptor(&descriptor)?;

        let mut catalogue = self.catalogue.write();
        if catalogue.descriptors.contains_key(&descriptor.key) {
            return Err(RegistryError::DuplicateDescriptor(descriptor.key));
        }

        catalogue.order.push(descriptor.key.clone());
        catalogue.descriptors.insert(descriptor.key.clone(), descriptor);
        Ok(())
    }

    /// Register a batch of premium descriptors
    ///
    /// Existing keys are left untouched; invalid descriptors are skipped.
    ///
    /// # Returns
    /// The number of descriptors added
    pub fn register_premium(&self, descriptors: &[BlockTypeDescriptor]) -> usize {
        descriptors
            .iter()
            .filter(|d| self.register((*d).clone()).is_ok())
            .count()
    }

    /// Look up a descriptor by key
    pub fn describe(&self, key: &str) -> Option<BlockTypeDescriptor> {
        self.catalogue.read().descriptors.get(key).cloned()
    }

    /// Look up a kind by name
    pub fn kind(&self, name: &str) -> Option<Arc<dyn BlockKind>> {
        self.kinds.get(name).cloned()
    }

    /// The kind handling `record`, if any
    pub fn kind_for(&self, record: &BlockRecord) -> Option<Arc<dyn BlockKind>> {
        self.kind(record.kind())
    }

    /// Descriptor keys in registration order
    pub fn keys(&self) -> Vec<String> {
        self.catalogue.read().order.clone()
    }

    /// All descriptors in registration order
    pub fn descriptors(&self) -> Vec<BlockTypeDescriptor> {
        let catalogue = self.catalogue.read();
        catalogue
            .order
            .iter()
            .filter_map(|key| catalogue.descriptors.get(key).cloned())
            .collect()
    }

    /// Descriptor keys grouped for the sidebar, groups in first-seen order
    pub fn groups(&self) -> Vec<(String, Vec<String>)> {
        let mut groups: Vec<(String, Vec<String>)> = Vec::new();
        for descriptor in self.descriptors() {
            match groups.iter_mut().find(|(name, _)| *name == descriptor.group) {
                Some((_, keys)) => keys.push(descriptor.key),
                None => groups.push((descriptor.group, vec![descriptor.key])),
            }
        }
        groups
    }

    /// Search descriptors by query string
    ///
    /// Matches key, label and group, case-insensitive.
    pub fn search(&self, query: &str) -> Vec<BlockTypeDescriptor> {
        let query = query.to_lowercase();
        self.descriptors()
            .into_iter()
            .filter(|d| {
                d.key.to_lowercase().contains(&query)
                    || d.label.to_lowercase().contains(&query)
                    || d.group.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Get the number of registered descriptors
    pub fn count(&self) -> usize {
        self.catalogue.read().descriptors.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.catalogue.read().descriptors.contains_key(key)
    }

    /// Premium membership, from the fixed set rather than the descriptor table
    pub fn is_premium(&self, kind: &str) -> bool {
        categories::is_premium(kind)
    }

    fn validate_descriptor(&self, descriptor: &BlockTypeDescriptor) -> Result<(), RegistryError> {
        if descriptor.key.trim().is_empty() {
            return Err(RegistryError::ValidationError(
                "Descriptor key cannot be empty".into(),
            ));
        }

        if !descriptor.defaults.is_valid() {
            return Err(RegistryError::ValidationError(format!(
                "Default record for '{}' has no tag",
                descriptor.key
            )));
        }

        if !self.kinds.contains_key(descriptor.defaults.kind()) {
            return Err(RegistryError::UnknownKind(
                descriptor.defaults.kind().to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry error types
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a key that already exists
    #[error("Duplicate descriptor key: {0}")]
    DuplicateDescriptor(String),

    /// The default record names a kind with no codec
    #[error("No block kind handles '{0}'")]
    UnknownKind(String),

    /// Descriptor validation failed
    #[error("Validation error: {0}")]
    ValidationError(String),
}
