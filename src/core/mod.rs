//! Core block abstractions and types
//!
//! This module defines the block record that every other component agrees on,
//! the degraded locked form used for premium content without an entitlement,
//! and the identifiers used by the editor manager.

pub mod block;
pub mod fields;
pub mod markup;
pub mod registry;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Discriminator carried by locked records in exported JSON.
pub const LOCKED_TYPE: &str = "premium-locked";

/// Unique identifier for a live editor instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditorId(pub Uuid);

impl EditorId {
    /// Generate a new random editor ID
    pub fn new() -> Self {
        EditorId(Uuid::new_v4())
    }
}

impl Default for EditorId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EditorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ef-editor-{}", self.0)
    }
}

fn default_layout() -> String {
    "column".into()
}

/// One unit of content.
///
/// `text` holds every variant-specific value encoded with the per-kind
/// grammar in [`crate::categories`]. Fields the codec does not know about are
/// kept in `extra` so JSON imports pass them through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    /// Structural role (`h2`, `p`, `ol`, `table`, `div`, ...)
    pub tag: String,
    /// Variant discriminator when `tag` alone is ambiguous
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub block_type: Option<String>,
    /// Encoded variant data
    #[serde(default)]
    pub text: String,
    /// Presentation hint, not interpreted by the codec
    #[serde(default)]
    pub class: String,
    /// Presentation hint, not interpreted by the codec
    #[serde(default = "default_layout")]
    pub layout: String,
    /// Provenance note attached by the importer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Unrecognised fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BlockRecord {
    /// Create a record with the given tag and empty content
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            block_type: None,
            text: String::new(),
            class: String::new(),
            layout: default_layout(),
            note: None,
            extra: Map::new(),
        }
    }

    pub fn with_type(mut self, block_type: impl Into<String>) -> Self {
        self.block_type = Some(block_type.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = layout.into();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// The dispatch key: `type` when present, otherwise `tag`.
    pub fn kind(&self) -> &str {
        match &self.block_type {
            Some(t) if !t.is_empty() => t,
            _ => &self.tag,
        }
    }

    /// A record without a tag is invalid and must be skipped.
    pub fn is_valid(&self) -> bool {
        !self.tag.trim().is_empty()
    }

    /// Deserialize a record from an arbitrary JSON value.
    ///
    /// Returns `None` for anything that is not an object with a non-empty
    /// string `tag`.
    pub fn from_value(value: Value) -> Option<Self> {
        let has_tag = value
            .get("tag")
            .and_then(Value::as_str)
            .is_some_and(|t| !t.trim().is_empty());
        if !has_tag {
            return None;
        }
        serde_json::from_value(value).ok()
    }

    /// Canonical serialized form used for signing and payload embedding.
    pub fn serialized(&self) -> String {
        // A struct of strings and a JSON map cannot fail to serialize.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Degraded form of a premium record shown when no entitlement is present.
///
/// The original content is only reachable through `encrypted` (base64 of the
/// serialized record), which is never written to render or export surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockedBlockRecord {
    /// Kind of the original record
    pub locked_type: String,
    /// Retained payload, base64 of the serialized original
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted: Option<String>,
    /// Signature over the serialized original
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default)]
    pub note: String,
}

impl LockedBlockRecord {
    pub fn new(locked_type: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            locked_type: locked_type.into(),
            encrypted: None,
            signature: None,
            note: note.into(),
        }
    }

    /// Whether the original can still be restored by re-validation.
    pub fn has_payload(&self) -> bool {
        self.encrypted.is_some() && self.signature.is_some()
    }

    /// Export-safe view: type, locked type and note only.
    pub fn public_value(&self) -> Value {
        serde_json::json!({
            "type": LOCKED_TYPE,
            "lockedType": self.locked_type,
            "note": self.note,
        })
    }

    /// Full value including the retained payload, for in-memory snapshots.
    pub fn to_value(&self) -> Value {
        let mut value = self.public_value();
        if let Some(obj) = value.as_object_mut() {
            if let Some(encrypted) = &self.encrypted {
                obj.insert("encrypted".into(), Value::String(encrypted.clone()));
            }
            if let Some(signature) = &self.signature {
                obj.insert("signature".into(), Value::String(signature.clone()));
            }
        }
        value
    }
}

/// An entry of the block store: full content or a locked placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredBlock {
    Content(BlockRecord),
    Locked(LockedBlockRecord),
}

impl StoredBlock {
    /// Classify a JSON value.
    ///
    /// Objects with `type = "premium-locked"` become locked records, objects
    /// with a tag become content, everything else is rejected.
    pub fn from_value(value: Value) -> Option<Self> {
        let is_locked = value.get("type").and_then(Value::as_str) == Some(LOCKED_TYPE);
        if is_locked {
            return serde_json::from_value::<LockedBlockRecord>(value)
                .ok()
                .map(StoredBlock::Locked);
        }
        BlockRecord::from_value(value).map(StoredBlock::Content)
    }

    /// Kind of the content, or of the original for locked records
    pub fn kind(&self) -> &str {
        match self {
            StoredBlock::Content(record) => record.kind(),
            StoredBlock::Locked(locked) => &locked.locked_type,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, StoredBlock::Locked(_))
    }

    pub fn as_content(&self) -> Option<&BlockRecord> {
        match self {
            StoredBlock::Content(record) => Some(record),
            StoredBlock::Locked(_) => None,
        }
    }

    pub fn as_locked(&self) -> Option<&LockedBlockRecord> {
        match self {
            StoredBlock::Locked(locked) => Some(locked),
            StoredBlock::Content(_) => None,
        }
    }
}

impl From<BlockRecord> for StoredBlock {
    fn from(record: BlockRecord) -> Self {
        StoredBlock::Content(record)
    }
}

impl From<LockedBlockRecord> for StoredBlock {
    fn from(locked: LockedBlockRecord) -> Self {
        StoredBlock::Locked(locked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_prefers_type() {
        let record = BlockRecord::new("div").with_type("tip-info");
        assert_eq!(record.kind(), "tip-info");

        let heading = BlockRecord::new("h2");
        assert_eq!(heading.kind(), "h2");
    }

    #[test]
    fn test_from_value_requires_tag() {
        assert!(BlockRecord::from_value(json!({ "text": "orphan" })).is_none());
        assert!(BlockRecord::from_value(json!({ "tag": "", "text": "x" })).is_none());
        assert!(BlockRecord::from_value(json!("not an object")).is_none());

        let record = BlockRecord::from_value(json!({ "tag": "p", "text": "hello" })).unwrap();
        assert_eq!(record.text, "hello");
        assert_eq!(record.layout, "column");
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let value = json!({ "tag": "p", "text": "x", "class": "", "layout": "column", "id": 42 });
        let record = BlockRecord::from_value(value.clone()).unwrap();
        assert_eq!(record.extra.get("id"), Some(&json!(42)));
        assert_eq!(serde_json::to_value(&record).unwrap(), value);
    }

    #[test]
    fn test_stored_block_classification() {
        let locked = StoredBlock::from_value(json!({
            "type": "premium-locked",
            "lockedType": "tip-info",
            "note": "locked"
        }))
        .unwrap();
        assert!(locked.is_locked());
        assert_eq!(locked.kind(), "tip-info");

        let content = StoredBlock::from_value(json!({ "tag": "h2", "text": "Title" })).unwrap();
        assert!(!content.is_locked());

        assert!(StoredBlock::from_value(json!({ "type": "tip-info" })).is_none());
    }

    #[test]
    fn test_public_value_hides_payload() {
        let mut locked = LockedBlockRecord::new("card-basic", "requires license");
        locked.encrypted = Some("c2VjcmV0".into());
        locked.signature = Some("deadbeef".into());

        let public = locked.public_value();
        assert!(public.get("encrypted").is_none());
        assert!(public.get("signature").is_none());
        assert_eq!(public["type"], LOCKED_TYPE);

        let full = locked.to_value();
        assert_eq!(full["encrypted"], "c2VjcmV0");
    }

    #[test]
    fn test_editor_id_uniqueness() {
        assert_ne!(EditorId::new(), EditorId::new());
    }
}
