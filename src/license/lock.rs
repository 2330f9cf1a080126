//! Locking and unlocking premium records
//!
//! A locked record keeps the original as base64 of its serialized form plus a
//! signature over that form. Unlocking decodes the payload, re-verifies the
//! signature and re-parses the record; flipping the entitlement alone never
//! restores content.

use base64::{engine::general_purpose::STANDARD, Engine};

use super::signature::Signer;
use super::{Decision, LicenseGate};
use crate::core::{BlockRecord, LockedBlockRecord, StoredBlock};

pub const NOTE_LICENSE_REQUIRED: &str = "Premium block locked: a valid license is required";
pub const NOTE_TAMPERED: &str = "Premium block locked: signature verification failed, content may have been modified";
pub const NOTE_PLACEHOLDER: &str = "Premium block locked: exported without premium content";
pub const NOTE_LEGACY_RESTORED: &str = "legacy: restored from an unsigned export";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnlockError {
    #[error("premium content requires a license")]
    NotEntitled,

    #[error("locked record carries no payload")]
    MissingPayload,

    #[error("payload is not a valid encoded record: {0}")]
    InvalidPayload(String),

    #[error("signature does not match payload")]
    SignatureMismatch,

    #[error("payload holds a '{found}' record, not the declared '{declared}'")]
    KindMismatch { declared: String, found: String },
}

/// Encode `record` as `(payload, signature)`.
pub fn seal(record: &BlockRecord, signer: &Signer) -> (String, String) {
    let serialized = record.serialized();
    let signature = signer.sign(&serialized);
    (STANDARD.encode(serialized.as_bytes()), signature)
}

/// Decode and verify a sealed payload.
pub fn open(payload: &str, signature: &str, signer: &Signer) -> Result<BlockRecord, UnlockError> {
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| UnlockError::InvalidPayload(e.to_string()))?;
    let serialized =
        String::from_utf8(bytes).map_err(|e| UnlockError::InvalidPayload(e.to_string()))?;

    if !signer.verify(signature, &serialized) {
        return Err(UnlockError::SignatureMismatch);
    }

    let value: serde_json::Value =
        serde_json::from_str(&serialized).map_err(|e| UnlockError::InvalidPayload(e.to_string()))?;
    BlockRecord::from_value(value)
        .ok_or_else(|| UnlockError::InvalidPayload("record has no tag".into()))
}

/// Lock a record, retaining a signed payload. Locked input is returned unchanged.
pub fn lock(block: StoredBlock, signer: &Signer, note: &str) -> StoredBlock {
    match block {
        StoredBlock::Content(record) => StoredBlock::Locked(lock_record(&record, signer, note)),
        locked @ StoredBlock::Locked(_) => locked,
    }
}

pub fn lock_record(record: &BlockRecord, signer: &Signer, note: &str) -> LockedBlockRecord {
    let (payload, signature) = seal(record, signer);
    LockedBlockRecord {
        locked_type: record.kind().to_string(),
        encrypted: Some(payload),
        signature: Some(signature),
        note: note.to_string(),
    }
}

/// Restore a locked record through the gate.
///
/// The gate decides on the kind found in the payload, which must also match
/// the declared `locked_type`.
pub fn unlock(locked: &LockedBlockRecord, gate: &LicenseGate) -> Result<BlockRecord, UnlockError> {
    if gate.decide(&locked.locked_type) == Decision::Denied {
        return Err(UnlockError::NotEntitled);
    }
    let (Some(payload), Some(signature)) = (&locked.encrypted, &locked.signature) else {
        return Err(UnlockError::MissingPayload);
    };
    let record = open(payload, signature, gate.signer())?;
    if record.kind() != locked.locked_type {
        return Err(UnlockError::KindMismatch {
            declared: locked.locked_type.clone(),
            found: record.kind().to_string(),
        });
    }
    if gate.decide(record.kind()) == Decision::Denied {
        return Err(UnlockError::NotEntitled);
    }
    Ok(record)
}
