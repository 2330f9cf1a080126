//! Editor runtime
//!
//! This module owns the mutable state: each [`Editor`] holds one
//! [`BlockStore`], and the [`EditorManager`] tracks live editors and the
//! premium module.

pub mod editor;
pub mod manager;
pub mod store;

pub use editor::{Editor, EditorError, ImportSummary};
pub use manager::{EditorManager, EntitlementError, EntitlementGrant, EntitlementValidator};
pub use store::BlockStore;
