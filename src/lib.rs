//! Block Editor - document model and license-gated codec for the article builder
//!
//! This crate provides the block document model behind the article builder:
//! the per-kind text codec, markup renderer, JSON/markup importer, the
//! license gate with its tamper-evident signatures, and the editor runtime
//! that ties them to an ordered block store.

pub mod categories;
pub mod config;
pub mod core;
pub mod import;
pub mod license;
pub mod render;
pub mod runtime;
pub mod theme;

#[cfg(test)]
mod tests;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

// Re-export commonly used types
pub use config::EditorOptions;
pub use crate::core::{BlockRecord, EditorId, LockedBlockRecord, StoredBlock};
pub use crate::core::registry::Registry;
pub use license::LicenseGate;
pub use render::premium::PremiumModule;
pub use runtime::{Editor, EditorError, EditorManager};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
