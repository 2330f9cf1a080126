//! Renderer: block records to markup
//!
//! Free kinds render through their [`BlockKind`]. Premium kinds go through
//! the license gate: granted access renders through the premium capability
//! inside a signed wrapper, denied access renders a fixed placeholder that
//! carries only the kind name.

pub mod premium;

use tracing::debug;

use crate::core::block::{escape, BlockKind};
use crate::core::registry::Registry;
use crate::core::{BlockRecord, StoredBlock};
use crate::license::lock::seal;
use crate::license::{Decision, LicenseGate};
use crate::theme::Theme;

pub const PREMIUM_WRAPPER_CLASS: &str = "ef-premium-block";
pub const LOCKED_PLACEHOLDER_CLASS: &str = "ef-premium-locked";
pub const DOCUMENT_ROOT_CLASS: &str = "ef-preview-container";

const LOCKED_NOTICE: &str = "This premium block requires an active license to display.";

/// Renders records against one editor's registry and gate
pub struct Renderer<'a> {
    registry: &'a Registry,
    gate: &'a LicenseGate,
}

impl<'a> Renderer<'a> {
    pub fn new(registry: &'a Registry, gate: &'a LicenseGate) -> Self {
        Self { registry, gate }
    }

    /// Render one record. Invalid records and unknown kinds render nothing.
    pub fn render_record(&self, record: &BlockRecord) -> String {
        if !record.is_valid() {
            return String::new();
        }
        let Some(kind) = self.registry.kind_for(record) else {
            debug!(kind = record.kind(), "no renderer for block kind");
            return String::new();
        };

        match self.gate.decide(kind.name()) {
            Decision::Free => kind.render(record),
            Decision::Granted => self.signed(kind.as_ref(), record),
            Decision::Denied => placeholder(kind.name()),
        }
    }

    pub fn render_block(&self, block: &StoredBlock) -> String {
        match block {
            StoredBlock::Content(record) => self.render_record(record),
            StoredBlock::Locked(locked) => placeholder(&locked.locked_type),
        }
    }

    /// Concatenated fragments, no document wrapper
    pub fn render_blocks<'b>(&self, blocks: impl IntoIterator<Item = &'b StoredBlock>) -> String {
        blocks.into_iter().map(|b| self.render_block(b)).collect()
    }

    /// Full export: fragments inside the themed document root
    pub fn render_document<'b>(
        &self,
        blocks: impl IntoIterator<Item = &'b StoredBlock>,
        theme: &Theme,
    ) -> String {
        format!(
            "<div class=\"{}\" style=\"{}\">\n{}</div>",
            DOCUMENT_ROOT_CLASS,
            escape(&theme.style()),
            self.render_blocks(blocks)
        )
    }

    fn signed(&self, kind: &dyn BlockKind, record: &BlockRecord) -> String {
        let inner = match self.gate.premium() {
            Some(premium) => premium.render(kind, record),
            None => kind.render(record),
        };
        let (payload, signature) = seal(record, self.gate.signer());
        format!(
            "  <div class=\"{}\" data-premium=\"true\" data-block-type=\"{}\" data-signature=\"{}\" data-payload=\"{}\">\n{}  </div>\n",
            PREMIUM_WRAPPER_CLASS,
            escape(kind.name()),
            signature,
            payload,
            inner
        )
    }
}

/// Content-free stand-in for a premium block
pub fn placeholder(kind: &str) -> String {
    format!(
        "  <div class=\"{}\" data-locked-type=\"{}\">\n    <p class=\"ef-premium-locked-notice\">{}</p>\n  </div>\n",
        LOCKED_PLACEHOLDER_CLASS,
        escape(kind),
        LOCKED_NOTICE
    )
}
