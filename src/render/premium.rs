//! Premium renderer capability
//!
//! The premium module is injected after construction as an
//! `Arc<dyn PremiumRenderer>` together with its descriptors. Its presence is
//! half of the gate's decision; the other half is the entitlement flag.

use std::sync::Arc;

use crate::categories;
use crate::core::block::BlockKind;
use crate::core::registry::BlockTypeDescriptor;
use crate::core::BlockRecord;

/// Renders premium kinds when the gate grants access
pub trait PremiumRenderer: Send + Sync {
    fn render(&self, kind: &dyn BlockKind, record: &BlockRecord) -> String;
}

/// Renders premium kinds with the built-in codec markup
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPremiumRenderer;

impl PremiumRenderer for StandardPremiumRenderer {
    fn render(&self, kind: &dyn BlockKind, record: &BlockRecord) -> String {
        kind.render(record)
    }
}

/// What the premium module hands back when it registers
#[derive(Clone)]
pub struct PremiumModule {
    pub descriptors: Vec<BlockTypeDescriptor>,
    pub renderer: Arc<dyn PremiumRenderer>,
}

impl PremiumModule {
    pub fn new(descriptors: Vec<BlockTypeDescriptor>, renderer: Arc<dyn PremiumRenderer>) -> Self {
        Self {
            descriptors,
            renderer,
        }
    }

    /// Every premium kind with the standard renderer
    pub fn standard() -> Self {
        Self::new(
            categories::premium_descriptors(),
            Arc::new(StandardPremiumRenderer),
        )
    }
}

impl std::fmt::Debug for PremiumModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PremiumModule")
            .field("descriptors", &self.descriptors.len())
            .finish()
    }
}
