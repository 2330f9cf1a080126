//! Block store: the ordered list every editor operation mutates

use crate::core::StoredBlock;

/// Ordered block list owned by one editor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockStore {
    blocks: Vec<StoredBlock>,
}

impl BlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block. Content records without a tag are refused.
    pub fn push(&mut self, block: StoredBlock) -> bool {
        if !admissible(&block) {
            return false;
        }
        self.blocks.push(block);
        true
    }

    /// Insert at `index`, clamped to the end of the list
    pub fn insert(&mut self, index: usize, block: StoredBlock) -> bool {
        if !admissible(&block) {
            return false;
        }
        let index = index.min(self.blocks.len());
        self.blocks.insert(index, block);
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<StoredBlock> {
        (index < self.blocks.len()).then(|| self.blocks.remove(index))
    }

    /// Move the block at `from` so it ends up at `to`
    pub fn move_block(&mut self, from: usize, to: usize) -> bool {
        let len = self.blocks.len();
        if from >= len || to >= len {
            return false;
        }
        let block = self.blocks.remove(from);
        self.blocks.insert(to, block);
        true
    }

    pub fn get(&self, index: usize) -> Option<&StoredBlock> {
        self.blocks.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut StoredBlock> {
        self.blocks.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoredBlock> {
        self.blocks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut StoredBlock> {
        self.blocks.iter_mut()
    }

    pub fn as_slice(&self) -> &[StoredBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Wholesale replacement, as on import
    pub fn replace_all(&mut self, blocks: impl IntoIterator<Item = StoredBlock>) {
        self.blocks = blocks.into_iter().filter(admissible).collect();
    }
}

fn admissible(block: &StoredBlock) -> bool {
    match block {
        StoredBlock::Content(record) => record.is_valid(),
        StoredBlock::Locked(_) => true,
    }
}
