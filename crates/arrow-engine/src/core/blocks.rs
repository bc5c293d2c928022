use glam::Vec2;

use crate::api::types::BlockId;
use crate::core::block::Block;

/// Block storage using a flat Vec in registration order.
/// Designed for level-sized block counts (hundreds, not millions).
pub struct BlockSet {
    blocks: Vec<(BlockId, Block)>,
    next_id: u32,
}

impl BlockSet {
    pub fn new() -> Self {
        Self {
            blocks: Vec::with_capacity(128),
            next_id: 1,
        }
    }

    /// Add a block. Returns its id; ids are never reused.
    pub fn register(&mut self, block: Block) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        self.blocks.push((id, block));
        id
    }

    /// Remove a block by id, keeping the order of the rest.
    pub fn deregister(&mut self, id: BlockId) -> Option<Block> {
        let idx = self.blocks.iter().position(|(bid, _)| *bid == id)?;
        Some(self.blocks.remove(idx).1)
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|(bid, _)| *bid == id).map(|(_, b)| b)
    }

    pub fn get_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.blocks
            .iter_mut()
            .find(|(bid, _)| *bid == id)
            .map(|(_, b)| b)
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &Block)> {
        self.blocks.iter().map(|(id, b)| (*id, b))
    }

    /// Copy of the current ids in registration order.
    /// Scans that may run callbacks iterate this instead of the live Vec.
    pub fn ids(&self) -> Vec<BlockId> {
        self.blocks.iter().map(|(id, _)| *id).collect()
    }

    /// The respawn anchor: the first registered block flagged `spawn`.
    pub fn first_spawn(&self) -> Option<&Block> {
        self.blocks
            .iter()
            .map(|(_, b)| b)
            .find(|b| b.flags.spawn)
    }

    /// Find the first block with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<BlockId> {
        self.blocks
            .iter()
            .find(|(_, b)| b.tag == tag)
            .map(|(id, _)| *id)
    }

    /// Every block containing `point`, in registration order.
    pub fn hit_test(&self, point: Vec2) -> Vec<BlockId> {
        self.blocks
            .iter()
            .filter(|(_, b)| b.rect.contains_point(point))
            .map(|(id, _)| *id)
            .collect()
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
}

impl Default for BlockSet {
    fn default() -> Self {
        Self::new()
    }
}
