use std::collections::HashMap;

use voxelcast_common::coords::BlockPos;
use voxelcast_common::types::ItemSlot;

/// Slots in a container inventory.
pub const INVENTORY_SIZE: usize = 27;

/// Container inventories keyed by the block that hosts them. A position
/// that has never stored anything gets a fresh set of empty slots on
/// first access.
#[derive(Debug, Default)]
pub struct InventoryStore {
    inventories: HashMap<BlockPos, Vec<ItemSlot>>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&mut self, position: BlockPos) -> &[ItemSlot] {
        self.inventories
            .entry(position)
            .or_insert_with(|| vec![ItemSlot::empty(); INVENTORY_SIZE])
    }

    /// Replaces a container's contents wholesale. The client owns slot
    /// layout; the server only persists what it is sent.
    pub fn set(&mut self, position: BlockPos, slots: Vec<ItemSlot>) {
        self.inventories.insert(position, slots);
    }
}
