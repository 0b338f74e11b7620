//! Authoritative world state: the chunk cache with its mutation log, and
//! container inventories keyed by block position. Generation itself lives
//! in `voxelcast-worldgen`;
//! this crate owns what happens to chunks after they exist.

pub mod chunk;
pub mod inventory;
pub mod store;

pub use chunk::{Chunk, ChunkState};
pub use inventory::{InventoryStore, INVENTORY_SIZE};
pub use store::ChunkStore;
