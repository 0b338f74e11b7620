use serde::{Deserialize, Serialize};

use crate::types::Position;

/// Horizontal extent of a chunk, in blocks. Also its depth.
pub const CHUNK_WIDTH: i32 = 16;
/// Vertical extent of a chunk, in blocks.
pub const CHUNK_HEIGHT: i32 = 256;
/// Number of blocks in one chunk's dense array.
pub const CHUNK_VOLUME: usize = (CHUNK_WIDTH * CHUNK_WIDTH * CHUNK_HEIGHT) as usize;

/// Coordinate of one 16x256x16 chunk column. The vertical component is
/// carried on the wire but is always 0 in the current world layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ChunkPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// World-space block coordinate of this chunk's (0, 0, 0) corner.
    pub fn origin(&self) -> BlockPos {
        BlockPos {
            x: self.x * CHUNK_WIDTH,
            y: 0,
            z: self.z * CHUNK_WIDTH,
        }
    }
}

/// Integer world-space block coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Floors a world-space position to the block containing it.
    pub fn containing(position: Position) -> Self {
        Self {
            x: position.x.floor() as i32,
            y: position.y.floor() as i32,
            z: position.z.floor() as i32,
        }
    }
}

/// Chunk that owns a world-space block. Division floors toward negative
/// infinity, so world x = -1 lands in chunk x = -1, not chunk 0.
pub fn chunk_containing(block: BlockPos) -> ChunkPos {
    ChunkPos {
        x: block.x.div_euclid(CHUNK_WIDTH),
        y: block.y.div_euclid(CHUNK_HEIGHT),
        z: block.z.div_euclid(CHUNK_WIDTH),
    }
}

/// Offset of a world-space block inside its owning chunk.
pub fn local_offset(block: BlockPos) -> (i32, i32, i32) {
    (
        block.x.rem_euclid(CHUNK_WIDTH),
        block.y.rem_euclid(CHUNK_HEIGHT),
        block.z.rem_euclid(CHUNK_WIDTH),
    )
}

/// The flatten formula every component shares: x + z*W + y*W*W with W = 16.
/// Callers must pass local coordinates already inside the chunk extent.
pub fn flat_index(x: i32, y: i32, z: i32) -> usize {
    (x + z * CHUNK_WIDTH + y * CHUNK_WIDTH * CHUNK_WIDTH) as usize
}

/// Inverse of [`flat_index`].
pub fn from_flat_index(index: usize) -> (i32, i32, i32) {
    let i = index as i32;
    let x = i % CHUNK_WIDTH;
    let z = (i / CHUNK_WIDTH) % CHUNK_WIDTH;
    let y = i / (CHUNK_WIDTH * CHUNK_WIDTH);
    (x, y, z)
}

/// True when a local coordinate lies inside one chunk's extent.
pub fn in_chunk_bounds(x: i32, y: i32, z: i32) -> bool {
    (0..CHUNK_WIDTH).contains(&x) && (0..CHUNK_HEIGHT).contains(&y) && (0..CHUNK_WIDTH).contains(&z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_world_x_floors_to_negative_chunk() {
        assert_eq!(chunk_containing(BlockPos::new(-1, 0, 0)).x, -1);
        assert_eq!(chunk_containing(BlockPos::new(-16, 0, 0)).x, -1);
        assert_eq!(chunk_containing(BlockPos::new(-17, 0, 0)).x, -2);
        assert_eq!(chunk_containing(BlockPos::new(0, 0, 0)).x, 0);
        assert_eq!(chunk_containing(BlockPos::new(15, 0, 0)).x, 0);
        assert_eq!(chunk_containing(BlockPos::new(16, 0, 0)).x, 1);
    }

    #[test]
    fn test_local_offset_is_always_in_bounds() {
        let (x, y, z) = local_offset(BlockPos::new(-1, 70, -33));
        assert_eq!((x, y, z), (15, 70, 15));
        assert!(in_chunk_bounds(x, y, z));
    }

    #[test]
    fn test_flat_index_round_trip() {
        for &(x, y, z) in &[(0, 0, 0), (15, 0, 0), (0, 255, 15), (7, 64, 9)] {
            let index = flat_index(x, y, z);
            assert!(index < CHUNK_VOLUME);
            assert_eq!(from_flat_index(index), (x, y, z));
        }
    }

    #[test]
    fn test_flat_index_order_matches_wire_layout() {
        // x advances fastest, then z, then y.
        assert_eq!(flat_index(1, 0, 0), 1);
        assert_eq!(flat_index(0, 0, 1), 16);
        assert_eq!(flat_index(0, 1, 0), 256);
    }

    #[test]
    fn test_block_pos_containing_floors() {
        let block = BlockPos::containing(Position::new(-0.5, 64.9, 15.2));
        assert_eq!(block, BlockPos::new(-1, 64, 15));
    }
}
