//! Flat-to-grid chunk codec. The wire carries one dense array per chunk
//! layer in x + z*16 + y*256 order; clients rebuild the `[x][y][z]` grid
//! they index meshes with.

use voxelcast_common::blocks::BlockId;
use voxelcast_common::coords::{flat_index, CHUNK_HEIGHT, CHUNK_VOLUME, CHUNK_WIDTH};
use voxelcast_common::{Result, VoxelcastError};

/// Client-side block grid, indexed `[x][y][z]`.
pub type Grid3 = Vec<Vec<Vec<BlockId>>>;

/// Rebuilds the 3D grid from a wire array. Rejects any length other than
/// exactly one chunk volume.
pub fn decode_blocks(flat: &[BlockId]) -> Result<Grid3> {
    if flat.len() != CHUNK_VOLUME {
        return Err(VoxelcastError::ProtocolError(format!(
            "chunk array has {} blocks, expected {}",
            flat.len(),
            CHUNK_VOLUME
        )));
    }

    let mut grid =
        vec![vec![vec![0; CHUNK_WIDTH as usize]; CHUNK_HEIGHT as usize]; CHUNK_WIDTH as usize];
    for x in 0..CHUNK_WIDTH {
        for y in 0..CHUNK_HEIGHT {
            for z in 0..CHUNK_WIDTH {
                grid[x as usize][y as usize][z as usize] = flat[flat_index(x, y, z)];
            }
        }
    }
    Ok(grid)
}

/// Inverse of [`decode_blocks`].
pub fn encode_blocks(grid: &Grid3) -> Vec<BlockId> {
    let mut flat = vec![0; CHUNK_VOLUME];
    for x in 0..CHUNK_WIDTH {
        for y in 0..CHUNK_HEIGHT {
            for z in 0..CHUNK_WIDTH {
                flat[flat_index(x, y, z)] = grid[x as usize][y as usize][z as usize];
            }
        }
    }
    flat
}
