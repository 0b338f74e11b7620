use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use voxelcast_common::blocks::{self, BlockId};
use voxelcast_common::coords::{flat_index, ChunkPos, CHUNK_HEIGHT};
use voxelcast_worldgen::GeneratedChunk;

/// Lifecycle of a chunk as a client sees it, from the moment it is asked
/// for to the moment its geometry is live. The server only ever holds
/// chunks in the `Generated` state; the later states belong to the
/// client-side pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChunkState {
    Requested,
    Generated,
    MeshBuilding,
    Loaded,
    Active,
}

/// One resident 16x256x16 chunk. `water` and `flora` are sparse overlay
/// grids sharing the block array's flatten order; base terrain edits land
/// in `blocks` only.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub position: ChunkPos,
    pub blocks: Vec<BlockId>,
    pub water: Vec<BlockId>,
    pub flora: Vec<BlockId>,
    pub state: ChunkState,
}

impl Chunk {
    /// Wraps a generator run, replaying any surviving edits on top so a
    /// regenerated chunk is indistinguishable from one that never left
    /// the cache.
    pub fn from_generated(
        position: ChunkPos,
        generated: GeneratedChunk,
        edits: Option<&HashMap<usize, BlockId>>,
    ) -> Self {
        let mut chunk = Self {
            position,
            blocks: generated.blocks,
            water: generated.water,
            flora: generated.flora,
            state: ChunkState::Generated,
        };
        if let Some(edits) = edits {
            for (&index, &block) in edits {
                chunk.blocks[index] = block;
            }
        }
        chunk
    }

    /// Top-down scan for the highest solid block in a column. Returns 0
    /// for a column of pure air, which only happens in degenerate
    /// profiles.
    pub fn surface_height(&self, x: i32, z: i32) -> i32 {
        for y in (0..CHUNK_HEIGHT).rev() {
            if !blocks::is_air(self.blocks[flat_index(x, y, z)]) {
                return y;
            }
        }
        0
    }
}
