use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use voxelcast_common::blocks::BlockId;
use voxelcast_common::coords::{
    chunk_containing, flat_index, local_offset, BlockPos, ChunkPos, CHUNK_HEIGHT, CHUNK_WIDTH,
};
use voxelcast_common::types::Position;
use voxelcast_common::{Result, VoxelcastError};
use voxelcast_worldgen::{GeneratedChunk, WorldGenerator};

use crate::chunk::Chunk;

/// Bounded chunk cache plus the append-only record of player edits.
///
/// The cache may evict any chunk at any time; the edit log never forgets.
/// Regeneration runs the same deterministic generator and replays the
/// chunk's edits, so eviction is invisible to clients.
pub struct ChunkStore {
    generator: Arc<WorldGenerator>,
    chunks: LruCache<ChunkPos, Chunk>,
    edits: HashMap<ChunkPos, HashMap<usize, BlockId>>,
}

impl ChunkStore {
    pub fn new(generator: Arc<WorldGenerator>, capacity: NonZeroUsize) -> Self {
        Self {
            generator,
            chunks: LruCache::new(capacity),
            edits: HashMap::new(),
        }
    }

    pub fn generator(&self) -> &Arc<WorldGenerator> {
        &self.generator
    }

    /// Returns the chunk at `position`, generating it in place when it is
    /// not resident. Synchronous path; the server offloads generation and
    /// uses [`ChunkStore::insert_generated`] instead.
    pub fn get_or_generate(&mut self, position: ChunkPos) -> &Chunk {
        let generator = &self.generator;
        let edits = self.edits.get(&position);
        self.chunks.get_or_insert(position, || {
            Chunk::from_generated(position, generator.generate(position), edits)
        })
    }

    /// Cache lookup that refreshes recency. `None` means the caller must
    /// generate the chunk and hand it back through
    /// [`ChunkStore::insert_generated`].
    pub fn get(&mut self, position: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&position)
    }

    /// Adopts a chunk generated outside the lock. First insert wins: when
    /// two tasks race to generate the same chunk, the copy already in the
    /// cache is kept so applied mutations are never rolled back.
    pub fn insert_generated(&mut self, position: ChunkPos, generated: GeneratedChunk) -> &Chunk {
        let edits = self.edits.get(&position);
        self.chunks
            .get_or_insert(position, || Chunk::from_generated(position, generated, edits))
    }

    /// Applies a single block edit in world-space coordinates. The edit is
    /// logged for replay regardless of whether the owning chunk is resident.
    pub fn apply_mutation(&mut self, block: BlockPos, block_type: BlockId) -> Result<()> {
        if block.y < 0 || block.y >= CHUNK_HEIGHT {
            return Err(VoxelcastError::OutOfBounds {
                x: block.x,
                y: block.y,
                z: block.z,
            });
        }

        let position = chunk_containing(block);
        let (x, y, z) = local_offset(block);
        let index = flat_index(x, y, z);

        // Last write wins in the log, matching what the cached grid holds.
        self.edits.entry(position).or_default().insert(index, block_type);
        if let Some(chunk) = self.chunks.get_mut(&position) {
            chunk.blocks[index] = block_type;
        }
        Ok(())
    }

    /// Deterministic spawn point for a login: a column in the origin chunk
    /// picked by a hash of the name, two blocks above the terrain there.
    pub fn spawn_position(&mut self, login: &str) -> Position {
        let mut rng = fastrand::Rng::with_seed(login_hash(login));
        let x = rng.i32(0..CHUNK_WIDTH);
        let z = rng.i32(0..CHUNK_WIDTH);
        let chunk = self.get_or_generate(ChunkPos::new(0, 0, 0));
        let y = chunk.surface_height(x, z) + 2;
        Position::new(f64::from(x) + 0.5, f64::from(y), f64::from(z) + 0.5)
    }
}

fn login_hash(login: &str) -> u64 {
    let mut h: u64 = 0xCBF2_9CE4_8422_2325;
    for byte in login.bytes() {
        h ^= u64::from(byte);
        h = h.wrapping_mul(0x0000_0100_0000_01B3);
    }
    h
}
