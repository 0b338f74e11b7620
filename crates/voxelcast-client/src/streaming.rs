use std::collections::{HashMap, VecDeque};

use voxelcast_common::blocks::BlockId;
use voxelcast_common::coords::{chunk_containing, BlockPos, ChunkPos};
use voxelcast_common::types::Position;
use voxelcast_common::Result;
use voxelcast_protocol::codec::{decode_blocks, Grid3};
use voxelcast_world::ChunkState;

/// Chunks handed to mesh building per tick. Arrivals beyond this budget
/// wait in the ready queue, so a burst of N chunks spreads over N/4
/// ticks instead of stalling one frame.
pub const MAX_SPAWN_PER_TICK: usize = 4;

/// Decoded chunk data waiting for mesh construction.
pub struct ReadyChunk {
    pub position: ChunkPos,
    pub blocks: Grid3,
    pub water: Grid3,
    pub flora: Grid3,
}

/// Request bookkeeping for the streaming client.
///
/// Requests are fire and forget: a chunk is asked for once and stays
/// `Requested` until its data arrives. `load_distance` bounds what is
/// fetched, `view_distance` bounds what is rendered, and view never
/// exceeds load.
pub struct StreamingScheduler {
    load_distance: i32,
    view_distance: i32,
    states: HashMap<ChunkPos, ChunkState>,
    ready: VecDeque<ReadyChunk>,
}

impl StreamingScheduler {
    pub fn new(load_distance: i32, view_distance: i32) -> Self {
        Self {
            load_distance,
            view_distance: view_distance.min(load_distance),
            states: HashMap::new(),
            ready: VecDeque::new(),
        }
    }

    pub fn load_distance(&self) -> i32 {
        self.load_distance
    }

    pub fn view_distance(&self) -> i32 {
        self.view_distance
    }

    fn player_chunk(position: Position) -> ChunkPos {
        let mut chunk = chunk_containing(BlockPos::containing(position));
        chunk.y = 0;
        chunk
    }

    /// Chunk coordinates to request after a position change: the square of
    /// side 2*load+1 around the player, minus everything already held or
    /// in flight. The returned coords are marked `Requested`.
    pub fn update_position(&mut self, position: Position) -> Vec<ChunkPos> {
        let center = Self::player_chunk(position);
        let mut to_request = Vec::new();
        for dx in -self.load_distance..=self.load_distance {
            for dz in -self.load_distance..=self.load_distance {
                let coord = ChunkPos::new(center.x + dx, 0, center.z + dz);
                if !self.states.contains_key(&coord) {
                    self.states.insert(coord, ChunkState::Requested);
                    to_request.push(coord);
                }
            }
        }
        to_request
    }

    /// Decodes an arriving chunk_data payload and queues it for mesh
    /// building. Unsolicited chunks are adopted the same way.
    pub fn accept(
        &mut self,
        position: ChunkPos,
        blocks: &[BlockId],
        water: &[BlockId],
        flora: &[BlockId],
    ) -> Result<()> {
        let ready = ReadyChunk {
            position,
            blocks: decode_blocks(blocks)?,
            water: decode_blocks(water)?,
            flora: decode_blocks(flora)?,
        };
        self.states.insert(position, ChunkState::Generated);
        self.ready.push_back(ready);
        Ok(())
    }

    /// Pops at most [`MAX_SPAWN_PER_TICK`] decoded chunks, in arrival
    /// order, and marks them `MeshBuilding`.
    pub fn drain_ready(&mut self) -> Vec<ReadyChunk> {
        let mut drained = Vec::new();
        while drained.len() < MAX_SPAWN_PER_TICK {
            match self.ready.pop_front() {
                Some(chunk) => {
                    self.states.insert(chunk.position, ChunkState::MeshBuilding);
                    drained.push(chunk);
                }
                None => break,
            }
        }
        drained
    }

    pub fn mark_loaded(&mut self, position: ChunkPos) {
        self.states.insert(position, ChunkState::Loaded);
    }

    pub fn mark_active(&mut self, position: ChunkPos) {
        self.states.insert(position, ChunkState::Active);
    }

    pub fn state(&self, position: ChunkPos) -> Option<ChunkState> {
        self.states.get(&position).copied()
    }

    /// Held chunks inside the view square around the player: the set
    /// eligible for rendering this tick. In-flight requests are excluded.
    pub fn active_coords(&self, position: Position) -> Vec<ChunkPos> {
        let center = Self::player_chunk(position);
        self.states
            .iter()
            .filter(|(coord, state)| {
                **state != ChunkState::Requested
                    && (coord.x - center.x).abs() <= self.view_distance
                    && (coord.z - center.z).abs() <= self.view_distance
            })
            .map(|(coord, _)| *coord)
            .collect()
    }

    pub fn pending(&self) -> usize {
        self.ready.len()
    }
}
