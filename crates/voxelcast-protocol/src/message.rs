use serde::{Deserialize, Serialize};

use voxelcast_common::blocks::BlockId;
use voxelcast_common::coords::{BlockPos, ChunkPos};
use voxelcast_common::types::{ItemSlot, Position};

/// Everything a client may send. An unknown `type` tag fails to decode;
/// the server logs it and keeps the connection open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Connect {
        login: String,
        password: String,
    },
    GetChunk {
        position: ChunkPos,
    },
    Move {
        position: Position,
    },
    GetPlayers,
    PlaceBlock {
        position: BlockPos,
        block_type: BlockId,
    },
    DestroyBlock {
        position: BlockPos,
    },
    /// Container positions arrive as floats; the handler floors them to
    /// the owning block.
    GetInventory {
        position: Position,
    },
    SetInventory {
        position: Position,
        inventory: Vec<ItemSlot>,
    },
}

/// One row of a `players_list` reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub player_id: String,
    pub position: Position,
}

/// Everything the server may send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Connected {
        position: Position,
        inventory: Vec<ItemSlot>,
    },
    ChunkData {
        position: ChunkPos,
        blocks: Vec<BlockId>,
        water_chunk: Vec<BlockId>,
        flora_chunk: Vec<BlockId>,
    },
    PlayerConnected {
        player_id: String,
        position: Position,
    },
    PlayerMoved {
        player_id: String,
        position: Position,
    },
    PlayerDisconnected {
        player_id: String,
    },
    PlayersList {
        players: Vec<PlayerEntry>,
    },
    BlockUpdate {
        position: BlockPos,
        block_type: BlockId,
    },
    Inventory {
        position: Position,
        inventory: Vec<ItemSlot>,
    },
}
