use std::sync::Arc;

use tokio::sync::RwLock;
use voxelcast_common::coords::ChunkPos;
use voxelcast_common::types::{ItemSlot, Position};
use voxelcast_common::{Result, VoxelcastError};
use voxelcast_protocol::message::ServerMessage;
use voxelcast_protocol::registry::SessionRegistry;
use voxelcast_world::{Chunk, ChunkStore, InventoryStore};
use voxelcast_worldgen::{GenerationProfile, WorldGenerator};

use crate::config::ServerConfig;
use crate::storage::{PlayerRecord, PlayerStore};

/// Shared server state, one instance per process, handed to every
/// connection task as `Arc<World>`.
pub struct World {
    pub(crate) store: RwLock<ChunkStore>,
    pub(crate) sessions: RwLock<SessionRegistry>,
    pub(crate) inventories: RwLock<InventoryStore>,
    pub(crate) players: RwLock<PlayerStore>,
}

impl World {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let generator = Arc::new(WorldGenerator::new(
            GenerationProfile::default(),
            config.seed,
        )?);
        Ok(Self {
            store: RwLock::new(ChunkStore::new(generator, config.chunk_capacity)),
            sessions: RwLock::new(SessionRegistry::new()),
            inventories: RwLock::new(InventoryStore::new()),
            players: RwLock::new(PlayerStore::load(&config.players_path)?),
        })
    }

    /// Builds the `chunk_data` reply for one chunk, generating it off the
    /// runtime when it is not resident. Generation runs without holding
    /// the store lock; insertion takes the write lock, and the first
    /// insert wins if two requests raced.
    pub async fn chunk_data(&self, position: ChunkPos) -> Result<ServerMessage> {
        {
            let mut store = self.store.write().await;
            if let Some(chunk) = store.get(position) {
                return Ok(encode_chunk(chunk));
            }
        }

        let generator = self.store.read().await.generator().clone();
        let generated = tokio::task::spawn_blocking(move || generator.generate(position))
            .await
            .map_err(|err| VoxelcastError::ServerError(err.to_string()))?;

        let mut store = self.store.write().await;
        let chunk = store.insert_generated(position, generated);
        Ok(encode_chunk(chunk))
    }

    /// Resumes a returning player or creates a fresh record with a
    /// deterministic surface spawn. Returns what `connected` carries.
    pub async fn connect_player(
        &self,
        login: &str,
        password: &str,
    ) -> Result<(Position, Vec<ItemSlot>)> {
        {
            let players = self.players.read().await;
            if let Some(record) = players.get(login) {
                return Ok((record.position, record.inventory.clone()));
            }
        }

        let spawn = self.store.write().await.spawn_position(login);
        let record = PlayerRecord::new(login.to_owned(), password.to_owned(), spawn);
        let inventory = record.inventory.clone();

        let mut players = self.players.write().await;
        players.insert(record);
        players.save()?;
        Ok((spawn, inventory))
    }

    pub async fn save_players(&self) -> Result<()> {
        self.players.read().await.save()
    }
}

fn encode_chunk(chunk: &Chunk) -> ServerMessage {
    ServerMessage::ChunkData {
        position: chunk.position,
        blocks: chunk.blocks.clone(),
        water_chunk: chunk.water.clone(),
        flora_chunk: chunk.flora.clone(),
    }
}
