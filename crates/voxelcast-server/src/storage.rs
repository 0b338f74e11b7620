use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use voxelcast_common::types::{ItemSlot, Position, Rotation};
use voxelcast_common::{Result, VoxelcastError};
use voxelcast_world::INVENTORY_SIZE;

/// Everything persisted about one player. Records written before the
/// inventory field existed deserialize with a fresh set of empty slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub login: String,
    pub password: String,
    pub position: Position,
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(default = "empty_inventory")]
    pub inventory: Vec<ItemSlot>,
}

fn empty_inventory() -> Vec<ItemSlot> {
    vec![ItemSlot::empty(); INVENTORY_SIZE]
}

impl PlayerRecord {
    pub fn new(login: String, password: String, position: Position) -> Self {
        Self {
            login,
            password,
            position,
            rotation: Rotation::default(),
            inventory: empty_inventory(),
        }
    }
}

/// On-disk player registry: a JSON array of records, loaded whole at
/// startup and rewritten whole on save.
pub struct PlayerStore {
    path: PathBuf,
    records: HashMap<String, PlayerRecord>,
}

impl PlayerStore {
    /// Loads the registry, starting empty when the file does not exist
    /// yet.
    pub fn load(path: &Path) -> Result<Self> {
        let records = if path.exists() {
            let data = fs::read_to_string(path)?;
            let list: Vec<PlayerRecord> = serde_json::from_str(&data)
                .map_err(|err| VoxelcastError::ServerError(err.to_string()))?;
            list.into_iter()
                .map(|record| (record.login.clone(), record))
                .collect()
        } else {
            HashMap::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    pub fn save(&self) -> Result<()> {
        let list: Vec<&PlayerRecord> = self.records.values().collect();
        let data = serde_json::to_string_pretty(&list)
            .map_err(|err| VoxelcastError::ServerError(err.to_string()))?;
        fs::write(&self.path, data)?;
        Ok(())
    }

    pub fn get(&self, login: &str) -> Option<&PlayerRecord> {
        self.records.get(login)
    }

    pub fn insert(&mut self, record: PlayerRecord) {
        self.records.insert(record.login.clone(), record);
    }

    pub fn update_position(&mut self, login: &str, position: Position) {
        if let Some(record) = self.records.get_mut(login) {
            record.position = position;
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
