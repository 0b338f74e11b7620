use std::env;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use voxelcast_logger::log::log;
use voxelcast_logger::severity::LogSeverity::Warning;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SEED: i32 = 1337;
const DEFAULT_CHUNK_CAPACITY: usize = 4096;
const DEFAULT_PLAYERS_FILE: &str = "players.json";

/// Runtime configuration, read from the environment. Anything unset or
/// unparseable falls back to a default with a logged warning.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub seed: i32,
    pub chunk_capacity: NonZeroUsize,
    pub players_path: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let capacity = parse_var("VOXELCAST_CHUNK_CAPACITY", DEFAULT_CHUNK_CAPACITY).max(1);
        Self {
            port: parse_var("VOXELCAST_PORT", DEFAULT_PORT),
            seed: parse_var("VOXELCAST_SEED", DEFAULT_SEED),
            // max(1) above keeps this constructor total
            chunk_capacity: NonZeroUsize::new(capacity)
                .unwrap_or(NonZeroUsize::MIN),
            players_path: env::var("VOXELCAST_PLAYERS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_PLAYERS_FILE)),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            seed: DEFAULT_SEED,
            chunk_capacity: NonZeroUsize::new(DEFAULT_CHUNK_CAPACITY)
                .unwrap_or(NonZeroUsize::MIN),
            players_path: PathBuf::from(DEFAULT_PLAYERS_FILE),
        }
    }
}

fn parse_var<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                log(
                    format!("Ignoring unparseable {}={:?}", name, raw),
                    Warning,
                );
                default
            }
        },
        Err(_) => default,
    }
}
