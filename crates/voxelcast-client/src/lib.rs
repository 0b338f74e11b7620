//! Client-side chunk streaming: which chunks to ask the server for, and
//! how fast arriving chunk data is handed to mesh building.

pub mod streaming;

pub use streaming::{ReadyChunk, StreamingScheduler, MAX_SPAWN_PER_TICK};
