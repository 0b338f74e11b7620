pub mod blocks;
pub mod coords;
pub mod error;
pub mod types;

pub use error::VoxelcastError;
pub use types::Result;
