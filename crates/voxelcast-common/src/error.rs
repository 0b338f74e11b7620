use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum VoxelcastError {
    IoError(std::io::Error),
    ProtocolError(String),
    ServerError(String),
    /// A block address fell outside the owning chunk's extent. Recoverable:
    /// callers clip or drop the write instead of indexing out of bounds.
    OutOfBounds { x: i32, y: i32, z: i32 },
}

impl fmt::Display for VoxelcastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoxelcastError::IoError(err) => write!(f, "IO error: {}", err),
            VoxelcastError::ProtocolError(msg) => write!(f, "Protocol error: {}", msg),
            VoxelcastError::ServerError(msg) => write!(f, "Server error: {}", msg),
            VoxelcastError::OutOfBounds { x, y, z } => {
                write!(f, "Block position ({}, {}, {}) is out of bounds", x, y, z)
            }
        }
    }
}

impl Error for VoxelcastError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            VoxelcastError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VoxelcastError {
    fn from(err: std::io::Error) -> Self {
        VoxelcastError::IoError(err)
    }
}
