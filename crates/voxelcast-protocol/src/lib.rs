//! Wire protocol: newline-delimited JSON messages with a mandatory `type`
//! tag, the flat chunk grid codec, and per-connection session plumbing.

pub mod codec;
pub mod message;
pub mod registry;
pub mod session;

pub use message::{ClientMessage, PlayerEntry, ServerMessage};
pub use registry::SessionRegistry;
pub use session::{
    send_message, session_codec, split_connection, MessageReader, MessageWriter, PlayerSession,
    MAX_LINE_LENGTH,
};
