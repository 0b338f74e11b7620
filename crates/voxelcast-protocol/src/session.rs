use futures::SinkExt;
use tokio::io::{ReadHalf, WriteHalf};
use tokio::net::TcpStream;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};

use voxelcast_common::types::Position;
use voxelcast_common::{Result, VoxelcastError};

use crate::message::ServerMessage;

/// Upper bound on one wire line. A full chunk_data line with three dense
/// arrays runs to a few hundred kilobytes; this leaves generous headroom.
pub const MAX_LINE_LENGTH: usize = 8 * 1024 * 1024;

pub type MessageReader = FramedRead<ReadHalf<TcpStream>, LinesCodec>;
pub type MessageWriter = FramedWrite<WriteHalf<TcpStream>, LinesCodec>;

/// Line codec shared by both directions of the connection.
pub fn session_codec() -> LinesCodec {
    LinesCodec::new_with_max_length(MAX_LINE_LENGTH)
}

/// Splits a fresh connection into framed halves. The writer stays local
/// until the client identifies itself with `connect`, then moves into a
/// [`PlayerSession`].
pub fn split_connection(socket: TcpStream) -> (MessageReader, MessageWriter) {
    let (read, write) = tokio::io::split(socket);
    (
        FramedRead::new(read, session_codec()),
        FramedWrite::new(write, session_codec()),
    )
}

/// Serializes one message onto a framed writer.
pub async fn send_message(writer: &mut MessageWriter, message: &ServerMessage) -> Result<()> {
    let line = serde_json::to_string(message)
        .map_err(|err| VoxelcastError::ProtocolError(err.to_string()))?;
    writer
        .send(line)
        .await
        .map_err(|err| VoxelcastError::ProtocolError(err.to_string()))
}

/// One connected player: their identity, last reported position, and the
/// write half of their socket.
pub struct PlayerSession {
    pub login: String,
    pub position: Position,
    writer: MessageWriter,
}

impl PlayerSession {
    pub fn new(login: String, position: Position, writer: MessageWriter) -> Self {
        Self {
            login,
            position,
            writer,
        }
    }

    pub async fn send(&mut self, message: &ServerMessage) -> Result<()> {
        send_message(&mut self.writer, message).await
    }

    pub fn update_position(&mut self, position: Position) {
        self.position = position;
    }
}
