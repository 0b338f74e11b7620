use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::{Framed, LinesCodec};

use voxelcast_protocol::session::session_codec;
use voxelcast_server::config::ServerConfig;
use voxelcast_server::server;
use voxelcast_server::world::World;

pub type ClientFrames = Framed<TcpStream, LinesCodec>;

static COUNTER: AtomicU32 = AtomicU32::new(0);

/// Boots a server on an ephemeral port with an isolated players file.
pub async fn start_server() -> SocketAddr {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    let mut config = ServerConfig::default();
    config.players_path = std::env::temp_dir().join(format!(
        "voxelcast-itest-{}-{}.json",
        std::process::id(),
        n
    ));

    let world = Arc::new(World::new(&config).unwrap());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = server::serve(world, listener).await;
    });
    addr
}

pub async fn connect_client(addr: SocketAddr) -> ClientFrames {
    let socket = TcpStream::connect(addr).await.unwrap();
    Framed::new(socket, session_codec())
}

pub async fn send_json(client: &mut ClientFrames, value: Value) {
    client.send(value.to_string()).await.unwrap();
}

pub async fn read_message(client: &mut ClientFrames) -> Value {
    let line = client.next().await.expect("connection closed").unwrap();
    serde_json::from_str(&line).unwrap()
}

/// Reads messages until one with the given `type` tag arrives, skipping
/// unrelated broadcasts.
pub async fn read_until_type(client: &mut ClientFrames, message_type: &str) -> Value {
    loop {
        let message = read_message(client).await;
        if message["type"] == message_type {
            return message;
        }
    }
}

/// Connects and logs in, returning the `connected` reply.
pub async fn login(client: &mut ClientFrames, name: &str) -> Value {
    send_json(
        client,
        json!({"type": "connect", "login": name, "password": "pw"}),
    )
    .await;
    read_until_type(client, "connected").await
}
