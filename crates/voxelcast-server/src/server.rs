use std::sync::Arc;

use futures::StreamExt;
use tokio::net::{TcpListener, TcpStream};

use voxelcast_common::blocks::{self, BlockId};
use voxelcast_common::coords::BlockPos;
use voxelcast_common::types::Position;
use voxelcast_common::{Result, VoxelcastError};
use voxelcast_logger::log::log;
use voxelcast_logger::severity::LogSeverity::{Error, Info, Warning};
use voxelcast_protocol::message::{ClientMessage, ServerMessage};
use voxelcast_protocol::session::{split_connection, PlayerSession};

use crate::config::ServerConfig;
use crate::world::World;

/// Builds the world from config and listens until the process dies.
pub async fn run(config: ServerConfig) -> Result<()> {
    let world = Arc::new(World::new(&config)?);
    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    log(format!("Listening on port {}", config.port), Info);
    serve(world, listener).await
}

/// Accept loop over an already-bound listener, one task per connection.
/// Split from [`run`] so tests can bind an ephemeral port.
pub async fn serve(world: Arc<World>, listener: TcpListener) -> Result<()> {
    loop {
        let (socket, addr) = listener.accept().await?;
        log(format!("New connection from: {}", addr), Info);
        let world = world.clone();
        tokio::spawn(async move {
            if let Err(err) = handle_connection(world, socket).await {
                log(format!("Connection error: {}", err), Error);
            }
        });
    }
}

async fn handle_connection(world: Arc<World>, socket: TcpStream) -> Result<()> {
    let (mut reader, writer) = split_connection(socket);
    // The writer moves into the session registry on `connect`.
    let mut writer = Some(writer);
    let mut login: Option<String> = None;

    while let Some(line) = reader.next().await {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                log(format!("Socket read failed: {}", err), Warning);
                break;
            }
        };

        // Malformed JSON and unknown `type` tags are dropped; the
        // connection stays open.
        let message = match serde_json::from_str::<ClientMessage>(&line) {
            Ok(message) => message,
            Err(err) => {
                log(format!("Dropping malformed message: {}", err), Warning);
                continue;
            }
        };

        match message {
            ClientMessage::Connect {
                login: name,
                password,
            } => match writer.take() {
                Some(writer) => {
                    handle_connect(&world, &name, &password, writer).await?;
                    login = Some(name);
                }
                None => log(
                    format!("Ignoring repeated connect from {}", name),
                    Warning,
                ),
            },
            other => match login.as_deref() {
                Some(login) => dispatch(&world, login, other).await?,
                None => log("Dropping message sent before connect".to_owned(), Warning),
            },
        }
    }

    if let Some(login) = login {
        handle_disconnect(&world, &login).await;
    }
    Ok(())
}

async fn handle_connect(
    world: &World,
    login: &str,
    password: &str,
    writer: voxelcast_protocol::session::MessageWriter,
) -> Result<()> {
    let (position, inventory) = world.connect_player(login, password).await?;
    log(format!("Player {} connected at {:?}", login, position), Info);

    let mut sessions = world.sessions.write().await;
    sessions.add_session(PlayerSession::new(login.to_owned(), position, writer));
    // The caller never learns this login on a failed reply, so the dead
    // session has to come back out of the registry here.
    if let Err(err) = sessions
        .send_to(login, &ServerMessage::Connected { position, inventory })
        .await
    {
        sessions.remove_session(login);
        return Err(err);
    }
    let failed = sessions
        .broadcast(&ServerMessage::PlayerConnected {
            player_id: login.to_owned(),
            position,
        })
        .await;
    drop(sessions);

    prune_failed(world, failed).await;
    Ok(())
}

async fn dispatch(world: &World, login: &str, message: ClientMessage) -> Result<()> {
    match message {
        ClientMessage::Connect { .. } => {}
        ClientMessage::GetChunk { position } => {
            let reply = world.chunk_data(position).await?;
            world.sessions.write().await.send_to(login, &reply).await?;
        }
        ClientMessage::Move { position } => handle_move(world, login, position).await,
        ClientMessage::GetPlayers => {
            let players = world.sessions.read().await.players();
            world
                .sessions
                .write()
                .await
                .send_to(login, &ServerMessage::PlayersList { players })
                .await?;
        }
        ClientMessage::PlaceBlock {
            position,
            block_type,
        } => apply_block_update(world, position, block_type).await?,
        ClientMessage::DestroyBlock { position } => {
            apply_block_update(world, position, blocks::AIR).await?
        }
        ClientMessage::GetInventory { position } => {
            let block = BlockPos::containing(position);
            let inventory = world.inventories.write().await.get_or_create(block).to_vec();
            world
                .sessions
                .write()
                .await
                .send_to(login, &ServerMessage::Inventory { position, inventory })
                .await?;
        }
        ClientMessage::SetInventory {
            position,
            inventory,
        } => {
            let block = BlockPos::containing(position);
            world.inventories.write().await.set(block, inventory);
        }
    }
    Ok(())
}

async fn handle_move(world: &World, login: &str, position: Position) {
    {
        let mut sessions = world.sessions.write().await;
        if let Some(session) = sessions.get_session(login) {
            session.update_position(position);
        }
    }
    {
        let mut players = world.players.write().await;
        players.update_position(login, position);
        if let Err(err) = players.save() {
            log(format!("Failed to save player data: {}", err), Warning);
        }
    }
    let failed = world
        .sessions
        .write()
        .await
        .broadcast_except(
            &ServerMessage::PlayerMoved {
                player_id: login.to_owned(),
                position,
            },
            Some(login),
        )
        .await;
    prune_failed(world, failed).await;
}

/// Applies a block edit and echoes `block_update` to every session, the
/// originator included. Out-of-range edits are logged and dropped without
/// touching the connection.
async fn apply_block_update(world: &World, position: BlockPos, block_type: BlockId) -> Result<()> {
    match world.store.write().await.apply_mutation(position, block_type) {
        Ok(()) => {}
        Err(err @ VoxelcastError::OutOfBounds { .. }) => {
            log(format!("Rejecting block update: {}", err), Warning);
            return Ok(());
        }
        Err(err) => return Err(err),
    }

    let failed = world
        .sessions
        .write()
        .await
        .broadcast(&ServerMessage::BlockUpdate {
            position,
            block_type,
        })
        .await;
    prune_failed(world, failed).await;
    Ok(())
}

async fn handle_disconnect(world: &World, login: &str) {
    world.sessions.write().await.remove_session(login);
    if let Err(err) = world.save_players().await {
        log(format!("Failed to save player data: {}", err), Warning);
    }
    let failed = world
        .sessions
        .write()
        .await
        .broadcast(&ServerMessage::PlayerDisconnected {
            player_id: login.to_owned(),
        })
        .await;
    prune_failed(world, failed).await;
    log(format!("Player {} disconnected", login), Info);
}

async fn prune_failed(world: &World, failed: Vec<String>) {
    if failed.is_empty() {
        return;
    }
    let mut sessions = world.sessions.write().await;
    for login in failed {
        sessions.remove_session(&login);
        log(format!("Dropping unreachable session {}", login), Warning);
    }
}
