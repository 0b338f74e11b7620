mod common;

use common::*;
use futures::SinkExt;
use serde_json::json;

// x + z*16 + y*256
fn flat(x: usize, y: usize, z: usize) -> usize {
    x + z * 16 + y * 256
}

#[tokio::test]
async fn test_connect_replies_with_spawn_and_inventory() {
    let addr = start_server().await;
    let mut client = connect_client(addr).await;

    let connected = login(&mut client, "steve").await;
    let position = &connected["position"];
    assert!(position["y"].as_f64().unwrap() > 0.0);
    assert_eq!(connected["inventory"].as_array().unwrap().len(), 27);
}

#[tokio::test]
async fn test_reconnect_resumes_same_position() {
    let addr = start_server().await;

    let first = {
        let mut client = connect_client(addr).await;
        login(&mut client, "steve").await
    };
    let second = {
        let mut client = connect_client(addr).await;
        login(&mut client, "steve").await
    };
    assert_eq!(first["position"], second["position"]);
}

#[tokio::test]
async fn test_get_chunk_returns_dense_grids() {
    let addr = start_server().await;
    let mut client = connect_client(addr).await;
    login(&mut client, "steve").await;

    send_json(
        &mut client,
        json!({"type": "get_chunk", "position": {"x": 0, "y": 0, "z": 0}}),
    )
    .await;
    let chunk = read_until_type(&mut client, "chunk_data").await;

    let blocks = chunk["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 65536);
    assert_eq!(chunk["water_chunk"].as_array().unwrap().len(), 65536);
    assert_eq!(chunk["flora_chunk"].as_array().unwrap().len(), 65536);

    // The floor of every column is bedrock.
    assert_eq!(blocks[flat(0, 0, 0)], 1);
    assert_eq!(blocks[flat(15, 0, 15)], 1);
}

#[tokio::test]
async fn test_block_update_reaches_every_session() {
    let addr = start_server().await;
    let mut placer = connect_client(addr).await;
    let mut watcher = connect_client(addr).await;
    login(&mut placer, "steve").await;
    login(&mut watcher, "alex").await;

    send_json(
        &mut placer,
        json!({"type": "place_block", "position": {"x": 1, "y": 100, "z": 2}, "block_type": 9}),
    )
    .await;

    // Both the watcher and the originating session hear the echo.
    let seen = read_until_type(&mut watcher, "block_update").await;
    assert_eq!(seen["block_type"], 9);
    assert_eq!(seen["position"]["y"], 100);

    let echoed = read_until_type(&mut placer, "block_update").await;
    assert_eq!(echoed["block_type"], 9);
}

#[tokio::test]
async fn test_mutation_is_visible_in_refetched_chunk() {
    let addr = start_server().await;
    let mut client = connect_client(addr).await;
    login(&mut client, "steve").await;

    send_json(
        &mut client,
        json!({"type": "place_block", "position": {"x": 1, "y": 100, "z": 2}, "block_type": 9}),
    )
    .await;
    read_until_type(&mut client, "block_update").await;

    send_json(
        &mut client,
        json!({"type": "get_chunk", "position": {"x": 0, "y": 0, "z": 0}}),
    )
    .await;
    let chunk = read_until_type(&mut client, "chunk_data").await;
    assert_eq!(chunk["blocks"][flat(1, 100, 2)], 9);
}

#[tokio::test]
async fn test_destroy_block_broadcasts_air() {
    let addr = start_server().await;
    let mut client = connect_client(addr).await;
    login(&mut client, "steve").await;

    send_json(
        &mut client,
        json!({"type": "destroy_block", "position": {"x": 3, "y": 64, "z": 3}}),
    )
    .await;
    let update = read_until_type(&mut client, "block_update").await;
    assert_eq!(update["block_type"], 0);
}

#[tokio::test]
async fn test_move_is_broadcast_to_others_only() {
    let addr = start_server().await;
    let mut mover = connect_client(addr).await;
    let mut watcher = connect_client(addr).await;
    login(&mut mover, "steve").await;
    login(&mut watcher, "alex").await;

    send_json(
        &mut mover,
        json!({"type": "move", "position": {"x": 5.0, "y": 70.0, "z": -3.0}}),
    )
    .await;

    let moved = read_until_type(&mut watcher, "player_moved").await;
    assert_eq!(moved["player_id"], "steve");
    assert_eq!(moved["position"]["x"], 5.0);
}

#[tokio::test]
async fn test_players_list_counts_connected_sessions() {
    let addr = start_server().await;
    let mut first = connect_client(addr).await;
    let mut second = connect_client(addr).await;
    login(&mut first, "steve").await;
    login(&mut second, "alex").await;

    send_json(&mut first, json!({"type": "get_players"})).await;
    let list = read_until_type(&mut first, "players_list").await;
    assert_eq!(list["players"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_malformed_message_keeps_connection_open() {
    let addr = start_server().await;
    let mut client = connect_client(addr).await;
    login(&mut client, "steve").await;

    send_json(&mut client, json!({"no_type": true})).await;
    client.send("this is not json".to_owned()).await.unwrap();
    send_json(&mut client, json!({"type": "fly", "speed": 9})).await;

    // The connection survives all three and still answers queries.
    send_json(&mut client, json!({"type": "get_players"})).await;
    let list = read_until_type(&mut client, "players_list").await;
    assert_eq!(list["players"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_disconnect_is_broadcast() {
    let addr = start_server().await;
    let mut watcher = connect_client(addr).await;
    login(&mut watcher, "alex").await;

    {
        let mut leaver = connect_client(addr).await;
        login(&mut leaver, "steve").await;
    }

    let gone = read_until_type(&mut watcher, "player_disconnected").await;
    assert_eq!(gone["player_id"], "steve");
}

#[tokio::test]
async fn test_inventory_round_trip() {
    let addr = start_server().await;
    let mut client = connect_client(addr).await;
    login(&mut client, "steve").await;

    send_json(
        &mut client,
        json!({"type": "get_inventory", "position": {"x": 4.0, "y": 65.0, "z": -2.0}}),
    )
    .await;
    let inventory = read_until_type(&mut client, "inventory").await;
    assert_eq!(inventory["inventory"].as_array().unwrap().len(), 27);
    assert_eq!(inventory["inventory"][0]["type"], "null");

    let mut slots = inventory["inventory"].as_array().unwrap().clone();
    slots[0] = json!({"type": "stone", "count": 5, "durability": 0});
    send_json(
        &mut client,
        json!({"type": "set_inventory", "position": {"x": 4.0, "y": 65.0, "z": -2.0}, "inventory": slots}),
    )
    .await;

    send_json(
        &mut client,
        json!({"type": "get_inventory", "position": {"x": 4.9, "y": 65.0, "z": -2.0}}),
    )
    .await;
    let refetched = read_until_type(&mut client, "inventory").await;
    assert_eq!(refetched["inventory"][0]["type"], "stone");
    assert_eq!(refetched["inventory"][0]["count"], 5);
}
