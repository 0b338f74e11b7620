//! The authoritative game server: a tokio TCP listener speaking
//! newline-delimited JSON, one task per connection, all shared state
//! behind one [`world::World`] aggregate.

pub mod config;
pub mod server;
pub mod storage;
pub mod world;
