use std::collections::HashMap;

use voxelcast_common::Result;

use crate::message::{PlayerEntry, ServerMessage};
use crate::session::PlayerSession;

/// All live sessions, keyed by login. A second connect with the same
/// login replaces the first session's writer.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: HashMap<String, PlayerSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_session(&mut self, session: PlayerSession) {
        self.sessions.insert(session.login.clone(), session);
    }

    pub fn remove_session(&mut self, login: &str) -> Option<PlayerSession> {
        self.sessions.remove(login)
    }

    pub fn get_session(&mut self, login: &str) -> Option<&mut PlayerSession> {
        self.sessions.get_mut(login)
    }

    pub async fn send_to(&mut self, login: &str, message: &ServerMessage) -> Result<()> {
        if let Some(session) = self.sessions.get_mut(login) {
            session.send(message).await?;
        }
        Ok(())
    }

    /// Sends to every session, the originator included. Returns the logins
    /// whose sockets failed; the caller decides whether to drop them.
    pub async fn broadcast(&mut self, message: &ServerMessage) -> Vec<String> {
        self.broadcast_except(message, None).await
    }

    pub async fn broadcast_except(
        &mut self,
        message: &ServerMessage,
        except_login: Option<&str>,
    ) -> Vec<String> {
        let mut failed = Vec::new();
        for (login, session) in self.sessions.iter_mut() {
            if Some(login.as_str()) == except_login {
                continue;
            }
            if session.send(message).await.is_err() {
                failed.push(login.clone());
            }
        }
        failed
    }

    /// Snapshot of connected players for a `players_list` reply.
    pub fn players(&self) -> Vec<PlayerEntry> {
        self.sessions
            .values()
            .map(|session| PlayerEntry {
                player_id: session.login.clone(),
                position: session.position,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
