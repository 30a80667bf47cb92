use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::state::SessionState;

/// Per-user session store (user id → session), created on first contact.
///
/// Consistency model: each user's entry is only written by the handler
/// currently driving that user's event, so no per-entry lock is taken.
/// Two in-flight submissions from the same user race last-writer-wins,
/// matching the reference behavior.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionState>>>,
    default_language: String,
}

impl SessionStore {
    pub fn new(default_language: &str) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            default_language: default_language.to_string(),
        }
    }

    /// Snapshot of the user's session, creating one on first contact.
    pub async fn get(&self, user_id: &str) -> SessionState {
        {
            let sessions = self.sessions.read().await;
            if let Some(session) = sessions.get(user_id) {
                return session.clone();
            }
        }

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(user_id.to_string())
            .or_insert_with(|| SessionState::new(&self.default_language))
            .clone()
    }

    /// Write back a modified session.
    pub async fn put(&self, user_id: &str, session: SessionState) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(user_id.to_string(), session);
    }

    /// Drop a user's session entirely; the next contact starts fresh.
    pub async fn reset(&self, user_id: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(user_id);
    }
}
