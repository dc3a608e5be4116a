//! In-memory store of assistant sessions.
//!
//! Each session sits behind its own async mutex so interactions within one
//! session run strictly one after another, while separate sessions proceed
//! independently. A session untouched for longer than the store's TTL is
//! discarded, either when a new session is created or by the sweeper task.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use truckscout_assistant::AssistantSession;
use truckscout_core::defaults;

/// Per-session state: the conversation and the company currently selected on the map.
#[derive(Debug, Default)]
pub struct SessionState {
    pub assistant: AssistantSession,
    pub selected_place_id: Option<i64>,
}

pub type SharedSession = Arc<Mutex<SessionState>>;

#[derive(Debug)]
struct SessionEntry {
    session: SharedSession,
    last_active: Instant,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Duration::from_secs(defaults::SESSION_TTL_SECS))
    }
}

impl SessionStore {
    /// Create a store discarding sessions idle for longer than `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Start a new session and return its identifier.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::now_v7();
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let evicted = evict_idle(&mut sessions, now, self.ttl);
        sessions.insert(
            id,
            SessionEntry {
                session: Arc::new(Mutex::new(SessionState::default())),
                last_active: now,
            },
        );
        debug!(session_id = %id, evicted, "Session created");
        id
    }

    /// Look up a session and mark it active. Expired sessions are gone.
    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id)?;
        if now.duration_since(entry.last_active) <= self.ttl {
            entry.last_active = now;
            return Some(entry.session.clone());
        }
        sessions.remove(&id);
        debug!(session_id = %id, "Session expired");
        None
    }

    /// Discard a session. Returns false when it did not exist.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            debug!(session_id = %id, "Session removed");
        }
        removed
    }

    /// Discard every idle session, returning how many were dropped.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        evict_idle(&mut sessions, Instant::now(), self.ttl)
    }

    /// Periodically discard idle sessions for the life of the process.
    pub fn spawn_sweeper(&self) -> JoinHandle<()> {
        let store = self.clone();
        let period = (self.ttl / 2).max(Duration::from_secs(1));
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await;
            loop {
                interval.tick().await;
                let evicted = store.evict_idle().await;
                if evicted > 0 {
                    info!(evicted, "Discarded idle sessions");
                }
            }
        })
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn evict_idle(sessions: &mut HashMap<Uuid, SessionEntry>, now: Instant, ttl: Duration) -> usize {
    let before = sessions.len();
    sessions.retain(|_, entry| now.duration_since(entry.last_active) <= ttl);
    before - sessions.len()
}
