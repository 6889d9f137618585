//! Registry of running test sessions.
//!
//! Sessions idle for longer than the registry's timeout are dropped. Expired
//! entries are swept on every insert and treated as unknown on lookup.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use flashcard_core::TestSession;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 60);

#[derive(Debug)]
struct Entry {
    session: TestSession,
    last_used: Instant,
}

impl Entry {
    fn is_expired(&self, idle_timeout: Duration) -> bool {
        self.last_used.elapsed() >= idle_timeout
    }
}

#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Entry>>,
    idle_timeout: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    pub async fn insert(&self, session: TestSession) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_expired(self.idle_timeout));
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!("Evicted {} idle test sessions", evicted);
        }

        sessions.insert(
            id,
            Entry {
                session,
                last_used: Instant::now(),
            },
        );
        id
    }

    /// Run `f` against a session, `None` if the id is unknown or expired.
    pub async fn read<T>(&self, id: Uuid, f: impl FnOnce(&TestSession) -> T) -> Option<T> {
        self.update(id, |session| f(session)).await
    }

    pub async fn update<T>(&self, id: Uuid, f: impl FnOnce(&mut TestSession) -> T) -> Option<T> {
        let mut sessions = self.sessions.write().await;

        if sessions
            .get(&id)
            .is_some_and(|entry| entry.is_expired(self.idle_timeout))
        {
            sessions.remove(&id);
            return None;
        }

        let entry = sessions.get_mut(&id)?;
        entry.last_used = Instant::now();
        Some(f(&mut entry.session))
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
