//! In-memory session store - used when Redis is not configured or unreachable.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use medtrans_core::domain::Session;
use medtrans_core::error::SessionStoreError;
use medtrans_core::ports::SessionStore;

struct SessionEntry {
    session: Session,
    expires_at: Instant,
}

/// Default cap on live sessions held in memory.
pub const DEFAULT_MAX_ENTRIES: usize = 100_000;

/// In-memory session store using a HashMap with async RwLock.
///
/// Entries expire `ttl` after their last write. At most `max_entries`
/// sessions are held; inserting a new token into a full store first purges
/// expired entries, then evicts the session closest to expiry.
/// Note: Data is lost on process restart.
pub struct InMemorySessionStore {
    store: RwLock<HashMap<String, SessionEntry>>,
    ttl: Duration,
    max_entries: usize,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            ttl,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    fn make_room(store: &mut HashMap<String, SessionEntry>, max_entries: usize) {
        if store.len() < max_entries {
            return;
        }
        store.retain(|_, entry| !Self::is_expired(entry));
        if store.len() < max_entries {
            return;
        }

        let oldest = store
            .iter()
            .min_by_key(|(_, entry)| entry.expires_at)
            .map(|(token, _)| token.clone());
        if let Some(token) = oldest {
            tracing::warn!(max_entries, "Session store full, evicting oldest session");
            store.remove(&token);
        }
    }

    fn is_expired(entry: &SessionEntry) -> bool {
        Instant::now() > entry.expires_at
    }

    /// Drop every expired entry. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|_, entry| !Self::is_expired(entry));
        before - store.len()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(Duration::from_secs(24 * 60 * 60))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, token: &str) -> Result<Session, SessionStoreError> {
        let store = self.store.read().await;
        let Some(entry) = store.get(token) else {
            return Ok(Session::default());
        };

        if !Self::is_expired(entry) {
            return Ok(entry.session.clone());
        }
        drop(store);

        // A put may have refreshed the entry between the two locks.
        let mut store = self.store.write().await;
        match store.get(token) {
            Some(entry) if !Self::is_expired(entry) => Ok(entry.session.clone()),
            Some(_) => {
                store.remove(token);
                Ok(Session::default())
            }
            None => Ok(Session::default()),
        }
    }

    async fn put(&self, token: &str, session: &Session) -> Result<(), SessionStoreError> {
        let mut store = self.store.write().await;
        if !store.contains_key(token) {
            Self::make_room(&mut store, self.max_entries);
        }
        store.insert(
            token.to_string(),
            SessionEntry {
                session: session.clone(),
                expires_at: Instant::now() + self.ttl,
            },
        );
        Ok(())
    }
}
