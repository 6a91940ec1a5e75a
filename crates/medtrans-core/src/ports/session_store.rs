use async_trait::async_trait;

use crate::domain::Session;
use crate::error::SessionStoreError;

/// Session store trait - abstraction over session backends (Redis, in-memory).
///
/// Writes are plain overwrites. Two concurrent requests on one session race
/// and the last `put` wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load a session. Unknown or expired tokens yield `Session::default()`.
    async fn get(&self, token: &str) -> Result<Session, SessionStoreError>;

    /// Store a session, replacing whatever was there.
    async fn put(&self, token: &str, session: &Session) -> Result<(), SessionStoreError>;
}
