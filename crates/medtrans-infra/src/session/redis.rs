//! Redis session store with connection manager and JSON-encoded sessions.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use medtrans_core::domain::Session;
use medtrans_core::error::SessionStoreError;
use medtrans_core::ports::SessionStore;

/// Redis connection configuration.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub url: String,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Key prefix for session keys
    pub key_prefix: String,
    /// Idle lifetime of a session
    pub session_ttl: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            connect_timeout: Duration::from_secs(5),
            key_prefix: "medtrans:session".to_string(),
            session_ttl: Duration::from_secs(24 * 60 * 60),
        }
    }
}

impl RedisConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            connect_timeout: Duration::from_secs(
                std::env::var("REDIS_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
            key_prefix: std::env::var("SESSION_KEY_PREFIX")
                .unwrap_or_else(|_| "medtrans:session".to_string()),
            session_ttl: Duration::from_secs(
                std::env::var("SESSION_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(24 * 60 * 60),
            ),
        }
    }
}

/// Redis-backed session store.
///
/// Every `put` refreshes the key's expiry, so idle sessions disappear after
/// `session_ttl`.
pub struct RedisSessionStore {
    conn: ConnectionManager,
    config: RedisConfig,
}

impl RedisSessionStore {
    pub async fn new(config: RedisConfig) -> Result<Self, SessionStoreError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| SessionStoreError::Connection(e.to_string()))?;

        // Use timeout to prevent hanging if Redis is unreachable
        let conn_manager_fut = ConnectionManager::new(client);
        let conn = tokio::time::timeout(config.connect_timeout, conn_manager_fut)
            .await
            .map_err(|_| SessionStoreError::Connection("Connection timed out".to_string()))?
            .map_err(|e| SessionStoreError::Connection(e.to_string()))?;

        tracing::info!(url = %config.url, "Connected to Redis session store");

        Ok(Self { conn, config })
    }

    fn make_key(&self, token: &str) -> String {
        format!("{}:{}", self.config.key_prefix, token)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, token: &str) -> Result<Session, SessionStoreError> {
        let mut conn = self.conn.clone();
        let raw = conn
            .get::<_, Option<String>>(self.make_key(token))
            .await
            .map_err(|e| SessionStoreError::Operation(e.to_string()))?;

        let Some(raw) = raw else {
            return Ok(Session::default());
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Ok(session),
            Err(e) => {
                // A corrupt entry is replaced on the next write.
                tracing::warn!(error = %e, "Discarding undecodable session");
                Ok(Session::default())
            }
        }
    }

    async fn put(&self, token: &str, session: &Session) -> Result<(), SessionStoreError> {
        let payload = serde_json::to_string(session)?;
        let mut conn = self.conn.clone();

        conn.set_ex::<_, _, ()>(
            self.make_key(token),
            payload,
            self.config.session_ttl.as_secs().max(1),
        )
        .await
        .map_err(|e| SessionStoreError::Operation(e.to_string()))?;

        Ok(())
    }
}
