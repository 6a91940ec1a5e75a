//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use actix_web::cookie::Key;
use sha2::{Digest, Sha512};

use medtrans_core::TranslateError;
use medtrans_core::ports::{SessionStore, Translator};
use medtrans_core::session::RateLimitPolicy;
use medtrans_infra::{HuggingFaceTranslator, InMemorySessionStore, OllamaTranslator};

use crate::config::{AppConfig, SessionBackend, TranslatorBackend};

/// How often expired in-memory sessions are swept.
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(300);

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionStore>,
    pub translator: Arc<dyn Translator>,
    pub rate_limit: RateLimitPolicy,
    pub session_key: Key,
    pub secure_cookies: bool,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, TranslateError> {
        let translator: Arc<dyn Translator> = match &config.translator {
            TranslatorBackend::HuggingFace(hf) => Arc::new(HuggingFaceTranslator::new(hf.clone())?),
            TranslatorBackend::Ollama(ollama) => Arc::new(OllamaTranslator::new(ollama.clone())?),
        };

        let sessions = Self::session_store(config).await;

        if !config.rate_limit.enabled {
            tracing::info!("Rate limiting disabled");
        }

        tracing::info!(
            provider = translator.provider_name(),
            "Application state initialized"
        );

        Ok(Self {
            sessions,
            translator,
            rate_limit: config.rate_limit,
            session_key: session_key(config.secret_key.as_deref()),
            secure_cookies: config.secure_cookies,
        })
    }

    async fn session_store(config: &AppConfig) -> Arc<dyn SessionStore> {
        if config.session_backend == SessionBackend::Redis {
            #[cfg(feature = "redis")]
            {
                let mut redis_config = medtrans_infra::RedisConfig::from_env();
                redis_config.session_ttl = config.session_ttl;
                match medtrans_infra::RedisSessionStore::new(redis_config).await {
                    Ok(store) => return Arc::new(store),
                    Err(e) => tracing::error!(
                        "Failed to connect to Redis: {}. Using in-memory sessions.",
                        e
                    ),
                }
            }

            #[cfg(not(feature = "redis"))]
            tracing::warn!(
                "SESSION_BACKEND=redis but the redis feature is disabled. Using in-memory sessions."
            );
        }

        let store = Arc::new(
            InMemorySessionStore::new(config.session_ttl)
                .with_max_entries(config.session_max_entries),
        );
        spawn_session_purge(store.clone());
        store
    }

    /// State for handler tests.
    #[cfg(test)]
    pub fn for_tests(translator: Arc<dyn Translator>, rate_limit: RateLimitPolicy) -> Self {
        Self {
            sessions: Arc::new(InMemorySessionStore::default()),
            translator,
            rate_limit,
            session_key: Key::generate(),
            secure_cookies: false,
        }
    }
}

/// Derive the cookie signing key.
///
/// Any configured secret is stretched to the 64 bytes the signer requires.
/// Without one, a random key is generated and sessions do not survive a
/// restart.
fn session_key(secret: Option<&str>) -> Key {
    match secret {
        Some(secret) => Key::from(Sha512::digest(secret.as_bytes()).as_slice()),
        None => {
            tracing::warn!(
                "SECRET_KEY not set. Generated a random key; sessions reset on restart."
            );
            Key::generate()
        }
    }
}

fn spawn_session_purge(store: Arc<InMemorySessionStore>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            let purged = store.purge_expired().await;
            if purged > 0 {
                tracing::debug!(purged, "Purged expired sessions");
            }
        }
    });
}
