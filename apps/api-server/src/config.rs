//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use medtrans_core::session::RateLimitPolicy;
use medtrans_infra::{DEFAULT_MAX_ENTRIES, HuggingFaceConfig, OllamaConfig};

/// Configuration errors surfaced at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown TRANSLATOR_BACKEND '{0}' (expected 'huggingface' or 'ollama')")]
    UnknownTranslator(String),

    #[error("Unknown SESSION_BACKEND '{0}' (expected 'memory' or 'redis')")]
    UnknownSessionBackend(String),
}

/// Which upstream provider serves translations. Exactly one is active.
#[derive(Debug, Clone)]
pub enum TranslatorBackend {
    HuggingFace(HuggingFaceConfig),
    Ollama(OllamaConfig),
}

/// Where session state lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    Memory,
    Redis,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Secret used to sign session cookies. `None` means generate one per process.
    pub secret_key: Option<String>,
    /// Set the `Secure` attribute on the session cookie.
    pub secure_cookies: bool,
    pub translator: TranslatorBackend,
    pub rate_limit: RateLimitPolicy,
    pub session_backend: SessionBackend,
    pub session_ttl: Duration,
    /// Cap on sessions held by the in-memory store. Each cookieless request
    /// creates one, so this bounds memory when clients discard cookies.
    pub session_max_entries: usize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let translator = match env::var("TRANSLATOR_BACKEND")
            .unwrap_or_else(|_| "huggingface".to_string())
            .to_lowercase()
            .as_str()
        {
            "huggingface" | "hf" => TranslatorBackend::HuggingFace(HuggingFaceConfig::from_env()),
            "ollama" | "local" => TranslatorBackend::Ollama(OllamaConfig::from_env()),
            other => return Err(ConfigError::UnknownTranslator(other.to_string())),
        };

        let session_backend = match env::var("SESSION_BACKEND")
            .unwrap_or_else(|_| "memory".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => SessionBackend::Memory,
            "redis" => SessionBackend::Redis,
            other => return Err(ConfigError::UnknownSessionBackend(other.to_string())),
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            secret_key: env::var("SECRET_KEY").ok().filter(|k| !k.is_empty()),
            secure_cookies: env::var("SESSION_COOKIE_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            translator,
            rate_limit: Self::rate_limit_policy(),
            session_backend,
            session_ttl: Duration::from_secs(
                env::var("SESSION_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(24 * 60 * 60),
            ),
            session_max_entries: env::var("SESSION_MAX_ENTRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_ENTRIES),
        })
    }

    /// Serverless deployments (`VERCEL_ENV` set) bypass rate limiting.
    fn rate_limit_policy() -> RateLimitPolicy {
        let serverless = env::var("VERCEL_ENV").is_ok();
        let enabled = env::var("RATE_LIMIT_ENABLED")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        if serverless || !enabled {
            return RateLimitPolicy::disabled();
        }

        let defaults = RateLimitPolicy::default();
        RateLimitPolicy::new(
            env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.limit),
            env::var("RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.per),
        )
    }
}
