//! # MedTrans Infrastructure
//!
//! Concrete implementations of the ports defined in `medtrans-core`:
//! session stores and upstream translation providers.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory sessions only
//! - `redis` - Redis-backed session store

pub mod session;
pub mod translator;

// Re-exports - In-Memory
pub use session::{DEFAULT_MAX_ENTRIES, InMemorySessionStore};

// Re-exports - Translators
pub use translator::{HuggingFaceConfig, HuggingFaceTranslator, OllamaConfig, OllamaTranslator};

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use session::{RedisConfig, RedisSessionStore};
