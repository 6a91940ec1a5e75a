use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-client session state, keyed by the opaque token in the session cookie.
///
/// A store that has no entry for a token hands out `Session::default()`, so
/// sessions come into existence lazily on first write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub rate_limit: Option<RateLimitWindow>,
    #[serde(default)]
    pub conversation_context: Vec<Exchange>,
}

/// Request counter for the current rate-limit window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitWindow {
    pub count: u32,
    pub reset_time: DateTime<Utc>,
}

/// One translated snippet kept as conversation context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub original: String,
    pub translation: String,
}

impl Exchange {
    pub fn new(original: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            translation: translation.into(),
        }
    }
}
