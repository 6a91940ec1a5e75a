//! Domain entities - the core business objects.

mod language;
mod session;
mod translation;

pub use language::{Language, UnknownLanguage};
pub use session::{Exchange, RateLimitWindow, Session};
pub use translation::{
    DEFAULT_TARGET_LANGUAGE, MAX_TEXT_CHARS, TranslationRequest, content_fingerprint,
};
