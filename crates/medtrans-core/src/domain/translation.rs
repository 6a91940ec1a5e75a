use sha2::{Digest, Sha256};

use crate::error::TranslateError;

/// Longest accepted input, counted in characters.
pub const MAX_TEXT_CHARS: usize = 5000;

/// Target used when the client omits `targetLanguage`.
pub const DEFAULT_TARGET_LANGUAGE: &str = "Hindi";

/// A validated translation request. Lives only for the duration of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub target_language: String,
}

impl TranslationRequest {
    /// Trim and validate raw client input.
    pub fn new(text: &str, target_language: Option<&str>) -> Result<Self, TranslateError> {
        let text = text.trim();

        if text.is_empty() {
            return Err(TranslateError::bad_request("No text provided"));
        }
        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(TranslateError::bad_request("Invalid text format or size"));
        }

        Ok(Self {
            text: text.to_string(),
            target_language: target_language
                .unwrap_or(DEFAULT_TARGET_LANGUAGE)
                .to_string(),
        })
    }

    /// Correlation id for logs. Raw text is never logged.
    pub fn fingerprint(&self) -> String {
        content_fingerprint(&self.text)
    }
}

/// First 8 hex digits of the SHA-256 of `text`.
pub fn content_fingerprint(text: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(text.as_bytes()));
    digest[..8].to_string()
}
