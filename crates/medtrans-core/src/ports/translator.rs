//! Translation provider port.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::TranslateError;

/// Languages and provider label published by `GET /api/models`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelCatalog {
    pub available_languages: Vec<String>,
    pub provider: String,
}

/// An upstream translation service.
///
/// Implementations classify every network failure into a `TranslateError`
/// kind before returning; raw transport errors never cross this boundary.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target_language`.
    ///
    /// `context` is the rendered conversation history, only passed when
    /// [`Translator::uses_context`] is true and history exists.
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
        context: Option<&str>,
    ) -> Result<String, TranslateError>;

    /// Whether `target_language` can be served. Checked before any network call.
    fn supports_language(&self, target_language: &str) -> bool;

    /// Whether prior exchanges should be fed back into prompts.
    fn uses_context(&self) -> bool {
        false
    }

    /// Published language list, if this provider has a fixed one.
    fn catalog(&self) -> Option<ModelCatalog> {
        None
    }

    fn provider_name(&self) -> &str;
}
