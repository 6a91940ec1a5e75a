//! Local generative model served by Ollama.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use medtrans_core::TranslateError;
use medtrans_core::domain::Language;
use medtrans_core::ports::Translator;

use super::http::{classify, ensure_success, non_empty};

const PROVIDER: &str = "ollama";

/// Ollama client configuration.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Full URL of the generate endpoint.
    pub endpoint: String,
    /// Model tag to run.
    pub model: String,
    /// Request timeout. Local inference is slow, so this is generous.
    pub timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434/api/generate".to_string(),
            model: "llama3".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl OllamaConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            endpoint: std::env::var("OLLAMA_URL").unwrap_or(defaults.endpoint),
            model: std::env::var("OLLAMA_MODEL").unwrap_or(defaults.model),
            timeout: std::env::var("OLLAMA_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Generation response from the Ollama API
#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    response: String,
}

/// Build the instruction prompt sent to the model.
pub fn build_prompt(text: &str, target_language: &str, context: Option<&str>) -> String {
    let mut prompt = format!(
        "You are a professional medical interpreter. Translate the text below from English to {target}.\n\
         Return ONLY the clean translated text. Do not add explanations, labels, notes, or quotation marks.\n\
         \n\
         Guidelines:\n\
         1. Maintain clinical precision and the original meaning.\n\
         2. Translate medical terminology to its standard {target} equivalent; keep the English term where none exists.\n\
         3. Keep dosage instructions exactly as written.\n\
         4. Preserve every number, unit and measurement exactly.\n",
        target = target_language,
    );

    if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
        prompt.push_str("\nPrevious exchanges in this conversation, for consistency:\n");
        prompt.push_str(context);
    }

    prompt.push_str(&format!("\nText to translate: \"{}\"\n", text));
    prompt
}

/// Translator backed by a local Ollama server.
pub struct OllamaTranslator {
    client: Client,
    config: OllamaConfig,
}

impl OllamaTranslator {
    pub fn new(config: OllamaConfig) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TranslateError::internal(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl Translator for OllamaTranslator {
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
        context: Option<&str>,
    ) -> Result<String, TranslateError> {
        if !self.supports_language(target_language) {
            return Err(TranslateError::UnsupportedLanguage(
                target_language.to_string(),
            ));
        }

        let prompt = build_prompt(text, target_language, context);
        let request = GenerationRequest {
            model: &self.config.model,
            prompt: &prompt,
            stream: false,
        };

        tracing::debug!(
            model = %self.config.model,
            has_context = context.is_some(),
            "Calling Ollama"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| classify(PROVIDER, e))?;
        let response = ensure_success(PROVIDER, response).await?;
        let body: GenerationResponse = response.json().await.map_err(|e| classify(PROVIDER, e))?;

        non_empty(PROVIDER, &body.response)
    }

    fn supports_language(&self, target_language: &str) -> bool {
        target_language.parse::<Language>().is_ok()
    }

    fn uses_context(&self) -> bool {
        true
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }
}
