//! Hugging Face hosted inference API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use medtrans_core::TranslateError;
use medtrans_core::domain::Language;
use medtrans_core::ports::{ModelCatalog, Translator};

use super::http::{classify, ensure_success, non_empty};

const PROVIDER: &str = "huggingface";

/// Prepended to every input to steer the models toward clinical vocabulary.
const MEDICAL_PREFIX: &str = "Medical translation: ";

/// Hugging Face client configuration.
#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    /// Base URL that model ids are appended to.
    pub base_url: String,
    /// API token sent as a Bearer credential.
    pub api_key: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-inference.huggingface.co/models/".to_string(),
            api_key: None,
            timeout: Duration::from_secs(15),
        }
    }
}

impl HuggingFaceConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("HUGGINGFACE_API_URL").unwrap_or(defaults.base_url),
            api_key: std::env::var("HUGGINGFACE_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            timeout: std::env::var("HUGGINGFACE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

/// Model used for each target language. Everything except English assumes
/// English input.
pub fn model_for(language: Language) -> &'static str {
    match language {
        Language::English => "Helsinki-NLP/opus-mt-mul-en",
        Language::Spanish => "Helsinki-NLP/opus-mt-en-es",
        Language::French => "Helsinki-NLP/opus-mt-en-fr",
        Language::German => "Helsinki-NLP/opus-mt-en-de",
        Language::Chinese => "Helsinki-NLP/opus-mt-en-zh",
        Language::Arabic => "Helsinki-NLP/opus-mt-en-ar",
        Language::Hindi => "Helsinki-NLP/opus-mt-en-hi",
    }
}

/// Pull the translated text out of an inference response.
///
/// The API answers with a list; its first element is either
/// `{"translation_text": ...}` or a bare string. Anything else is
/// stringified wholesale. A null `translation_text` reads as empty.
fn extract_text(response: &Value) -> Result<String, TranslateError> {
    let first = response.as_array().and_then(|items| items.first());
    match first {
        Some(Value::Object(map)) if map.contains_key("translation_text") => {
            match &map["translation_text"] {
                Value::String(s) => Ok(s.clone()),
                Value::Null => Ok(String::new()),
                other => Err(TranslateError::internal(format!(
                    "translation_text is not a string: {}",
                    other
                ))),
            }
        }
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Ok(response.to_string()),
    }
}

/// Translator backed by the Hugging Face inference API.
pub struct HuggingFaceTranslator {
    client: Client,
    config: HuggingFaceConfig,
}

impl HuggingFaceTranslator {
    pub fn new(config: HuggingFaceConfig) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TranslateError::internal(format!("HTTP client setup failed: {}", e)))?;

        if config.api_key.is_none() {
            tracing::warn!("HUGGINGFACE_API_KEY not set. Requests will be sent unauthenticated.");
        }

        Ok(Self { client, config })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), model)
    }
}

#[async_trait]
impl Translator for HuggingFaceTranslator {
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
        _context: Option<&str>,
    ) -> Result<String, TranslateError> {
        let language: Language = target_language
            .parse()
            .map_err(|_| TranslateError::UnsupportedLanguage(target_language.to_string()))?;
        let model = model_for(language);

        tracing::debug!(model, "Calling Hugging Face inference API");

        let mut request = self
            .client
            .post(self.model_url(model))
            .json(&json!({ "inputs": format!("{}{}", MEDICAL_PREFIX, text) }));
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| classify(PROVIDER, e))?;
        let response = ensure_success(PROVIDER, response).await?;
        let body: Value = response.json().await.map_err(|e| classify(PROVIDER, e))?;

        non_empty(PROVIDER, &extract_text(&body)?)
    }

    fn supports_language(&self, target_language: &str) -> bool {
        target_language.parse::<Language>().is_ok()
    }

    fn catalog(&self) -> Option<ModelCatalog> {
        Some(ModelCatalog {
            available_languages: Language::ALL.iter().map(|l| l.name().to_string()).collect(),
            provider: "Hugging Face Translation Models".to_string(),
        })
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }
}
