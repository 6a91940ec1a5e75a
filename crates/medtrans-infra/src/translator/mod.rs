//! Upstream translation providers.
//!
//! - `huggingface` - hosted inference API, one model per target language
//! - `ollama` - local generative model driven by an instruction prompt

mod http;
mod huggingface;
mod ollama;

pub use huggingface::{HuggingFaceConfig, HuggingFaceTranslator, model_for};
pub use ollama::{OllamaConfig, OllamaTranslator, build_prompt};
