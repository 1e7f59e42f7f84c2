mod gemini;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::TranslationConfig;

pub use gemini::GeminiTranslator;

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("invalid response from translation backend: {0}")]
    InvalidResponse(String),
}

pub type TranslationResult<T> = Result<T, TranslationError>;

/// A backend that turns text into another language.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_language: &str) -> TranslationResult<String>;
}

pub fn translation_prompt(text: &str, target_language: &str) -> String {
    format!("Translate the following text into {target_language}: {text}")
}

/// Builds the configured backend. A missing key or a client that cannot be
/// built leaves translation disabled rather than stopping startup.
pub fn build_translator(cfg: &TranslationConfig) -> Option<Arc<dyn Translator>> {
    match GeminiTranslator::from_config(cfg) {
        Ok(Some(translator)) => {
            info!(model = %cfg.model, "translation service enabled");
            Some(Arc::new(translator))
        }
        Ok(None) => {
            warn!("GOOGLE_API_KEY not set; translation service will be unavailable");
            None
        }
        Err(err) => {
            warn!(error = %err, "failed to configure translation backend; translation disabled");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{build_translator, translation_prompt};
    use crate::config::TranslationConfig;

    #[test]
    fn backend_is_absent_without_api_key() {
        assert!(build_translator(&TranslationConfig::default()).is_none());

        let blank = TranslationConfig {
            api_key: Some("  ".to_string()),
            ..TranslationConfig::default()
        };
        assert!(build_translator(&blank).is_none());
    }

    #[test]
    fn backend_is_built_when_api_key_is_set() {
        let cfg = TranslationConfig {
            api_key: Some("test-key".to_string()),
            ..TranslationConfig::default()
        };
        assert!(build_translator(&cfg).is_some());
    }

    #[test]
    fn prompt_embeds_language_then_text() {
        assert_eq!(
            translation_prompt("Buy milk", "Spanish"),
            "Translate the following text into Spanish: Buy milk"
        );
    }
}
