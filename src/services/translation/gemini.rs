use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::{TranslationError, TranslationResult, Translator, translation_prompt};
use crate::config::TranslationConfig;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Google Gemini `generateContent` client.
pub struct GeminiTranslator {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl GeminiTranslator {
    /// Returns `None` when no API key is configured.
    pub fn from_config(cfg: &TranslationConfig) -> TranslationResult<Option<Self>> {
        let Some(api_key) = cfg.api_key.as_deref().filter(|key| !key.trim().is_empty()) else {
            return Ok(None);
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Some(Self::with_client(
            client,
            api_key.to_string(),
            &cfg.base_url,
            &cfg.model,
        )))
    }

    pub fn with_client(client: Client, api_key: String, base_url: &str, model: &str) -> Self {
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            base_url.trim_end_matches('/'),
            model
        );
        Self {
            client,
            api_key,
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Translator for GeminiTranslator {
    async fn translate(&self, text: &str, target_language: &str) -> TranslationResult<String> {
        let prompt = translation_prompt(text, target_language);
        let request = GenerateContentRequest {
            contents: [Content {
                parts: [RequestPart { text: &prompt }],
            }],
        };

        debug!(endpoint = %self.endpoint, target_language, "sending translation request");

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = status.as_u16(), "translation backend returned an error");
            return Err(TranslationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| TranslationError::InvalidResponse(err.to_string()))?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(TranslationError::InvalidResponse(
                "response contained no text".to_string(),
            ));
        }

        Ok(text)
    }
}
