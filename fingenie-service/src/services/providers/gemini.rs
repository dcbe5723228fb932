//! Gemini AI provider implementation.
//!
//! Implements text generation using Google's Gemini `generateContent` API.

use super::{ProviderConnector, ProviderError, TextProvider};
use crate::config::DEFAULT_GEMINI_API_BASE;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Header carrying the API key, kept out of request URLs.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Secret<String>,
    pub model: String,
    pub api_base: String,
}

/// Gemini text provider.
#[derive(Debug)]
pub struct GeminiTextProvider {
    model: String,
    url: String,
    client: Client,
}

impl GeminiTextProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let key = config.api_key.expose_secret().trim();
        if key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key is empty".to_string(),
            ));
        }

        let mut key_value = HeaderValue::from_str(key).map_err(|_| {
            ProviderError::NotConfigured("Gemini API key contains invalid characters".to_string())
        })?;
        key_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key_value);

        // No request timeout: callers decide how long to wait.
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| {
                ProviderError::NotConfigured(format!("Failed to create HTTP client: {}", e))
            })?;

        let model = config
            .model
            .trim()
            .trim_start_matches("models/")
            .to_string();
        if model.is_empty() {
            return Err(ProviderError::NotConfigured(
                "Gemini model id is empty".to_string(),
            ));
        }

        let url = format!(
            "{}/models/{}:generateContent",
            config.api_base.trim_end_matches('/'),
            model
        );

        Ok(Self { model, url, client })
    }
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        tracing::debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited(error_text));
            }

            return Err(ProviderError::ApiError(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response.json().await.map_err(|e| {
            ProviderError::MalformedResponse(format!(
                "Failed to parse response: {}",
                e.without_url()
            ))
        })?;

        extract_text(api_response)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Joins the text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String, ProviderError> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(ProviderError::ContentFiltered(format!(
            "prompt blocked: {}",
            reason
        )));
    }

    let candidate = response.candidates.into_iter().next().ok_or_else(|| {
        ProviderError::MalformedResponse("response contained no candidates".to_string())
    })?;

    if candidate.finish_reason.as_deref() == Some("SAFETY") {
        return Err(ProviderError::ContentFiltered(
            "response blocked by safety filters".to_string(),
        ));
    }

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
    if parts.is_empty() {
        return Err(ProviderError::MalformedResponse(
            "candidate contained no content parts".to_string(),
        ));
    }

    Ok(parts.into_iter().filter_map(|p| p.text).collect())
}

/// Connector producing [`GeminiTextProvider`] handles.
#[derive(Debug, Clone)]
pub struct GeminiConnector {
    api_base: String,
}

impl GeminiConnector {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }
}

impl Default for GeminiConnector {
    fn default() -> Self {
        Self::new(DEFAULT_GEMINI_API_BASE)
    }
}

impl ProviderConnector for GeminiConnector {
    fn connect(
        &self,
        api_key: &Secret<String>,
        model: &str,
    ) -> Result<Arc<dyn TextProvider>, ProviderError> {
        let provider = GeminiTextProvider::new(GeminiConfig {
            api_key: api_key.clone(),
            model: model.to_string(),
            api_base: self.api_base.clone(),
        })?;
        Ok(Arc::new(provider))
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}
