//! AI provider abstractions and implementations.
//!
//! A [`ProviderConnector`] turns a credential and model id into a ready
//! [`TextProvider`]. The gateway only ever talks to these traits, so the
//! Gemini backend and the mock used in tests are interchangeable.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use secrecy::Secret;
use std::sync::Arc;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Content filtered: {0}")]
    ContentFiltered(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// A configured handle to a text generation model.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a text reply for `prompt`, returned verbatim.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Identifier of the model behind this handle.
    fn model(&self) -> &str;
}

/// Builds provider handles from configuration.
pub trait ProviderConnector: Send + Sync {
    fn connect(
        &self,
        api_key: &Secret<String>,
        model: &str,
    ) -> Result<Arc<dyn TextProvider>, ProviderError>;
}
