//! Model gateway.
//!
//! Owns the provider credential and model id, builds the provider handle at
//! most once, and is the only entry point for generation requests. A gateway
//! that fails to initialize stays unconfigured for the life of the process and
//! every call reports [`GatewayError::Configuration`] without touching the
//! network.

use crate::services::providers::{ProviderConnector, ProviderError, TextProvider};
use secrecy::Secret;
use service_core::error::AppError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Gemini model is not initialized: {0}")]
    Configuration(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Configuration(_) => AppError::ConfigError(anyhow::Error::new(err)),
            GatewayError::Provider(e) => AppError::UpstreamError(e.to_string()),
        }
    }
}

/// Observable gateway state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayStatus {
    Ready { model: String },
    Unconfigured { reason: String },
}

enum GatewayState {
    Ready(Arc<dyn TextProvider>),
    Unconfigured(String),
}

pub struct ModelGateway {
    api_key: Option<Secret<String>>,
    model: String,
    connector: Arc<dyn ProviderConnector>,
    state: OnceLock<GatewayState>,
    init_attempts: AtomicUsize,
}

impl std::fmt::Debug for ModelGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelGateway")
            .field("model", &self.model)
            .field("initialized", &self.state.get().is_some())
            .finish_non_exhaustive()
    }
}

impl ModelGateway {
    /// Creates an uninitialized gateway.
    ///
    /// Initialization runs synchronously on whichever thread first needs it
    /// and may build an HTTP client. Call [`ModelGateway::warm_up`] before
    /// serving so that cost is not paid on a runtime worker.
    pub fn new(
        api_key: Option<Secret<String>>,
        model: impl Into<String>,
        connector: Arc<dyn ProviderConnector>,
    ) -> Self {
        Self {
            api_key,
            model: model.into(),
            connector,
            state: OnceLock::new(),
            init_attempts: AtomicUsize::new(0),
        }
    }

    /// Runs initialization now instead of on first use.
    pub fn warm_up(&self) -> GatewayStatus {
        self.status()
    }

    pub fn status(&self) -> GatewayStatus {
        match self.state() {
            GatewayState::Ready(provider) => GatewayStatus::Ready {
                model: provider.model().to_string(),
            },
            GatewayState::Unconfigured(reason) => GatewayStatus::Unconfigured {
                reason: reason.clone(),
            },
        }
    }

    /// How many times initialization has run. Never more than one.
    pub fn initialization_attempts(&self) -> usize {
        self.init_attempts.load(Ordering::SeqCst)
    }

    /// Sends `prompt` to the provider and returns its reply unchanged.
    pub async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        let provider = match self.state() {
            GatewayState::Ready(provider) => Arc::clone(provider),
            GatewayState::Unconfigured(reason) => {
                tracing::error!(
                    reason = %reason,
                    "Gemini model is not initialized. Check API key configuration."
                );
                return Err(GatewayError::Configuration(reason.clone()));
            }
        };

        provider.generate(prompt).await.map_err(|e| {
            tracing::error!(
                model = %provider.model(),
                error = %e,
                "Error calling Gemini API"
            );
            GatewayError::Provider(e)
        })
    }

    // Concurrent first callers block here until the single attempt finishes.
    fn state(&self) -> &GatewayState {
        self.state.get_or_init(|| self.initialize())
    }

    fn initialize(&self) -> GatewayState {
        self.init_attempts.fetch_add(1, Ordering::SeqCst);

        let Some(api_key) = &self.api_key else {
            tracing::error!(
                "GEMINI_API_KEY not found in environment variables. \
                 Set it in a .env file or the process environment."
            );
            return GatewayState::Unconfigured("GEMINI_API_KEY is not set".to_string());
        };

        match self.connector.connect(api_key, &self.model) {
            Ok(provider) => {
                tracing::info!(
                    model = %provider.model(),
                    "Gemini API and model successfully configured"
                );
                GatewayState::Ready(provider)
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model,
                    error = %e,
                    "Failed to configure Gemini API or load model"
                );
                GatewayState::Unconfigured(e.to_string())
            }
        }
    }
}
