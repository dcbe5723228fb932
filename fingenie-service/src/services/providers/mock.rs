//! Mock provider implementations for testing.

use super::{ProviderConnector, ProviderError, TextProvider};
use async_trait::async_trait;
use secrecy::Secret;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum MockReply {
    Echo,
    Text(String),
    Fail(ProviderError),
}

/// Mock text provider that records every prompt it receives.
#[derive(Debug)]
pub struct MockTextProvider {
    model: String,
    reply: MockReply,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    fn with_reply(reply: MockReply) -> Self {
        Self {
            model: "mock-model".to_string(),
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Replies with `Mock response for: <prompt>`.
    pub fn echo() -> Self {
        Self::with_reply(MockReply::Echo)
    }

    /// Replies with `text` for every prompt.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Text(text.into()))
    }

    /// Fails every call with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self::with_reply(MockReply::Fail(error))
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts().len()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(prompt.to_string());

        match &self.reply {
            MockReply::Echo => Ok(format!("Mock response for: {}", prompt)),
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Fail(err) => Err(err.clone()),
        }
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Mock connector handing out a shared [`MockTextProvider`].
#[derive(Debug)]
pub struct MockConnector {
    provider: Arc<MockTextProvider>,
    failure: Option<ProviderError>,
    connects: AtomicUsize,
}

impl MockConnector {
    pub fn new(provider: Arc<MockTextProvider>) -> Self {
        Self {
            provider,
            failure: None,
            connects: AtomicUsize::new(0),
        }
    }

    /// A connector whose every connection attempt fails with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self {
            provider: Arc::new(MockTextProvider::echo()),
            failure: Some(error),
            connects: AtomicUsize::new(0),
        }
    }

    pub fn provider(&self) -> Arc<MockTextProvider> {
        Arc::clone(&self.provider)
    }

    /// Number of times `connect` has been called.
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

impl ProviderConnector for MockConnector {
    fn connect(
        &self,
        _api_key: &Secret<String>,
        _model: &str,
    ) -> Result<Arc<dyn TextProvider>, ProviderError> {
        self.connects.fetch_add(1, Ordering::SeqCst);

        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        let provider: Arc<dyn TextProvider> = self.provider.clone();
        Ok(provider)
    }
}
