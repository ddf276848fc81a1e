//! Provider registry and selector.
//!
//! The handler is built once at startup and shared read-only behind an `Arc`.
//! Selection is availability-based only: the preferred provider if available,
//! otherwise the first available provider in fallback order. Each call is
//! dispatched to exactly one provider; a failed call is not retried elsewhere.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use super::anthropic::AnthropicProvider;
use super::mistral::MistralProvider;
use super::openai::OpenAiProvider;
use super::{CompletionOptions, LlmError, LlmProvider};
use crate::config::Config;

/// Snapshot of provider state for the status surface.
///
/// `configured_providers` holds every provider with a credential;
/// `available_providers` those that can also be selected. For the built-in
/// vendor adapters the two lists are identical.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderInfo {
    pub preferred_provider: String,
    pub available_providers: Vec<String>,
    pub configured_providers: Vec<String>,
}

pub struct LlmHandler {
    /// Registered providers in fallback order.
    providers: Vec<Arc<dyn LlmProvider>>,
    preferred: String,
}

impl LlmHandler {
    /// Registers `providers` in the given order, which becomes the fallback order.
    pub fn new(providers: Vec<Arc<dyn LlmProvider>>, preferred: impl Into<String>) -> Self {
        let preferred = preferred.into().trim().to_lowercase();
        if !providers.iter().any(|p| p.name() == preferred) {
            warn!("Preferred LLM provider '{preferred}' is not a known provider; using fallback order");
        }
        Self {
            providers,
            preferred,
        }
    }

    /// Builds the OpenAI → Anthropic → Mistral registry with one shared HTTP client.
    /// Every provider gets the same request timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.llm_timeout_secs))
            .build()
            .context("Failed to build HTTP client for LLM providers")?;

        let providers: Vec<Arc<dyn LlmProvider>> = vec![
            Arc::new(OpenAiProvider::new(
                client.clone(),
                config.openai.api_key.clone(),
                config.openai.model.clone(),
                config.openai.api_base.clone(),
            )),
            Arc::new(AnthropicProvider::new(
                client.clone(),
                config.anthropic.api_key.clone(),
                config.anthropic.model.clone(),
                config.anthropic.api_base.clone(),
            )),
            Arc::new(MistralProvider::new(
                client,
                config.mistral.api_key.clone(),
                config.mistral.model.clone(),
                config.mistral.api_base.clone(),
            )),
        ];

        Ok(Self::new(providers, config.llm_provider.clone()))
    }

    pub fn preferred(&self) -> &str {
        &self.preferred
    }

    /// Names in fallback order.
    pub fn fallback_order(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|p| p.name())
    }

    fn provider(&self, name: &str) -> Option<&dyn LlmProvider> {
        self.providers
            .iter()
            .find(|p| p.name() == name)
            .map(|p| &**p)
    }

    /// Preferred provider if available, else the first available one in fallback order.
    pub fn select_provider(&self) -> Result<&dyn LlmProvider, LlmError> {
        if let Some(provider) = self.provider(&self.preferred).filter(|p| p.is_available()) {
            info!("Using preferred LLM provider: {}", provider.name());
            return Ok(provider);
        }

        let fallback = self
            .providers
            .iter()
            .find(|p| p.is_available())
            .ok_or(LlmError::NoProviderAvailable)?;
        info!("Using fallback LLM provider: {}", fallback.name());
        Ok(&**fallback)
    }

    /// Selects one provider and forwards the request to it. Single attempt.
    pub async fn generate_response(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, LlmError> {
        let provider = self.select_provider()?;
        provider.generate_response(prompt, options).await
    }

    pub fn provider_info(&self) -> ProviderInfo {
        let available_providers = self
            .providers
            .iter()
            .filter(|p| p.is_available())
            .map(|p| p.name().to_string())
            .collect();
        let configured_providers = self
            .providers
            .iter()
            .filter(|p| p.is_configured())
            .map(|p| p.name().to_string())
            .collect();

        ProviderInfo {
            preferred_provider: self.preferred.clone(),
            available_providers,
            configured_providers,
        }
    }
}
