use async_trait::async_trait;
use reqwest::Client;

use super::{openai_compat, CompletionOptions, LlmError, LlmProvider, ProviderDescriptor};

pub const NAME: &str = "mistral";
pub const DEFAULT_MODEL: &str = "mistral-large-latest";
pub const DEFAULT_API_BASE: &str = "https://api.mistral.ai/v1";

/// Mistral AI provider. Speaks the OpenAI-compatible chat-completions format.
pub struct MistralProvider {
    client: Client,
    descriptor: ProviderDescriptor,
}

impl MistralProvider {
    pub fn new(client: Client, api_key: Option<String>, model: String, api_base: String) -> Self {
        Self {
            client,
            descriptor: ProviderDescriptor {
                name: NAME,
                api_key,
                model,
                endpoint: api_base,
            },
        }
    }
}

#[async_trait]
impl LlmProvider for MistralProvider {
    fn name(&self) -> &str {
        NAME
    }

    fn is_configured(&self) -> bool {
        self.descriptor.has_credential()
    }

    async fn generate_response(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, LlmError> {
        if !self.is_available() {
            return Err(LlmError::ProviderUnavailable {
                provider: NAME.to_string(),
            });
        }
        openai_compat::chat_completion(&self.client, &self.descriptor, prompt, options).await
    }
}
