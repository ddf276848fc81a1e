use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::prompts::ANALYST_SYSTEM;
use super::{vendor_error_message, CompletionOptions, LlmError, LlmProvider, ProviderDescriptor};

pub const NAME: &str = "anthropic";
pub const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";
pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

// Nucleus sampling is left out: current Claude models reject top_p combined with temperature.
#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl AnthropicResponse {
    /// Extracts the text content from the first text block.
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

/// Anthropic Messages API provider.
pub struct AnthropicProvider {
    client: Client,
    descriptor: ProviderDescriptor,
}

impl AnthropicProvider {
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

    fn build_request<'a>(&'a self, prompt: &'a str, options: &CompletionOptions) -> AnthropicRequest<'a> {
        AnthropicRequest {
            model: &self.descriptor.model,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            system: ANALYST_SYSTEM,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
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

        let url = format!("{}/v1/messages", self.descriptor.endpoint.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.descriptor.api_key())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.build_request(prompt, options))
            .send()
            .await
            .map_err(|e| {
                error!("Anthropic API error: {e}");
                LlmError::from_reqwest(NAME, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = vendor_error_message(&body);
            error!("Anthropic API error: {} - {message}", status.as_u16());
            return Err(LlmError::generation(
                NAME,
                format!("{} - {message}", status.as_u16()),
            ));
        }

        let parsed: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| LlmError::generation(NAME, format!("unreadable response body: {e}")))?;

        if let Some(usage) = &parsed.usage {
            debug!(
                "Anthropic call succeeded: input_tokens={}, output_tokens={}",
                usage.input_tokens, usage.output_tokens
            );
        }

        parsed
            .text()
            .map(|text| text.trim().to_string())
            .ok_or_else(|| LlmError::generation(NAME, "response contained no text block"))
    }
}
