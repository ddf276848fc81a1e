//! Chat-completions wire codec shared by OpenAI and Mistral.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::prompts::ANALYST_SYSTEM;
use super::{vendor_error_message, CompletionOptions, LlmError, ProviderDescriptor};

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatCompletionResponse {
    /// Text of the top choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

pub(crate) fn build_request<'a>(
    model: &'a str,
    prompt: &'a str,
    options: &CompletionOptions,
) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: ANALYST_SYSTEM,
            },
            ChatMessage {
                role: "user",
                content: prompt,
            },
        ],
        max_tokens: options.max_tokens,
        temperature: options.temperature,
        top_p: options.top_p,
    }
}

/// POSTs one chat completion to `{endpoint}/chat/completions` and returns the trimmed text.
pub(crate) async fn chat_completion(
    client: &Client,
    descriptor: &ProviderDescriptor,
    prompt: &str,
    options: &CompletionOptions,
) -> Result<String, LlmError> {
    let vendor = descriptor.name;
    let url = format!("{}/chat/completions", descriptor.endpoint.trim_end_matches('/'));
    let body = build_request(&descriptor.model, prompt, options);

    let response = client
        .post(&url)
        .bearer_auth(descriptor.api_key())
        .json(&body)
        .send()
        .await
        .map_err(|e| {
            error!("{vendor} API error: {e}");
            LlmError::from_reqwest(vendor, e)
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = vendor_error_message(&body);
        error!("{vendor} API error: {} - {message}", status.as_u16());
        return Err(LlmError::generation(
            vendor,
            format!("{} - {message}", status.as_u16()),
        ));
    }

    let parsed: ChatCompletionResponse = response
        .json()
        .await
        .map_err(|e| LlmError::generation(vendor, format!("unreadable response body: {e}")))?;

    if let Some(usage) = &parsed.usage {
        debug!(
            "{vendor} call succeeded: prompt_tokens={}, completion_tokens={}",
            usage.prompt_tokens, usage.completion_tokens
        );
    }

    parsed
        .text()
        .map(|text| text.trim().to_string())
        .ok_or_else(|| LlmError::generation(vendor, "response contained no completion"))
}
