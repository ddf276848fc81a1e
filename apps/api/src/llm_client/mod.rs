//! LLM Client: the single point of entry for all vendor API calls in SkillSnap.
//!
//! ARCHITECTURAL RULE: No other module may call a vendor API directly.
//! All LLM interactions MUST go through `LlmHandler`, which picks one provider
//! per call (preferred first, then the fixed fallback order).
//!
//! Providers: OpenAI, Anthropic, Mistral. OpenAI and Mistral share the
//! chat-completions wire codec in `openai_compat`.
use async_trait::async_trait;
use thiserror::Error;

pub mod anthropic;
pub mod handler;
pub mod mistral;
pub mod openai;
mod openai_compat;
pub mod prompts;

pub use handler::{LlmHandler, ProviderInfo};

/// Errors raised by the provider layer.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{provider} API key not configured")]
    ProviderUnavailable { provider: String },

    #[error("No LLM provider is available. Please configure at least one API key.")]
    NoProviderAvailable,

    #[error("Failed to generate response from {provider}: {message}")]
    Generation { provider: String, message: String },
}

impl LlmError {
    pub(crate) fn generation(provider: &str, message: impl Into<String>) -> Self {
        LlmError::Generation {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    /// Maps a transport failure, calling out timeouts explicitly.
    pub(crate) fn from_reqwest(provider: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::generation(provider, format!("request timed out: {err}"))
        } else {
            Self::generation(provider, err.to_string())
        }
    }
}

/// Generation options carried with every completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub max_tokens: u32,
    pub temperature: f32,
    /// Nucleus sampling. Sent only to vendors that accept it alongside temperature.
    pub top_p: f32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: 2000,
            temperature: 0.3,
            top_p: 0.9,
        }
    }
}

/// A pluggable backend wrapping one LLM vendor's API.
///
/// Carried by `LlmHandler` as `Arc<dyn LlmProvider>`; any type supplying these
/// methods can be registered.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Registry key, e.g. `"openai"`.
    fn name(&self) -> &str;

    /// True iff a non-empty credential was captured at construction.
    fn is_configured(&self) -> bool;

    /// Whether the provider can be selected. Pure check against captured config.
    ///
    /// The vendor adapters need nothing beyond a credential, so for them this
    /// equals `is_configured`. Config already folds blank keys into "unset",
    /// which makes raw credential presence and usable credential the same thing.
    fn is_available(&self) -> bool {
        self.is_configured()
    }

    /// Issues one request and returns the trimmed text of the top completion.
    ///
    /// Fails with `ProviderUnavailable` before touching the network when the
    /// provider is not available.
    async fn generate_response(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, LlmError>;
}

/// Static description of a vendor backend, built once from config.
#[derive(Debug, Clone)]
pub struct ProviderDescriptor {
    pub name: &'static str,
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
}

impl ProviderDescriptor {
    pub(crate) fn has_credential(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    pub(crate) fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }
}

/// Pulls a human-readable message out of a vendor error body.
/// Understands `{"error": {"message": ..}}` and `{"message": ..}`; falls back to the raw body.
pub(crate) fn vendor_error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|v| {
            v.pointer("/error/message")
                .or_else(|| v.get("message"))
                .and_then(|m| m.as_str())
        })
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string())
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
/// Any info string on the opening fence (`JSON`, `js`, ..) is dropped with it.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(body) = text.strip_prefix("```") else {
        return text;
    };

    let tag_end = body
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(body.len());
    let (tag, rest) = body.split_at(tag_end);
    let body = if tag.eq_ignore_ascii_case("json") || rest.starts_with(char::is_whitespace) {
        rest
    } else {
        body
    };

    let body = body.trim_start();
    body.strip_suffix("```").map(str::trim).unwrap_or(body)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_tag_is_case_insensitive() {
        assert_eq!(strip_json_fences("```JSON\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_json_fences("```Json {\"a\": 1}```"), "{\"a\": 1}");
        assert_eq!(strip_json_fences("```json{\"a\": 1}```"), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_json_fences_drops_other_info_strings() {
        assert_eq!(strip_json_fences("```javascript\n[1, 2]\n```"), "[1, 2]");
    }

    #[test]
    fn test_strip_json_fences_unterminated() {
        assert_eq!(strip_json_fences("```json\n{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "  {\"key\": \"value\"}\n";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_default_completion_options() {
        let options = CompletionOptions::default();
        assert_eq!(options.max_tokens, 2000);
        assert!((options.temperature - 0.3).abs() < f32::EPSILON);
        assert!((options.top_p - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_descriptor_blank_key_is_not_a_credential() {
        let descriptor = ProviderDescriptor {
            name: "openai",
            api_key: Some("   ".to_string()),
            model: "gpt-4".to_string(),
            endpoint: "https://api.openai.com/v1".to_string(),
        };
        assert!(!descriptor.has_credential());

        let missing = ProviderDescriptor {
            api_key: None,
            ..descriptor.clone()
        };
        assert!(!missing.has_credential());

        let present = ProviderDescriptor {
            api_key: Some("sk-test".to_string()),
            ..descriptor
        };
        assert!(present.has_credential());
    }

    #[test]
    fn test_vendor_error_message_nested() {
        let body = r#"{"error": {"message": "Invalid API key", "type": "auth"}}"#;
        assert_eq!(vendor_error_message(body), "Invalid API key");
    }

    #[test]
    fn test_vendor_error_message_flat() {
        let body = r#"{"message": "Unauthorized", "request_id": "abc"}"#;
        assert_eq!(vendor_error_message(body), "Unauthorized");
    }

    #[test]
    fn test_vendor_error_message_raw_body() {
        assert_eq!(vendor_error_message(" upstream exploded \n"), "upstream exploded");
    }

    #[test]
    fn test_generation_error_names_vendor() {
        let err = LlmError::generation("mistral", "503 - overloaded");
        assert_eq!(
            err.to_string(),
            "Failed to generate response from mistral: 503 - overloaded"
        );
    }
}
