use async_trait::async_trait;
use reqwest::Client;

use super::{openai_compat, CompletionOptions, LlmError, LlmProvider, ProviderDescriptor};

pub const NAME: &str = "openai";
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI chat-completions provider.
pub struct OpenAiProvider {
    client: Client,
    descriptor: ProviderDescriptor,
}

impl OpenAiProvider {
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
impl LlmProvider for OpenAiProvider {
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

#[cfg(test)]
mod tests {
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::llm_client::testing::{http_client, serve};

    fn provider(api_key: Option<&str>, base: &str) -> OpenAiProvider {
        OpenAiProvider::new(
            http_client(5),
            api_key.map(str::to_string),
            DEFAULT_MODEL.to_string(),
            base.to_string(),
        )
    }

    #[tokio::test]
    async fn test_unconfigured_provider_fails_without_network() {
        // Nothing listens on the base; a network attempt would surface as Generation.
        let openai = provider(None, "http://127.0.0.1:9");
        assert!(!openai.is_available());

        let err = openai
            .generate_response("hello", &CompletionOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::ProviderUnavailable { ref provider } if provider == "openai"));
    }

    #[tokio::test]
    async fn test_generate_response_round_trip() {
        let router = Router::new().route(
            "/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["authorization"], "Bearer sk-test");
                assert_eq!(body["model"], "gpt-4");
                assert_eq!(body["messages"][1]["content"], "Match me");
                assert_eq!(body["max_tokens"], 1234);
                Json(json!({
                    "choices": [{"message": {"role": "assistant", "content": "  {\"matches\": []}\n"}}],
                    "usage": {"prompt_tokens": 5, "completion_tokens": 3}
                }))
            }),
        );
        let base = serve(router).await;

        let options = CompletionOptions {
            max_tokens: 1234,
            ..CompletionOptions::default()
        };
        let text = provider(Some("sk-test"), &base)
            .generate_response("Match me", &options)
            .await
            .unwrap();
        assert_eq!(text, "{\"matches\": []}");
    }

    #[tokio::test]
    async fn test_non_success_status_names_vendor_and_cause() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"error": {"message": "Incorrect API key provided"}})),
                )
            }),
        );
        let base = serve(router).await;

        let err = provider(Some("sk-bad"), &base)
            .generate_response("hello", &CompletionOptions::default())
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, LlmError::Generation { .. }));
        assert!(message.contains("openai"));
        assert!(message.contains("401"));
        assert!(message.contains("Incorrect API key provided"));
    }
}
