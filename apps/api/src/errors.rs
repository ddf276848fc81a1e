use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// No usable provider, or the selected one lacks credentials.
    #[error("LLM unavailable: {0}")]
    LlmUnavailable(String),

    /// Network or vendor failure during the single dispatched call.
    #[error("LLM generation error: {0}")]
    LlmGeneration(String),

    /// The model replied with something that is not JSON.
    #[error("LLM response format error: {0}")]
    LlmResponseFormat(String),

    /// The model replied with JSON lacking the task's required key.
    #[error("LLM schema validation error: {0}")]
    LlmSchema(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Llm(LlmError::ProviderUnavailable { .. })
            | AnalysisError::Llm(LlmError::NoProviderAvailable) => {
                AppError::LlmUnavailable(err.to_string())
            }
            AnalysisError::Llm(LlmError::Generation { .. }) => AppError::LlmGeneration(err.to_string()),
            AnalysisError::InvalidResponseFormat { task, raw, .. } => {
                tracing::debug!("{task}: withholding {} chars of unparseable model output", raw.len());
                AppError::LlmResponseFormat(format!("{task} failed: invalid response format from LLM"))
            }
            AnalysisError::SchemaValidation { .. } => AppError::LlmSchema(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::LlmUnavailable(msg) => {
                tracing::warn!("LLM unavailable: {msg}");
                (StatusCode::SERVICE_UNAVAILABLE, "LLM_UNAVAILABLE", msg.clone())
            }
            AppError::LlmGeneration(msg) => {
                tracing::error!("LLM generation error: {msg}");
                (StatusCode::BAD_GATEWAY, "LLM_GENERATION_ERROR", msg.clone())
            }
            AppError::LlmResponseFormat(msg) => {
                tracing::error!("LLM response format error: {msg}");
                (StatusCode::BAD_GATEWAY, "INVALID_RESPONSE_FORMAT", msg.clone())
            }
            AppError::LlmSchema(msg) => {
                tracing::error!("LLM schema validation error: {msg}");
                (StatusCode::BAD_GATEWAY, "SCHEMA_VALIDATION_ERROR", msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisTask;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_llm_errors_map_to_distinct_statuses() {
        let unavailable: AppError = AnalysisError::Llm(LlmError::NoProviderAvailable).into();
        assert!(matches!(unavailable, AppError::LlmUnavailable(_)));
        assert_eq!(status_of(unavailable), StatusCode::SERVICE_UNAVAILABLE);

        let generation: AppError =
            AnalysisError::Llm(LlmError::generation("anthropic", "timed out")).into();
        assert!(matches!(generation, AppError::LlmGeneration(ref m) if m.contains("anthropic")));
        assert_eq!(status_of(generation), StatusCode::BAD_GATEWAY);

        let schema: AppError = AnalysisError::SchemaValidation {
            task: AnalysisTask::SkillGap,
            field: "missing_skills",
        }
        .into();
        assert!(matches!(schema, AppError::LlmSchema(_)));
    }

    #[test]
    fn test_invalid_format_does_not_leak_raw_text() {
        let source = serde_json::from_str::<serde_json::Value>("Here is your answer").unwrap_err();
        let err: AppError = AnalysisError::InvalidResponseFormat {
            task: AnalysisTask::JobMatching,
            source,
            raw: "Here is your answer".to_string(),
        }
        .into();
        let message = err.to_string();
        assert!(matches!(err, AppError::LlmResponseFormat(_)));
        assert!(!message.contains("Here is your answer"));
    }

    #[test]
    fn test_provider_unavailable_is_503() {
        let err: AppError = AnalysisError::Llm(LlmError::ProviderUnavailable {
            provider: "openai".to_string(),
        })
        .into();
        assert_eq!(status_of(err), StatusCode::SERVICE_UNAVAILABLE);
    }
}
