//! LLM-backed resume analysis.
//!
//! Each task renders a prompt, dispatches exactly one completion through
//! `LlmHandler`, decodes the reply as JSON and checks that the task's required
//! top-level key is present. Nested fields are documented in the prompt and
//! trusted, not enforced.
//!
//! Per call: prompt built → awaiting provider → decoded | decode failed →
//! validated | validation failed. Failures return a typed error, never a partial result.

pub mod availability;
pub mod handlers;
pub mod prompts;
pub mod services;

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, error};

use crate::llm_client::{strip_json_fences, CompletionOptions, LlmError, LlmHandler};

/// Decoded task output. Always a JSON object containing the task's required key.
pub type TaskResult = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisTask {
    JobMatching,
    SkillGap,
    ResumeImprovement,
    SkillsExtraction,
}

impl AnalysisTask {
    /// Top-level key the decoded result must contain.
    pub fn required_key(self) -> &'static str {
        match self {
            AnalysisTask::JobMatching => "matches",
            AnalysisTask::SkillGap => "missing_skills",
            AnalysisTask::ResumeImprovement => "section_analysis",
            AnalysisTask::SkillsExtraction => "technical_skills",
        }
    }

    /// Extraction and matching run cold; improvement prose gets a little more room.
    pub fn options(self) -> CompletionOptions {
        let (max_tokens, temperature) = match self {
            AnalysisTask::JobMatching => (3000, 0.2),
            AnalysisTask::SkillGap => (2500, 0.2),
            AnalysisTask::ResumeImprovement => (3000, 0.3),
            AnalysisTask::SkillsExtraction => (2000, 0.1),
        };
        CompletionOptions {
            max_tokens,
            temperature,
            ..CompletionOptions::default()
        }
    }
}

impl fmt::Display for AnalysisTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AnalysisTask::JobMatching => "Job matching",
            AnalysisTask::SkillGap => "Skill gap analysis",
            AnalysisTask::ResumeImprovement => "Resume improvement analysis",
            AnalysisTask::SkillsExtraction => "Skills extraction",
        })
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// The raw model text is kept for logs only.
    #[error("{task} failed: invalid response format from LLM ({source})")]
    InvalidResponseFormat {
        task: AnalysisTask,
        #[source]
        source: serde_json::Error,
        raw: String,
    },

    #[error("{task} failed: LLM response missing '{field}' field")]
    SchemaValidation {
        task: AnalysisTask,
        field: &'static str,
    },
}

/// Runs one task end to end against the handler.
pub(crate) async fn run_task(
    llm: &LlmHandler,
    task: AnalysisTask,
    prompt: &str,
) -> Result<TaskResult, AnalysisError> {
    debug!("{task}: prompt built ({} chars)", prompt.len());

    let raw = llm
        .generate_response(prompt, &task.options())
        .await
        .map_err(|e| {
            error!("{task} failed: {e}");
            AnalysisError::Llm(e)
        })?;
    debug!("{task}: provider returned {} chars", raw.len());

    let result = decode_and_validate(task, &raw)?;
    debug!("{task}: validated '{}'", task.required_key());
    Ok(result)
}

/// Decodes raw model text and checks the task's required top-level key.
pub(crate) fn decode_and_validate(task: AnalysisTask, raw: &str) -> Result<TaskResult, AnalysisError> {
    let value: Value = serde_json::from_str(strip_json_fences(raw)).map_err(|source| {
        error!("{task}: failed to parse LLM response as JSON: {source}");
        error!("{task}: raw response: {raw}");
        AnalysisError::InvalidResponseFormat {
            task,
            source,
            raw: raw.to_string(),
        }
    })?;

    let field = task.required_key();
    match value {
        Value::Object(map) if map.contains_key(field) => Ok(map),
        _ => {
            error!("{task}: LLM response missing '{field}' field");
            Err(AnalysisError::SchemaValidation { task, field })
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_required_keys() {
        assert_eq!(AnalysisTask::JobMatching.required_key(), "matches");
        assert_eq!(AnalysisTask::SkillGap.required_key(), "missing_skills");
        assert_eq!(AnalysisTask::ResumeImprovement.required_key(), "section_analysis");
        assert_eq!(AnalysisTask::SkillsExtraction.required_key(), "technical_skills");
    }

    #[test]
    fn test_task_options_stay_in_range() {
        for task in [
            AnalysisTask::JobMatching,
            AnalysisTask::SkillGap,
            AnalysisTask::ResumeImprovement,
            AnalysisTask::SkillsExtraction,
        ] {
            let options = task.options();
            assert!((2000..=3000).contains(&options.max_tokens), "{task}");
            assert!((0.1..=0.3).contains(&options.temperature), "{task}");
        }
        assert!(
            AnalysisTask::SkillsExtraction.options().temperature
                < AnalysisTask::ResumeImprovement.options().temperature
        );
    }

    #[test]
    fn test_decode_accepts_fenced_json() {
        let raw = "```json\n{\"matches\": [], \"analysis_summary\": \"thin\"}\n```";
        let result = decode_and_validate(AnalysisTask::JobMatching, raw).unwrap();
        assert_eq!(result["analysis_summary"], json!("thin"));
    }

    #[test]
    fn test_decode_malformed_json() {
        let err = decode_and_validate(AnalysisTask::SkillGap, "{\"missing_skills\": [").unwrap_err();
        match err {
            AnalysisError::InvalidResponseFormat { task, raw, .. } => {
                assert_eq!(task, AnalysisTask::SkillGap);
                assert_eq!(raw, "{\"missing_skills\": [");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_prose_is_invalid_format() {
        let err = decode_and_validate(
            AnalysisTask::SkillsExtraction,
            "Sure! Here are the skills I found: Python, AWS.",
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidResponseFormat { .. }));
    }

    #[test]
    fn test_invalid_format_message_hides_raw_text() {
        let err = decode_and_validate(AnalysisTask::JobMatching, "secret model ramble").unwrap_err();
        assert!(!err.to_string().contains("secret model ramble"));
    }

    #[test]
    fn test_decode_missing_required_key() {
        let err = decode_and_validate(
            AnalysisTask::ResumeImprovement,
            r#"{"overall_assessment": "fine", "priority_score": 70}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::SchemaValidation { field: "section_analysis", .. }
        ));
        assert_eq!(
            err.to_string(),
            "Resume improvement analysis failed: LLM response missing 'section_analysis' field"
        );
    }

    #[test]
    fn test_decode_non_object_is_schema_error() {
        let err = decode_and_validate(AnalysisTask::JobMatching, r#"[{"matches": []}]"#).unwrap_err();
        assert!(matches!(err, AnalysisError::SchemaValidation { .. }));
    }

    #[test]
    fn test_decode_does_not_inspect_nested_fields() {
        let result =
            decode_and_validate(AnalysisTask::SkillsExtraction, r#"{"technical_skills": "not a list"}"#)
                .unwrap();
        assert_eq!(result["technical_skills"], json!("not a list"));
    }
}
