//! Axum route handlers for the LLM analysis API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::analysis::availability::{check_llm_availability, LlmAvailability};
use crate::analysis::services::{analyze_skill_gap, extract_skills, improve_resume, match_jobs};
use crate::analysis::TaskResult;
use crate::corpus::JobRecord;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchJobsRequest {
    #[serde(default)]
    pub resume_text: String,
    /// Jobs to match against. Defaults to the whole corpus.
    pub jobs: Option<Vec<JobRecord>>,
}

#[derive(Debug, Deserialize)]
pub struct ResumeJobRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct ResumeOnlyRequest {
    #[serde(default)]
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub result: TaskResult,
}

impl AnalysisResponse {
    fn ok(result: TaskResult) -> Json<Self> {
        Json(Self {
            success: true,
            result,
        })
    }
}

fn require<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed)
}

/// GET /api/llm/status
pub async fn handle_llm_status(State(state): State<AppState>) -> Json<LlmAvailability> {
    Json(check_llm_availability(&state.llm))
}

/// POST /api/llm/match_jobs
pub async fn handle_match_jobs(
    State(state): State<AppState>,
    AppJson(request): AppJson<MatchJobsRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let resume_text = require(&request.resume_text, "resume_text")?;
    let jobs = match &request.jobs {
        Some(jobs) => jobs.as_slice(),
        None => state.jobs.jobs(),
    };
    if jobs.is_empty() {
        return Err(AppError::Validation("No jobs to match against".to_string()));
    }

    let result = match_jobs(&state.llm, resume_text, jobs).await?;
    Ok(AnalysisResponse::ok(result))
}

/// POST /api/llm/skill_gap
pub async fn handle_llm_skill_gap(
    State(state): State<AppState>,
    AppJson(request): AppJson<ResumeJobRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let resume_text = require(&request.resume_text, "resume_text")?;
    let job_description = require(&request.job_description, "job_description")?;

    let result = analyze_skill_gap(&state.llm, resume_text, job_description).await?;
    Ok(AnalysisResponse::ok(result))
}

/// POST /api/llm/improve_resume
pub async fn handle_improve_resume(
    State(state): State<AppState>,
    AppJson(request): AppJson<ResumeJobRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let resume_text = require(&request.resume_text, "resume_text")?;
    let job_description = require(&request.job_description, "job_description")?;

    let result = improve_resume(&state.llm, resume_text, job_description).await?;
    Ok(AnalysisResponse::ok(result))
}

/// POST /api/llm/extract_skills
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    AppJson(request): AppJson<ResumeOnlyRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let resume_text = require(&request.resume_text, "resume_text")?;

    let result = extract_skills(&state.llm, resume_text).await?;
    Ok(AnalysisResponse::ok(result))
}
