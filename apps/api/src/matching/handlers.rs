//! Axum route handlers for upload and keyword matching.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::extraction::{extract_text_from_pdf, is_allowed_file, secure_filename};
use crate::matching::keywords::{keyword_skill_gap, recommend_jobs, JobRecommendation, DEFAULT_TOP_K};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub text: String,
    pub filename: String,
    pub character_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub success: bool,
    pub recommendations: Vec<JobRecommendation>,
    pub total_recommendations: usize,
}

#[derive(Debug, Deserialize)]
pub struct SkillGapRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct SkillGapResponse {
    pub success: bool,
    pub analysis: Vec<String>,
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status().as_u16() == 413 {
        AppError::PayloadTooLarge("File too large".to_string())
    } else {
        AppError::Validation(format!("Malformed upload: {}", e.body_text()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/upload_resume
///
/// Multipart upload with a `file` field containing a PDF. Returns the extracted text.
pub async fn handle_upload_resume(mut multipart: Multipart) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(AppError::Validation("No file selected".to_string()));
        }
        if !is_allowed_file(&filename) {
            return Err(AppError::Validation("Only PDF files are allowed".to_string()));
        }

        let data = field.bytes().await.map_err(multipart_error)?;
        let text = extract_text_from_pdf(data).await?;
        if text.is_empty() {
            return Err(AppError::Validation(
                "No text could be extracted from the PDF".to_string(),
            ));
        }

        let filename = secure_filename(&filename);
        info!("Extracted {} chars from {filename}", text.chars().count());
        return Ok(Json(UploadResponse {
            success: true,
            character_count: text.chars().count(),
            text,
            filename,
        }));
    }

    Err(AppError::Validation("No file provided".to_string()))
}

/// POST /api/recommend_jobs
///
/// Keyword-overlap recommendations against the job corpus.
pub async fn handle_recommend_jobs(
    State(state): State<AppState>,
    AppJson(request): AppJson<RecommendRequest>,
) -> Result<Json<RecommendResponse>, AppError> {
    let resume_text = request.resume_text.trim();
    if resume_text.is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }

    let recommendations = recommend_jobs(resume_text, state.jobs.jobs(), DEFAULT_TOP_K);

    Ok(Json(RecommendResponse {
        success: true,
        total_recommendations: recommendations.len(),
        recommendations,
    }))
}

/// POST /api/skill_gap
///
/// Vocabulary skills the job description names and the resume lacks.
pub async fn handle_skill_gap(
    AppJson(request): AppJson<SkillGapRequest>,
) -> Result<Json<SkillGapResponse>, AppError> {
    let resume_text = request.resume_text.trim();
    let job_description = request.job_description.trim();
    if resume_text.is_empty() || job_description.is_empty() {
        return Err(AppError::Validation(
            "resume_text and job_description cannot be empty".to_string(),
        ));
    }

    Ok(Json(SkillGapResponse {
        success: true,
        analysis: keyword_skill_gap(resume_text, job_description),
    }))
}
