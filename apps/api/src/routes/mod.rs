pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::analysis::handlers as analysis;
use crate::errors::AppError;
use crate::matching::handlers as matching;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("Endpoint not found".to_string())
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    let router = Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/health", get(health::health_handler))
        // Upload + keyword matching
        .route("/api/upload_resume", post(matching::handle_upload_resume))
        .route("/api/recommend_jobs", post(matching::handle_recommend_jobs))
        .route("/api/skill_gap", post(matching::handle_skill_gap))
        // LLM analysis
        .route("/api/llm/status", get(analysis::handle_llm_status))
        .route("/api/llm/match_jobs", post(analysis::handle_match_jobs))
        .route("/api/llm/skill_gap", post(analysis::handle_llm_skill_gap))
        .route("/api/llm/improve_resume", post(analysis::handle_improve_resume))
        .route("/api/llm/extract_skills", post(analysis::handle_extract_skills));

    // Unmatched paths and non-GET methods both end in the JSON 404.
    let router = match &state.config.static_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir)
                .call_fallback_on_method_not_allowed(true)
                .not_found_service(not_found.into_service()),
        ),
        None => router.fallback(not_found),
    };

    router.layer(body_limit).with_state(state)
}
