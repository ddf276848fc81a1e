use axum::Json;
use serde_json::{json, Value};

/// GET /health, GET /api/health
/// Liveness only; LLM readiness lives at /api/llm/status.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "SkillSnap API is running",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
