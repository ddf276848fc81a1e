use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::llm_client::{LlmHandler, ProviderInfo};

/// Read-only LLM status for the health surface. Recomputed on every probe.
#[derive(Debug, Clone, Serialize)]
pub struct LlmAvailability {
    pub available: bool,
    pub provider_info: ProviderInfo,
    pub error: Option<String>,
    pub checked_at: DateTime<Utc>,
}

pub fn check_llm_availability(llm: &LlmHandler) -> LlmAvailability {
    let provider_info = llm.provider_info();
    let available = !provider_info.available_providers.is_empty();

    LlmAvailability {
        available,
        error: (!available).then(|| {
            "No LLM providers configured. Set OPENAI_API_KEY, ANTHROPIC_API_KEY or MISTRAL_API_KEY."
                .to_string()
        }),
        provider_info,
        checked_at: Utc::now(),
    }
}
