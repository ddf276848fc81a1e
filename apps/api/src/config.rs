use std::fmt;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::llm_client::{anthropic, mistral, openai};

const DEFAULT_PORT: u16 = 5001;
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Credential, model and endpoint for one LLM vendor.
#[derive(Clone, PartialEq)]
pub struct ProviderSettings {
    /// `None` when the variable is unset or blank.
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Application configuration loaded from environment variables.
/// Read once at startup and treated as immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Preferred LLM provider name, lowercased.
    pub llm_provider: String,
    /// Network timeout applied uniformly to every provider.
    pub llm_timeout_secs: u64,
    pub openai: ProviderSettings,
    pub anthropic: ProviderSettings,
    pub mistral: ProviderSettings,
    pub jobs_path: PathBuf,
    /// Front-end assets served for unmatched GET paths. Unset means no static serving.
    pub static_dir: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let llm_timeout_secs =
            parse_or(&lookup, "LLM_REQUEST_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT_SECS)?;
        if llm_timeout_secs == 0 {
            bail!("LLM_REQUEST_TIMEOUT_SECS must be at least 1 second");
        }

        Ok(Config {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            rust_log: var("RUST_LOG", "info"),
            llm_provider: var("LLM_PROVIDER", openai::NAME).trim().to_lowercase(),
            llm_timeout_secs,
            openai: ProviderSettings {
                api_key: credential(&lookup, "OPENAI_API_KEY"),
                model: var("OPENAI_MODEL", openai::DEFAULT_MODEL),
                api_base: var("OPENAI_API_BASE", openai::DEFAULT_API_BASE),
            },
            anthropic: ProviderSettings {
                api_key: credential(&lookup, "ANTHROPIC_API_KEY"),
                model: var("ANTHROPIC_MODEL", anthropic::DEFAULT_MODEL),
                api_base: var("ANTHROPIC_API_BASE", anthropic::DEFAULT_API_BASE),
            },
            mistral: ProviderSettings {
                api_key: credential(&lookup, "MISTRAL_API_KEY"),
                model: var("MISTRAL_MODEL", mistral::DEFAULT_MODEL),
                api_base: var("MISTRAL_API_BASE", mistral::DEFAULT_API_BASE),
            },
            jobs_path: PathBuf::from(var("JOBS_PATH", "sample_jobs.json")),
            static_dir: lookup("STATIC_DIR")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

fn credential<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.port, 5001);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.llm_provider, "openai");
        assert_eq!(config.llm_timeout_secs, 30);
        assert_eq!(config.openai.api_key, None);
        assert_eq!(config.openai.model, "gpt-4");
        assert_eq!(config.anthropic.model, "claude-3-sonnet-20240229");
        assert_eq!(config.mistral.model, "mistral-large-latest");
        assert_eq!(config.mistral.api_base, "https://api.mistral.ai/v1");
        assert_eq!(config.jobs_path, PathBuf::from("sample_jobs.json"));
        assert_eq!(config.static_dir, None);
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("LLM_PROVIDER", "Anthropic"),
            ("LLM_REQUEST_TIMEOUT_SECS", "45"),
            ("ANTHROPIC_API_KEY", "sk-ant"),
            ("ANTHROPIC_MODEL", "claude-3-haiku-20240307"),
            ("OPENAI_API_BASE", "http://localhost:1234/v1"),
            ("JOBS_PATH", "/data/jobs.json"),
            ("STATIC_DIR", "/srv/skillsnap/static"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.llm_provider, "anthropic");
        assert_eq!(config.llm_timeout_secs, 45);
        assert_eq!(config.anthropic.api_key.as_deref(), Some("sk-ant"));
        assert_eq!(config.anthropic.model, "claude-3-haiku-20240307");
        assert_eq!(config.openai.api_base, "http://localhost:1234/v1");
        assert_eq!(config.jobs_path, PathBuf::from("/data/jobs.json"));
        assert_eq!(config.static_dir, Some(PathBuf::from("/srv/skillsnap/static")));
    }

    #[test]
    fn test_blank_credentials_are_absent() {
        let config = config_from(&[("OPENAI_API_KEY", "   "), ("MISTRAL_API_KEY", "")]).unwrap();
        assert_eq!(config.openai.api_key, None);
        assert_eq!(config.mistral.api_key, None);
    }

    #[test]
    fn test_invalid_number_names_the_key() {
        let err = config_from(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        let err = config_from(&[("LLM_REQUEST_TIMEOUT_SECS", "-1")]).unwrap_err();
        assert!(err.to_string().contains("LLM_REQUEST_TIMEOUT_SECS"));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = config_from(&[("LLM_REQUEST_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(err.to_string().contains("LLM_REQUEST_TIMEOUT_SECS"));

        let config = config_from(&[("LLM_REQUEST_TIMEOUT_SECS", "1")]).unwrap();
        assert_eq!(config.llm_timeout_secs, 1);
    }

    #[test]
    fn test_blank_static_dir_disables_static_serving() {
        let config = config_from(&[("STATIC_DIR", "  ")]).unwrap();
        assert_eq!(config.static_dir, None);
    }

    #[test]
    fn test_debug_redacts_api_keys() {
        let config = config_from(&[("OPENAI_API_KEY", "sk-secret-value")]).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-secret-value"));
        assert!(rendered.contains("<redacted>"));
    }
}
