//! Job corpus store: read-only list of job postings loaded once at startup.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct JobCorpus {
    jobs: Vec<JobRecord>,
}

impl JobCorpus {
    pub fn new(jobs: Vec<JobRecord>) -> Self {
        Self { jobs }
    }

    /// Loads a JSON array of `{title, description}` records.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Missing required job corpus file '{}'", path.display()))?;
        let jobs: Vec<JobRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("Job corpus '{}' is not a valid job list", path.display()))?;
        info!("Loaded {} jobs from {}", jobs.len(), path.display());
        Ok(Self { jobs })
    }

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }
}
