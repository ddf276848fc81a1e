//! Keyword-overlap job recommendation and skill-gap detection. No LLM call.
//!
//! Terms match case-insensitively and only on boundaries: a term must not be
//! flanked by alphanumeric characters, so `go` does not hit "good" and `r`
//! does not hit every word containing the letter.

use serde::Serialize;

use crate::corpus::JobRecord;

pub const DEFAULT_TOP_K: usize = 3;

/// Vocabulary scored by `recommend_jobs`.
pub const TECH_KEYWORDS: &[&str] = &[
    "python", "javascript", "react", "node", "sql", "git", "aws", "azure",
    "machine learning", "data", "analysis", "statistics", "pandas", "numpy",
    "tensorflow", "pytorch", "tableau", "power bi", "spark", "hadoop",
    "docker", "kubernetes", "api", "rest", "frontend", "backend", "database",
    "mongodb", "postgresql", "mysql", "java", "spring", "microservices",
    "agile", "scrum", "ci/cd", "testing", "unit testing", "integration",
];

/// Vocabulary checked by `keyword_skill_gap`.
pub const SKILLS_VOCABULARY: &[&str] = &[
    "python", "javascript", "java", "c++", "c#", "go", "rust", "swift", "kotlin",
    "react", "angular", "vue", "node.js", "express", "django", "flask", "spring",
    "sql", "mysql", "postgresql", "mongodb", "redis", "elasticsearch",
    "aws", "azure", "google cloud", "docker", "kubernetes", "terraform",
    "git", "jenkins", "ci/cd", "devops", "linux", "bash", "shell scripting",
    "machine learning", "deep learning", "data science", "artificial intelligence",
    "pandas", "numpy", "scikit-learn", "tensorflow", "pytorch", "keras",
    "tableau", "power bi", "excel", "r", "matlab", "spss",
    "html", "css", "bootstrap", "sass", "tailwind",
    "rest api", "graphql", "microservices", "soap", "json", "xml",
    "agile", "scrum", "kanban", "project management",
    "testing", "unit testing", "integration testing", "selenium", "junit",
    "spark", "hadoop", "kafka", "airflow", "etl", "data pipeline",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRecommendation {
    pub title: String,
    /// Share of the job's keywords also present in the resume, 0–100.
    pub score: f64,
    pub matched_keywords: Vec<String>,
}

/// True when `term` occurs in `haystack` (both lowercase) on word boundaries.
fn contains_term(haystack: &str, term: &str) -> bool {
    haystack.match_indices(term).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + term.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Scores every job by keyword overlap and returns the best `top_k`, highest first.
/// Ties keep corpus order.
pub fn recommend_jobs(resume_text: &str, jobs: &[JobRecord], top_k: usize) -> Vec<JobRecommendation> {
    let resume = resume_text.to_lowercase();

    let mut scored: Vec<JobRecommendation> = jobs
        .iter()
        .map(|job| {
            let description = job.description.to_lowercase();
            let in_job: Vec<&str> = TECH_KEYWORDS
                .iter()
                .copied()
                .filter(|kw| contains_term(&description, kw))
                .collect();
            let matched_keywords: Vec<String> = in_job
                .iter()
                .filter(|kw| contains_term(&resume, kw))
                .map(|kw| kw.to_string())
                .collect();

            let score = if in_job.is_empty() {
                0.0
            } else {
                matched_keywords.len() as f64 / in_job.len() as f64 * 100.0
            };

            JobRecommendation {
                title: job.title.clone(),
                score,
                matched_keywords,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(top_k);
    scored
}

/// Skills the job description mentions but the resume does not, in vocabulary order.
pub fn keyword_skill_gap(resume_text: &str, job_description: &str) -> Vec<String> {
    let resume = resume_text.to_lowercase();
    let description = job_description.to_lowercase();

    SKILLS_VOCABULARY
        .iter()
        .filter(|skill| contains_term(&description, skill) && !contains_term(&resume, skill))
        .map(|skill| skill.to_string())
        .collect()
}
