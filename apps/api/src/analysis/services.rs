//! Task services: one entry point per analysis task.

use crate::analysis::prompts::{
    job_matching_prompt, resume_improvement_prompt, skill_gap_prompt, skills_extraction_prompt,
};
use crate::analysis::{run_task, AnalysisError, AnalysisTask, TaskResult};
use crate::corpus::JobRecord;
use crate::llm_client::LlmHandler;

/// Semantic match of a resume against job postings. Result carries `matches`.
pub async fn match_jobs(
    llm: &LlmHandler,
    resume_text: &str,
    jobs: &[JobRecord],
) -> Result<TaskResult, AnalysisError> {
    let prompt = job_matching_prompt(resume_text, jobs);
    run_task(llm, AnalysisTask::JobMatching, &prompt).await
}

/// Missing skills and experience gaps for one job. Result carries `missing_skills`.
pub async fn analyze_skill_gap(
    llm: &LlmHandler,
    resume_text: &str,
    job_description: &str,
) -> Result<TaskResult, AnalysisError> {
    let prompt = skill_gap_prompt(resume_text, job_description);
    run_task(llm, AnalysisTask::SkillGap, &prompt).await
}

/// Section-by-section rewrite suggestions. Result carries `section_analysis`.
pub async fn improve_resume(
    llm: &LlmHandler,
    resume_text: &str,
    job_description: &str,
) -> Result<TaskResult, AnalysisError> {
    let prompt = resume_improvement_prompt(resume_text, job_description);
    run_task(llm, AnalysisTask::ResumeImprovement, &prompt).await
}

/// Categorised skills found in the resume. Result carries `technical_skills`.
pub async fn extract_skills(
    llm: &LlmHandler,
    resume_text: &str,
) -> Result<TaskResult, AnalysisError> {
    let prompt = skills_extraction_prompt(resume_text);
    run_task(llm, AnalysisTask::SkillsExtraction, &prompt).await
}
