// Prompt templates for the four analysis tasks.
// Each template embeds the caller's text verbatim, numbered instructions, and a
// literal example of the JSON shape the model must return.

use crate::corpus::JobRecord;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION};

/// Job matching template. Placeholders: {resume_text}, {jobs_text}, {json_only}
pub const JOB_MATCHING_TEMPLATE: &str = r#"You are an expert resume and job matching analyst. Your task is to analyze a resume and match it against available job positions based on skills, experience, and overall fit.

RESUME TEXT:
{resume_text}

AVAILABLE JOBS:
{jobs_text}

INSTRUCTIONS:
1. Analyze the resume for skills, experience, education, and career objectives
2. For each job, evaluate the match based on:
   - Skills alignment (technical and soft skills)
   - Experience relevance
   - Industry fit
   - Career progression alignment
3. Score each job as an integer from 0 to 100 based on overall fit
4. Provide specific reasons for the match score
5. Return results in the following JSON format:

{
    "matches": [
        {
            "job_title": "Job Title",
            "score": 85,
            "reasons": [
                "Strong technical skills match: Python, React, AWS",
                "Relevant experience in software development"
            ],
            "strengths": ["Candidate strengths for this role"],
            "concerns": ["Potential concerns or gaps"]
        }
    ],
    "analysis_summary": "Brief overall analysis of the candidate's profile"
}

{json_only}"#;

/// Skill gap template. Placeholders: {resume_text}, {job_description}, {json_only}
pub const SKILL_GAP_TEMPLATE: &str = r#"You are an expert career advisor and skills analyst. Your task is to analyze the gap between a candidate's resume and a specific job description to identify missing skills and provide actionable improvement suggestions.

RESUME TEXT:
{resume_text}

JOB DESCRIPTION:
{job_description}

INSTRUCTIONS:
1. Identify skills and experiences mentioned in the job description
2. Compare against what is present in the resume
3. Identify missing or underdeveloped skills
4. Rate each missing skill's importance as exactly one of "high", "medium" or "low"
5. Provide specific, actionable suggestions for improvement
6. Return results in the following JSON format:

{
    "missing_skills": [
        {
            "skill": "Skill Name",
            "importance": "high",
            "description": "Why this skill is important for the role",
            "improvement_suggestions": [
                "Specific action item 1",
                "Specific action item 2"
            ]
        }
    ],
    "experience_gaps": [
        {
            "area": "Area of experience",
            "description": "What experience is missing",
            "suggestions": ["How to gain this experience"]
        }
    ],
    "overall_assessment": "Summary of the candidate's readiness for this role",
    "priority_improvements": ["Top 3 most important improvements to focus on"]
}

{json_only}"#;

/// Resume improvement template. Placeholders: {resume_text}, {job_description}, {json_only}
pub const RESUME_IMPROVEMENT_TEMPLATE: &str = r#"You are an expert resume writer and career coach. Your task is to analyze a resume against a specific job description and provide suggestions for improvement, including rewrites of key sections.

RESUME TEXT:
{resume_text}

TARGET JOB DESCRIPTION:
{job_description}

INSTRUCTIONS:
1. Analyze how well the resume aligns with the job requirements
2. Identify sections that could be improved or rewritten
3. Provide specific suggestions for each section; "section" is one of "summary", "experience", "skills", "education"
4. Provide rewritten versions of key sections where they would help
5. Give an overall priority_score as an integer from 0 to 100
6. Return results in the following JSON format:

{
    "overall_assessment": "Brief assessment of resume quality and alignment",
    "section_analysis": [
        {
            "section": "experience",
            "current_content": "What is currently in this section",
            "issues": ["Issues or areas for improvement"],
            "suggestions": ["Specific improvement suggestions"],
            "rewritten_content": "Improved version of this section"
        }
    ],
    "keyword_optimization": [
        {
            "keyword": "Important keyword from job description",
            "current_usage": "How it is currently used in the resume",
            "suggested_usage": "How to better incorporate this keyword"
        }
    ],
    "action_items": [
        "Specific action items to improve the resume"
    ],
    "priority_score": 85
}

{json_only}"#;

/// Skills extraction template. Placeholders: {resume_text}, {json_only}
pub const SKILLS_EXTRACTION_TEMPLATE: &str = r#"You are an expert skills analyst. Your task is to extract and categorize all skills mentioned in a resume.

RESUME TEXT:
{resume_text}

INSTRUCTIONS:
1. Identify all technical skills, soft skills, tools, technologies, programming languages and certifications
2. Categorize them appropriately
3. Give each skill a confidence of exactly one of "high", "medium" or "low"
4. Return results in the following JSON format:

{
    "technical_skills": [
        {
            "skill": "Skill Name",
            "confidence": "high",
            "context": "How the skill was mentioned or demonstrated"
        }
    ],
    "soft_skills": [
        {
            "skill": "Skill Name",
            "confidence": "medium",
            "context": "How the skill was mentioned or demonstrated"
        }
    ],
    "tools_technologies": [
        {
            "tool": "Tool/Technology Name",
            "confidence": "high",
            "context": "How the tool was mentioned or used"
        }
    ],
    "languages": [
        {
            "language": "Programming Language",
            "confidence": "low",
            "context": "How the language was mentioned or used"
        }
    ],
    "certifications": [
        {
            "certification": "Certification Name",
            "issuer": "Issuing Organization",
            "year": "Year obtained (if mentioned)"
        }
    ]
}

{json_only}"#;

/// Formats jobs as `Job Title: ..` / `Description: ..` pairs separated by blank lines.
pub fn format_jobs(jobs: &[JobRecord]) -> String {
    jobs.iter()
        .map(|job| format!("Job Title: {}\nDescription: {}", job.title, job.description))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn job_matching_prompt(resume_text: &str, jobs: &[JobRecord]) -> String {
    let jobs_text = format_jobs(jobs);
    fill_template(
        JOB_MATCHING_TEMPLATE,
        &[
            ("resume_text", resume_text),
            ("jobs_text", &jobs_text),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    )
}

pub fn skill_gap_prompt(resume_text: &str, job_description: &str) -> String {
    fill_template(
        SKILL_GAP_TEMPLATE,
        &[
            ("resume_text", resume_text),
            ("job_description", job_description),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    )
}

pub fn resume_improvement_prompt(resume_text: &str, job_description: &str) -> String {
    fill_template(
        RESUME_IMPROVEMENT_TEMPLATE,
        &[
            ("resume_text", resume_text),
            ("job_description", job_description),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    )
}

pub fn skills_extraction_prompt(resume_text: &str) -> String {
    fill_template(
        SKILLS_EXTRACTION_TEMPLATE,
        &[
            ("resume_text", resume_text),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    )
}
