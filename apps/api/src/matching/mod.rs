// Upload and keyword matching: the non-LLM half of the API.
// PDF text comes from extraction; jobs come from the corpus loaded at startup.

pub mod handlers;
pub mod keywords;
