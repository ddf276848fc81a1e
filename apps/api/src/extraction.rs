//! PDF text extraction for uploaded resumes.

use bytes::Bytes;
use tracing::{debug, warn};

use crate::errors::AppError;

const ALLOWED_EXTENSIONS: &[&str] = &["pdf"];

/// True when the filename carries an allowed extension (case-insensitive).
pub fn is_allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Drops directory components and any character outside `[A-Za-z0-9._-]`.
/// Whitespace becomes `_`; leading dots are removed.
pub fn secure_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let cleaned: String = base
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();
    cleaned.trim_start_matches('.').to_string()
}

/// Extracts text from a PDF on a blocking worker. Pages are joined with newlines, result trimmed.
pub async fn extract_text_from_pdf(data: Bytes) -> Result<String, AppError> {
    let size = data.len();
    let joined = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data)).await;

    // pdf-extract panics on some malformed documents; treat that like a parse error.
    let text = match joined {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("PDF extraction failed: {e}");
            return Err(AppError::UnprocessableEntity(format!(
                "Failed to extract text from PDF: {e}"
            )));
        }
        Err(e) if e.is_panic() => {
            warn!("PDF extraction panicked on a {size}-byte upload");
            return Err(AppError::UnprocessableEntity(
                "Failed to extract text from PDF: unreadable document".to_string(),
            ));
        }
        Err(e) => {
            return Err(AppError::Internal(anyhow::anyhow!(
                "PDF extraction task failed: {e}"
            )))
        }
    };

    let text = text.trim().to_string();
    debug!("Extracted {} chars from {size}-byte PDF", text.len());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_allowed_file() {
        assert!(is_allowed_file("resume.pdf"));
        assert!(is_allowed_file("Resume.Final.PDF"));
        assert!(!is_allowed_file("resume.docx"));
        assert!(!is_allowed_file("pdf"));
        assert!(!is_allowed_file(""));
    }

    #[test]
    fn test_secure_filename() {
        assert_eq!(secure_filename("My Resume (2024).pdf"), "My_Resume_2024.pdf");
        assert_eq!(secure_filename("../../etc/passwd"), "passwd");
        assert_eq!(secure_filename("C:\\Users\\me\\cv.pdf"), "cv.pdf");
        assert_eq!(secure_filename(".hidden.pdf"), "hidden.pdf");
    }

    #[tokio::test]
    async fn test_garbage_bytes_are_unprocessable() {
        let err = extract_text_from_pdf(Bytes::from_static(b"definitely not a pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }
}
