use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("uploaded file is not a PDF")]
    NotPdf,

    #[error("PDF could not be read: {0}")]
    Unreadable(String),

    #[error("no text could be extracted from the PDF")]
    NoText,
}

/// Extracts the plain text of every page. Extraction is CPU bound and runs
/// on the blocking pool.
pub async fn extract_text(pdf: Bytes) -> Result<String, AppError> {
    if !pdf.starts_with(PDF_MAGIC) {
        return Err(ResumeError::NotPdf.into());
    }

    let size = pdf.len();
    let text = match tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
    {
        Ok(result) => result.map_err(|e| ResumeError::Unreadable(e.to_string()))?,
        // The parser panics on some malformed documents.
        Err(e) if e.is_panic() => {
            return Err(ResumeError::Unreadable("malformed document".to_string()).into())
        }
        Err(e) => return Err(anyhow::anyhow!("PDF extraction task failed: {e}").into()),
    };

    if text.trim().is_empty() {
        warn!(bytes = size, "PDF contains no extractable text");
        return Err(ResumeError::NoText.into());
    }

    debug!(bytes = size, chars = text.len(), "extracted resume text");
    Ok(text)
}
