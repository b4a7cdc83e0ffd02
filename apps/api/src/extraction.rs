//! Upload screening and resume text extraction.

use std::sync::OnceLock;

use bytes::Bytes;
use regex::Regex;
use thiserror::Error;

/// A file received from the upload form.
#[derive(Debug, Clone)]
pub struct UploadedResume {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedResume {
    pub fn new(file_name: impl Into<String>, content_type: Option<&str>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.map(str::to_string),
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum InputRejected {
    #[error("empty file")]
    Empty,

    #[error("file is {size} bytes, limit is {limit}")]
    Oversized { size: usize, limit: usize },

    #[error("unsupported content type '{0}'")]
    UnsupportedType(String),
}

#[derive(Debug, Error)]
#[error("text extraction failed: {0}")]
pub struct ExtractionError(pub String);

/// Rejects uploads that are empty, larger than `max_bytes`, or not declared as PDF.
pub fn screen_upload(upload: &UploadedResume, max_bytes: usize) -> Result<(), InputRejected> {
    if upload.bytes.is_empty() {
        return Err(InputRejected::Empty);
    }
    if upload.bytes.len() > max_bytes {
        return Err(InputRejected::Oversized {
            size: upload.bytes.len(),
            limit: max_bytes,
        });
    }
    let content_type = upload
        .content_type
        .as_deref()
        .unwrap_or("")
        .to_ascii_lowercase();
    if !content_type.contains("pdf") {
        return Err(InputRejected::UnsupportedType(content_type));
    }
    Ok(())
}

/// Turns uploaded file bytes into raw text. Runs on the blocking pool.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError(e.to_string()))
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email regex is valid")
    })
}

/// First e-mail address found in the raw resume text, lower-cased.
pub fn extract_email(text: &str) -> Option<String> {
    email_pattern()
        .find(text)
        .map(|m| m.as_str().to_ascii_lowercase())
}
