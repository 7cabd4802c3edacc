//! Uploaded material intake.
//!
//! Binary parsing happens elsewhere; this module only checks uploads before
//! they are handed off and describes the text that comes back.

use serde::{Deserialize, Serialize};

use crate::error::UploadError;
use crate::text::word_count;

/// Largest accepted upload, in megabytes.
pub const MAX_UPLOAD_MB: u64 = 10;

const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Text extracted from an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedText {
    pub text: String,
    pub word_count: usize,
    pub page_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl ExtractedText {
    pub fn from_text(text: impl Into<String>, page_count: u32) -> Self {
        let text = text.into();
        Self {
            word_count: word_count(&text),
            text,
            page_count,
            title: None,
            author: None,
        }
    }
}

/// Check an upload's media type and size.
pub fn validate_upload(media_type: &str, size_bytes: u64) -> Result<(), UploadError> {
    if !media_type.eq_ignore_ascii_case(PDF_MEDIA_TYPE) {
        return Err(UploadError::UnsupportedType(media_type.to_string()));
    }
    if size_bytes > MAX_UPLOAD_MB * 1024 * 1024 {
        return Err(UploadError::TooLarge {
            size_bytes,
            limit_mb: MAX_UPLOAD_MB,
        });
    }
    Ok(())
}

/// Human-readable file size: `"512 B"`, `"1.5 KB"`, `"2.0 MB"`.
pub fn file_size_display(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}
