//! Core error types.
//!
//! Segmentation and detection never fail; these errors cover the places where
//! a caller hands the engine something it cannot interpret.

use thiserror::Error;

/// Errors raised by the studyflow core.
#[derive(Debug, Error)]
pub enum StudyflowError {
    /// The grade value does not name one of K, G1..G12.
    #[error("invalid grade: {0}")]
    InvalidGrade(String),

    /// The task kind is neither `reading` nor `homework`.
    #[error("unknown task kind: {0}")]
    UnknownTaskKind(String),

    /// The uploaded material was rejected.
    #[error(transparent)]
    Upload(#[from] UploadError),
}

/// Reasons an uploaded material is rejected before text extraction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    /// Only PDF uploads are accepted.
    #[error("file must be a PDF (got {0})")]
    UnsupportedType(String),

    /// The upload exceeds the size limit.
    #[error("file size must be less than {limit_mb}MB (got {size_bytes} bytes)")]
    TooLarge { size_bytes: u64, limit_mb: u64 },
}
