// src/core/errors.rs

//! Defines the error type shared by the path parser, the navigator and the container.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = SpinelJsonError> = std::result::Result<T, E>;

/// All failures a caller can observe from parsing a path, resolving it against a
/// document, or moving a document in and out of its text/driver representation.
///
/// `path` fields hold the canonical text of the path up to and including the
/// segment that failed, so the message can be surfaced to a client as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpinelJsonError {
    #[error("malformed path '{path}': {reason}")]
    MalformedPath { path: String, reason: String },

    #[error("path must not be empty")]
    EmptyPath,

    #[error("path '{path}' exceeds the maximum of {max} segments")]
    PathTooDeep { path: String, max: usize },

    #[error("key '{key}' not found at '{path}'")]
    KeyNotFound { path: String, key: String },

    #[error("index {index} out of range at '{path}' (length {len})")]
    IndexOutOfRange {
        path: String,
        index: usize,
        len: usize,
    },

    /// A key was applied to a non-object, or an index/append to a non-array.
    #[error("cannot apply segment '{segment}' to a value of type {found} at '{path}'")]
    TypeMismatch {
        path: String,
        segment: String,
        found: &'static str,
    },

    #[error("append marker '[]' is not allowed in a read path: '{path}'")]
    InvalidSegmentForRead { path: String },

    #[error("operation against a null document")]
    NullDocument,

    #[error("JSON decode error: {0}")]
    DecodeFailure(String),

    #[error("JSON encode error: {0}")]
    EncodeFailure(String),
}

impl SpinelJsonError {
    /// Short, stable name of the error kind, suitable for metrics labels and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SpinelJsonError::MalformedPath { .. } => "malformed_path",
            SpinelJsonError::EmptyPath => "empty_path",
            SpinelJsonError::PathTooDeep { .. } => "path_too_deep",
            SpinelJsonError::KeyNotFound { .. } => "key_not_found",
            SpinelJsonError::IndexOutOfRange { .. } => "index_out_of_range",
            SpinelJsonError::TypeMismatch { .. } => "type_mismatch",
            SpinelJsonError::InvalidSegmentForRead { .. } => "invalid_segment_for_read",
            SpinelJsonError::NullDocument => "null_document",
            SpinelJsonError::DecodeFailure(_) => "decode_failure",
            SpinelJsonError::EncodeFailure(_) => "encode_failure",
        }
    }

    /// Returns true for errors produced while parsing the path text, before any
    /// document was looked at.
    pub fn is_path_error(&self) -> bool {
        matches!(
            self,
            SpinelJsonError::MalformedPath { .. }
                | SpinelJsonError::EmptyPath
                | SpinelJsonError::PathTooDeep { .. }
        )
    }
}

// --- From trait implementations for easy error conversion ---

impl From<serde_json::Error> for SpinelJsonError {
    fn from(e: serde_json::Error) -> Self {
        // Keep messages single-line so they can be embedded in protocol replies.
        SpinelJsonError::DecodeFailure(e.to_string().replace('\n', " "))
    }
}
