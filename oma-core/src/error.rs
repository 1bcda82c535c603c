//! Error types for sensor geometry extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for geometry extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// File not found (-1)
    FileNotFound = -1,
    /// Empty file (-2)
    EmptyFile = -2,
    /// General parse error (-3)
    ParseError = -3,
    /// Channel numbers do not form 1..N (E100)
    ChannelSetMismatch = 100,
    /// Channel annotation text is not an integer (E101)
    InvalidChannelLabel = 101,
    /// Annotation insertion point matches no point (E102)
    UnmatchedAnnotation = 102,
    /// Two force components encode the same channel (E103)
    ChannelCollision = 103,
    /// Assembled dataset is inconsistent (E200)
    InvalidDataset = 200,
    /// Model snapshot could not be read (E300)
    InvalidSnapshot = 300,
}

/// Main error type for geometry extraction.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Empty file: {path}")]
    EmptyFile { path: PathBuf },

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Invalid numeric value at line {line}: {value}")]
    InvalidNumber { line: usize, value: String },

    #[error("Channel numbering is not 1..N - missing channels: {missing:?}, unexpected channels: {extra:?}")]
    ChannelSetMismatch { missing: Vec<i64>, extra: Vec<i64> },

    #[error("Text '{text}' on layer '{layer}' is not a channel number")]
    InvalidChannelLabel { text: String, layer: String },

    #[error("Insert point ({x}, {y}, {z}) for text '{label}' does not match any point")]
    UnmatchedAnnotation {
        label: String,
        x: f64,
        y: f64,
        z: f64,
    },

    #[error("Channel {number} is defined twice: at point {first} and at point {second}")]
    ChannelCollision {
        number: u32,
        first: String,
        second: String,
    },

    #[error("Invalid geometry: {}", .errors.join("; "))]
    InvalidDataset { errors: Vec<String> },

    #[error("Invalid model snapshot: {0}")]
    InvalidSnapshot(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GeometryError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            GeometryError::FileNotFound { .. } => ErrorCode::FileNotFound,
            GeometryError::EmptyFile { .. } => ErrorCode::EmptyFile,
            GeometryError::ParseError { .. } => ErrorCode::ParseError,
            GeometryError::InvalidNumber { .. } => ErrorCode::ParseError,
            GeometryError::ChannelSetMismatch { .. } => ErrorCode::ChannelSetMismatch,
            GeometryError::InvalidChannelLabel { .. } => ErrorCode::InvalidChannelLabel,
            GeometryError::UnmatchedAnnotation { .. } => ErrorCode::UnmatchedAnnotation,
            GeometryError::ChannelCollision { .. } => ErrorCode::ChannelCollision,
            GeometryError::InvalidDataset { .. } => ErrorCode::InvalidDataset,
            GeometryError::InvalidSnapshot(_) => ErrorCode::InvalidSnapshot,
            GeometryError::Io(_) => ErrorCode::FileNotFound,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }
}

/// Result type alias for geometry operations.
pub type Result<T> = std::result::Result<T, GeometryError>;
