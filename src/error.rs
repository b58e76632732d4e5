//! Error types for indexing and search.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeekError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to extract text from '{path}': {reason}")]
    Extraction { path: PathBuf, reason: String },

    #[error("Failed to initialize embedding model '{model}': {reason}")]
    ModelInit { model: String, reason: String },

    #[error("Failed to generate embeddings: {0}")]
    Embedding(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SeekError>;
