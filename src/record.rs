use crate::config::Number;
use serde::{Deserialize, Serialize};

/// Where a chunk came from: source file name and starting character offset.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ChunkMetadata {
    pub filename: String,
    pub offset: usize,
}

/// A chunk of document text that has not been embedded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    pub text: String,
    pub metadata: ChunkMetadata,
}

/// One indexed entry. Text, metadata and vector live together so a position in
/// the index always resolves to the chunk its vector was computed from.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChunkRecord {
    pub text: String,
    pub metadata: ChunkMetadata,
    pub vector: Vec<Number>,
}

impl ChunkRecord {
    pub fn new(chunk: TextChunk, vector: Vec<Number>) -> Self {
        Self {
            text: chunk.text,
            metadata: chunk.metadata,
            vector,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SearchResult {
    pub text: String,
    pub filename: String,
    pub offset: usize,
    pub distance: Number,
}
