//! Semantic search over a folder of PDF documents.
//!
//! Indexing runs once: [`loader`] extracts text, [`chunker`] cuts it into fixed
//! character windows, [`embedding`] turns each window into a vector and
//! [`index`] stores them for exact L2 search. [`search::SearchEngine`] then answers
//! queries against the built index.

pub mod chunker;
pub mod config;
pub mod embedding;
pub mod error;
pub mod index;
pub mod indexer;
pub mod loader;
pub mod record;
pub mod repl;
pub mod search;
pub mod vector_ops;

pub use error::{Result, SeekError};
pub use index::{Neighbor, VectorIndex};
pub use record::{ChunkMetadata, ChunkRecord, SearchResult, TextChunk};
pub use search::SearchEngine;
