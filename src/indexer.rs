//! The indexing phase: load, chunk, embed, build.

use crate::chunker::chunk_documents;
use crate::embedding::{check_embeddings, EmbeddingGenerator};
use crate::error::Result;
use crate::index::VectorIndex;
use crate::loader::{load_documents, TextExtractor};
use crate::record::{ChunkRecord, TextChunk};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

/// fastembed's own default batch size.
pub const DEFAULT_BATCH_SIZE: usize = 256;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct IndexStats {
    pub documents: usize,
    pub chunks: usize,
    pub dimension: usize,
    pub elapsed: Duration,
}

pub struct IndexOptions {
    pub chunk_size: usize,
    pub batch_size: usize,
    pub show_progress: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            chunk_size: crate::config::DEFAULT_CHUNK_SIZE,
            batch_size: DEFAULT_BATCH_SIZE,
            show_progress: false,
        }
    }
}

/// Load and chunk every PDF in `folder` without embedding anything.
pub fn collect_chunks(folder: &Path, chunk_size: usize, extractor: &dyn TextExtractor) -> Result<(usize, Vec<TextChunk>)> {
    let documents = load_documents(folder, extractor)?;
    let chunks = chunk_documents(&documents, chunk_size);
    Ok((documents.len(), chunks))
}

/// Embed `chunks` batch by batch, keeping their order.
pub fn embed_chunks(
    chunks: Vec<TextChunk>,
    embedder: &dyn EmbeddingGenerator,
    options: &IndexOptions,
) -> Result<Vec<ChunkRecord>> {
    let batch_size = options.batch_size.max(1);
    let progress = if options.show_progress {
        let bar = ProgressBar::new(chunks.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} Embedding [{bar:40}] {pos}/{len} chunks ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut records = Vec::with_capacity(chunks.len());
    let mut pending = chunks.into_iter().peekable();
    while pending.peek().is_some() {
        let batch: Vec<TextChunk> = pending.by_ref().take(batch_size).collect();
        let texts: Vec<&str> = batch.iter().map(|c| c.text.as_str()).collect();

        let vectors = embedder.generate_embeddings(&texts)?;
        check_embeddings(&vectors, texts.len(), embedder.dimension())?;

        progress.inc(batch.len() as u64);
        records.extend(batch.into_iter().zip(vectors).map(|(chunk, vector)| ChunkRecord::new(chunk, vector)));
    }
    progress.finish_and_clear();

    Ok(records)
}

/// Run the whole indexing phase over `folder`.
pub fn build_index(
    folder: &Path,
    extractor: &dyn TextExtractor,
    embedder: &dyn EmbeddingGenerator,
    options: &IndexOptions,
) -> Result<(VectorIndex, IndexStats)> {
    let start = Instant::now();

    let (documents, chunks) = collect_chunks(folder, options.chunk_size, extractor)?;
    info!("Split {} documents into {} chunks", documents, chunks.len());

    let records = embed_chunks(chunks, embedder, options)?;
    let index = VectorIndex::build(records)?;

    let stats = IndexStats {
        documents,
        chunks: index.len(),
        dimension: index.dimension(),
        elapsed: start.elapsed(),
    };
    info!(
        "Indexed {} chunks from {} documents ({} dimensions) in {:?}",
        stats.chunks, stats.documents, stats.dimension, stats.elapsed
    );

    Ok((index, stats))
}
