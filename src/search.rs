use crate::config::Number;
use crate::embedding::EmbeddingGenerator;
use crate::error::{Result, SeekError};
use crate::index::VectorIndex;
use crate::record::SearchResult;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Default)]
pub struct SearchTimings {
    pub embed_duration: Duration,
    pub search_duration: Duration,
    pub total_duration: Duration,
}

/// Answers free-text queries against a built index.
pub struct SearchEngine {
    embedder: Box<dyn EmbeddingGenerator>,
    index: VectorIndex,
}

impl SearchEngine {
    pub fn new(embedder: Box<dyn EmbeddingGenerator>, index: VectorIndex) -> Self {
        Self { embedder, index }
    }

    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    /// Embed `query`, find the `top_k` nearest chunks and join them back to their text.
    ///
    /// An empty index yields no results without touching the model.
    pub fn search(&self, query: &str, top_k: usize) -> Result<(Vec<SearchResult>, SearchTimings)> {
        let start = Instant::now();
        let mut timings = SearchTimings::default();

        if self.index.is_empty() || top_k == 0 {
            debug!("Nothing to search (records: {}, top_k: {})", self.index.len(), top_k);
            timings.total_duration = start.elapsed();
            return Ok((Vec::new(), timings));
        }

        let embed_start = Instant::now();
        let query_vector = self.embed_query(query)?;
        timings.embed_duration = embed_start.elapsed();

        let search_start = Instant::now();
        let neighbors = self.index.query(&query_vector, top_k)?;
        timings.search_duration = search_start.elapsed();

        let results = neighbors
            .into_iter()
            .filter_map(|neighbor| {
                self.index.get(neighbor.position).map(|record| SearchResult {
                    text: record.text.clone(),
                    filename: record.metadata.filename.clone(),
                    offset: record.metadata.offset,
                    distance: neighbor.distance,
                })
            })
            .collect::<Vec<_>>();

        timings.total_duration = start.elapsed();
        debug!(
            "Search returned {} results (embed {:?}, scan {:?}, total {:?})",
            results.len(),
            timings.embed_duration,
            timings.search_duration,
            timings.total_duration
        );

        Ok((results, timings))
    }

    fn embed_query(&self, query: &str) -> Result<Vec<Number>> {
        self.embedder
            .generate_embeddings(&[query])?
            .into_iter()
            .next()
            .ok_or_else(|| SeekError::Embedding("no embedding returned for query".to_string()))
    }
}
