//! Sentence embeddings for chunks and queries.
//!
//! [`EmbeddingGenerator`] is the seam between the pipeline and the model. The
//! production implementation wraps fastembed; tests plug in deterministic fakes.

use crate::config::Number;
use crate::error::{Result, SeekError};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;

pub const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";

/// Model names accepted in configuration, with their fastembed identifiers.
const SUPPORTED_MODELS: &[(&str, EmbeddingModel)] = &[
    ("all-MiniLM-L6-v2", EmbeddingModel::AllMiniLML6V2),
    ("all-MiniLM-L12-v2", EmbeddingModel::AllMiniLML12V2),
    ("bge-small-en-v1.5", EmbeddingModel::BGESmallENV15),
    ("bge-base-en-v1.5", EmbeddingModel::BGEBaseENV15),
    (
        "paraphrase-multilingual-MiniLM-L12-v2",
        EmbeddingModel::ParaphraseMLMiniLML12V2,
    ),
];

/// Trait for generating embeddings from text.
pub trait EmbeddingGenerator: Send + Sync {
    /// Embed `texts`, returning one vector per input in the same order.
    fn generate_embeddings(&self, texts: &[&str]) -> Result<Vec<Vec<Number>>>;

    /// Dimension of every vector this generator produces.
    fn dimension(&self) -> usize;
}

pub fn supported_model_names() -> Vec<&'static str> {
    SUPPORTED_MODELS.iter().map(|(name, _)| *name).collect()
}

pub fn resolve_model(name: &str) -> Result<EmbeddingModel> {
    SUPPORTED_MODELS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, model)| model.clone())
        .ok_or_else(|| {
            SeekError::Config(format!(
                "unknown embedding model '{name}', supported: {}",
                supported_model_names().join(", ")
            ))
        })
}

/// fastembed-backed generator.
pub struct FastEmbedGenerator {
    model: Mutex<TextEmbedding>,
    dimension: usize,
}

impl FastEmbedGenerator {
    /// Load `model_name`, downloading it into `cache_dir` on first use.
    pub fn new(model_name: &str, cache_dir: Option<PathBuf>) -> Result<Self> {
        let model_id = resolve_model(model_name)?;
        let init_err = |reason: String| SeekError::ModelInit {
            model: model_name.to_string(),
            reason,
        };

        let mut options = InitOptions::new(model_id).with_show_download_progress(true);
        if let Some(dir) = cache_dir {
            options = options.with_cache_dir(dir);
        }

        info!("Loading embedding model {model_name}");
        let mut text_model = TextEmbedding::try_new(options).map_err(|e| init_err(e.to_string()))?;

        // Embed a sample once to learn the output dimension.
        let sample = text_model
            .embed(vec!["dimension check"], None)
            .map_err(|e| init_err(e.to_string()))?;
        let dimension = sample
            .first()
            .map(Vec::len)
            .ok_or_else(|| init_err("model returned no embedding for sample text".to_string()))?;

        info!("Embedding model ready ({dimension} dimensions)");
        Ok(Self {
            model: Mutex::new(text_model),
            dimension,
        })
    }
}

impl std::fmt::Debug for FastEmbedGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastEmbedGenerator")
            .field("dimension", &self.dimension)
            .field("model", &"<TextEmbedding>")
            .finish()
    }
}

impl EmbeddingGenerator for FastEmbedGenerator {
    fn generate_embeddings(&self, texts: &[&str]) -> Result<Vec<Vec<Number>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let text_strings: Vec<String> = texts.iter().map(|&s| s.to_string()).collect();

        let embeddings = self
            .model
            .lock()
            .map_err(|_| SeekError::Embedding("embedding model lock poisoned".to_string()))?
            .embed(text_strings, None)
            .map_err(|e| SeekError::Embedding(e.to_string()))?;

        check_embeddings(&embeddings, texts.len(), self.dimension)?;
        Ok(embeddings)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Verify a generator kept the one-vector-per-input contract.
pub fn check_embeddings(embeddings: &[Vec<Number>], expected_count: usize, dimension: usize) -> Result<()> {
    if embeddings.len() != expected_count {
        return Err(SeekError::Embedding(format!(
            "expected {expected_count} embeddings, got {}",
            embeddings.len()
        )));
    }
    if let Some(bad) = embeddings.iter().find(|e| e.len() != dimension) {
        return Err(SeekError::DimensionMismatch {
            expected: dimension,
            actual: bad.len(),
        });
    }
    Ok(())
}

/// Deterministic bag-of-characters generator for unit tests.
#[cfg(test)]
pub(crate) struct MockEmbeddingGenerator {
    dimension: usize,
}

#[cfg(test)]
impl MockEmbeddingGenerator {
    pub(crate) fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

#[cfg(test)]
impl EmbeddingGenerator for MockEmbeddingGenerator {
    fn generate_embeddings(&self, texts: &[&str]) -> Result<Vec<Vec<Number>>> {
        Ok(texts
            .iter()
            .map(|text| {
                let mut embedding = vec![0.0; self.dimension];
                for b in text.bytes() {
                    embedding[b as usize % self.dimension] += 1.0;
                }
                let magnitude: Number = embedding.iter().map(|x| x * x).sum::<Number>().sqrt();
                if magnitude > 0.0 {
                    for x in &mut embedding {
                        *x /= magnitude;
                    }
                }
                embedding
            })
            .collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
