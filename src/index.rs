//! Exact flat nearest-neighbour index over chunk records.

use crate::config::Number;
use crate::error::{Result, SeekError};
use crate::record::ChunkRecord;
use crate::vector_ops::squared_l2_distance_simd;
use rayon::prelude::*;

/// A query hit: position of the record in the index and its squared L2 distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub position: usize,
    pub distance: Number,
}

/// Flat index scanned exhaustively on every query.
///
/// Records are kept in insertion order and never change after [`VectorIndex::build`],
/// so a position returned by [`VectorIndex::query`] can be resolved with
/// [`VectorIndex::get`].
#[derive(Debug, Default)]
pub struct VectorIndex {
    records: Vec<ChunkRecord>,
    dimension: usize,
}

impl VectorIndex {
    /// Build an index over `records`. All vectors must share one dimension.
    pub fn build(records: Vec<ChunkRecord>) -> Result<Self> {
        let dimension = records.first().map_or(0, |r| r.vector.len());
        if let Some(bad) = records.iter().find(|r| r.vector.len() != dimension) {
            return Err(SeekError::DimensionMismatch {
                expected: dimension,
                actual: bad.vector.len(),
            });
        }
        Ok(Self { records, dimension })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Vector dimension, or 0 for an empty index.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn get(&self, position: usize) -> Option<&ChunkRecord> {
        self.records.get(position)
    }

    pub fn records(&self) -> &[ChunkRecord] {
        &self.records
    }

    /// Return the `k` records closest to `query`, nearest first.
    ///
    /// Equal distances keep insertion order. Fewer than `k` records returns all of them.
    pub fn query(&self, query: &[Number], k: usize) -> Result<Vec<Neighbor>> {
        if self.records.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        if query.len() != self.dimension {
            return Err(SeekError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut neighbors: Vec<Neighbor> = self
            .records
            .par_iter()
            .enumerate()
            .map(|(position, record)| Neighbor {
                position,
                // Lengths were checked above and at build time.
                distance: squared_l2_distance_simd(query, &record.vector),
            })
            .collect();

        // Stable sort keeps first-inserted records ahead on ties.
        neighbors.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        neighbors.truncate(k);
        Ok(neighbors)
    }
}
