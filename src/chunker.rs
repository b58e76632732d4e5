//! Fixed-size character chunking.
//!
//! Chunk boundaries are purely positional: chunk `k` covers characters
//! `[k * chunk_size, (k + 1) * chunk_size)` of the document text. Words and
//! sentences may be split across chunks. Sizes and offsets count Unicode scalar
//! values, never bytes.

use crate::loader::Document;
use crate::record::{ChunkMetadata, TextChunk};

/// Split `text` into consecutive non-overlapping windows of `chunk_size` characters.
///
/// Returns `(offset, slice)` pairs where `offset` is the character position of the
/// first character of the slice. Empty text yields no windows. A `chunk_size` of
/// zero also yields no windows; configuration rejects it earlier.
pub fn split_fixed(text: &str, chunk_size: usize) -> Vec<(usize, &str)> {
    if chunk_size == 0 || text.is_empty() {
        return Vec::new();
    }

    let mut windows = Vec::new();
    let mut char_offset = 0;
    let mut byte_start = 0;
    let mut chars_in_window = 0;

    for (byte_idx, _) in text.char_indices() {
        if chars_in_window == chunk_size {
            windows.push((char_offset, &text[byte_start..byte_idx]));
            char_offset += chunk_size;
            byte_start = byte_idx;
            chars_in_window = 0;
        }
        chars_in_window += 1;
    }
    windows.push((char_offset, &text[byte_start..]));

    windows
}

/// Chunk one document, tagging every chunk with the document's file name and the
/// chunk's starting character offset.
pub fn chunk_document(document: &Document, chunk_size: usize) -> Vec<TextChunk> {
    split_fixed(&document.text, chunk_size)
        .into_iter()
        .map(|(offset, text)| TextChunk {
            text: text.to_string(),
            metadata: ChunkMetadata {
                filename: document.filename.clone(),
                offset,
            },
        })
        .collect()
}

/// Chunk every document in order. Chunks of earlier documents come first.
pub fn chunk_documents(documents: &[Document], chunk_size: usize) -> Vec<TextChunk> {
    documents
        .iter()
        .flat_map(|doc| chunk_document(doc, chunk_size))
        .collect()
}
