//! Interactive prompt loop and result formatting.

use crate::record::{SearchResult, TextChunk};
use crate::search::SearchEngine;
use anyhow::Result;
use std::io::{BufRead, Write};

pub const PROMPT: &str = "Ask a question: ";

/// First `max_chars` characters of `text`.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

pub fn write_results<W: Write>(out: &mut W, results: &[SearchResult], preview_chars: usize) -> Result<()> {
    for result in results {
        writeln!(out)?;
        writeln!(out, "{}", result.filename)?;
        writeln!(out, "Score: {:.2}", result.distance)?;
        writeln!(out, "---")?;
        writeln!(out, "{}...", preview(&result.text, preview_chars))?;
    }
    Ok(())
}

/// One JSON document describing a single query and its results.
pub fn write_json_results<W: Write>(
    out: &mut W,
    query: &str,
    indexed_chunk_count: usize,
    results: &[SearchResult],
    requested: usize,
) -> Result<()> {
    let output = serde_json::json!({
        "query": query,
        "indexed_chunk_count": indexed_chunk_count,
        "results": results,
        "actual_results_count": results.len(),
        "requested_results_count": requested,
    });
    writeln!(out, "{}", serde_json::to_string(&output)?)?;
    Ok(())
}

/// One `filename<TAB>offset<TAB>length` line per chunk, length in characters.
pub fn write_chunk_list<W: Write>(out: &mut W, chunks: &[TextChunk]) -> Result<()> {
    for chunk in chunks {
        writeln!(
            out,
            "{}\t{}\t{}",
            chunk.metadata.filename,
            chunk.metadata.offset,
            chunk.text.chars().count()
        )?;
    }
    Ok(())
}

/// Prompt, search, print, repeat. Stops on an empty (or whitespace-only) line or
/// end of input. Returns the number of queries answered.
pub fn run<R: BufRead, W: Write>(
    engine: &SearchEngine,
    top_k: usize,
    preview_chars: usize,
    input: &mut R,
    out: &mut W,
) -> Result<usize> {
    let mut answered = 0;
    loop {
        write!(out, "\n{PROMPT}")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim_end_matches(&['\n', '\r'][..]);
        if query.trim().is_empty() {
            break;
        }

        let (results, _) = engine.search(query, top_k)?;
        write_results(out, &results, preview_chars)?;
        answered += 1;
    }
    Ok(answered)
}
