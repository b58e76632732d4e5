//! End-to-end indexing and search through the public API, with the PDF reader and
//! the model swapped for deterministic fakes.

use pdfseek::embedding::EmbeddingGenerator;
use pdfseek::indexer::{build_index, collect_chunks, IndexOptions};
use pdfseek::repl::{write_chunk_list, write_json_results};
use pdfseek::loader::TextExtractor;
use pdfseek::{Result, SearchEngine, SeekError};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DIM: usize = 24;

/// Reads the fake PDF as plain text, one page per form feed.
struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let raw = fs::read_to_string(path).map_err(|source| SeekError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(raw.split('\u{c}').map(str::to_string).collect())
    }
}

/// Character trigram counts folded into `DIM` buckets.
struct TrigramEmbedder;

impl EmbeddingGenerator for TrigramEmbedder {
    fn generate_embeddings(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| {
                let mut v = vec![0.0f32; DIM];
                let chars: Vec<char> = text.chars().collect();
                for w in chars.windows(3) {
                    let h = w.iter().fold(7u32, |acc, c| acc.wrapping_mul(31).wrapping_add(*c as u32));
                    v[h as usize % DIM] += 1.0;
                }
                v
            })
            .collect())
    }

    fn dimension(&self) -> usize {
        DIM
    }
}

fn options(chunk_size: usize) -> IndexOptions {
    IndexOptions {
        chunk_size,
        batch_size: 4,
        show_progress: false,
    }
}

fn sample_text(len: usize) -> String {
    let words = ["lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit"];
    let mut text = String::new();
    let mut i = 0;
    while text.chars().count() < len {
        text.push_str(words[i % words.len()]);
        text.push(' ');
        i += 1;
    }
    text.chars().take(len).collect()
}

#[test]
fn single_document_of_1200_chars_makes_three_chunks() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.pdf"), sample_text(1200)).unwrap();

    let (index, stats) = build_index(dir.path(), &PlainTextExtractor, &TrigramEmbedder, &options(500)).unwrap();

    assert_eq!(stats.documents, 1);
    assert_eq!(stats.chunks, 3);
    assert_eq!(stats.dimension, DIM);

    let shape: Vec<(&str, usize, usize)> = index
        .records()
        .iter()
        .map(|r| (r.metadata.filename.as_str(), r.metadata.offset, r.text.chars().count()))
        .collect();
    assert_eq!(shape, vec![("a.pdf", 0, 500), ("a.pdf", 500, 500), ("a.pdf", 1000, 200)]);
}

#[test]
fn pages_are_joined_with_a_space_before_chunking() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("pages.pdf"), "abc\u{c}def").unwrap();

    let (index, _) = build_index(dir.path(), &PlainTextExtractor, &TrigramEmbedder, &options(4)).unwrap();
    let texts: Vec<&str> = index.records().iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["abc ", "def"]);
}

#[test]
fn empty_folder_answers_with_no_results() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("readme.txt"), "not a pdf").unwrap();

    let (index, stats) = build_index(dir.path(), &PlainTextExtractor, &TrigramEmbedder, &options(500)).unwrap();
    assert_eq!(stats.chunks, 0);

    let engine = SearchEngine::new(Box::new(TrigramEmbedder), index);
    let (results, _) = engine.search("anything at all", 5).unwrap();
    assert!(results.is_empty());
}

#[test]
fn querying_with_chunk_text_returns_that_chunk_first() {
    let dir = TempDir::new().unwrap();
    let texts = HashMap::from([
        ("rust.pdf", "ownership and borrowing keep memory safe without a garbage collector"),
        ("bread.pdf", "knead the dough, let it rise overnight, then bake at high heat"),
        ("orbit.pdf", "a satellite in low earth orbit circles the planet every ninety minutes"),
    ]);
    for (name, text) in &texts {
        fs::write(dir.path().join(name), text).unwrap();
    }

    let (index, _) = build_index(dir.path(), &PlainTextExtractor, &TrigramEmbedder, &options(500)).unwrap();
    let engine = SearchEngine::new(Box::new(TrigramEmbedder), index);

    for (name, text) in &texts {
        let (results, _) = engine.search(text, 5).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(&results[0].filename, name);
        assert_eq!(&results[0].text, text);
        assert!(results[0].distance.abs() < 1e-6);
        assert!(results.windows(2).all(|w| w[0].distance <= w[1].distance));
    }
}

#[test]
fn missing_folder_aborts_indexing() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("uploads");

    let err = build_index(&missing, &PlainTextExtractor, &TrigramEmbedder, &options(500)).unwrap_err();
    assert!(matches!(err, SeekError::Io { .. }));
}

#[test]
fn list_output_has_one_tab_separated_line_per_chunk() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.pdf"), sample_text(1200)).unwrap();

    let (documents, chunks) = collect_chunks(dir.path(), 500, &PlainTextExtractor).unwrap();
    assert_eq!(documents, 1);

    let mut out = Vec::new();
    write_chunk_list(&mut out, &chunks).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "a.pdf\t0\t500\na.pdf\t500\t500\na.pdf\t1000\t200\n");
}

#[test]
fn json_output_describes_query_and_results() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.pdf"), sample_text(1200)).unwrap();

    let (index, _) = build_index(dir.path(), &PlainTextExtractor, &TrigramEmbedder, &options(500)).unwrap();
    let engine = SearchEngine::new(Box::new(TrigramEmbedder), index);
    let (results, _) = engine.search("lorem ipsum", 2).unwrap();

    let mut out = Vec::new();
    write_json_results(&mut out, "lorem ipsum", engine.index().len(), &results, 2).unwrap();

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["query"], "lorem ipsum");
    assert_eq!(json["indexed_chunk_count"], 3);
    assert_eq!(json["actual_results_count"], 2);
    assert_eq!(json["requested_results_count"], 2);

    let hits = json["results"].as_array().unwrap();
    assert_eq!(hits.len(), 2);
    for hit in hits {
        assert_eq!(hit["filename"], "a.pdf");
        assert!(hit["offset"].is_u64());
        assert!(hit["text"].is_string());
        assert!(hit["distance"].is_f64());
    }
}
