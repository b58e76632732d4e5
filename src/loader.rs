//! Loading PDF documents from a folder.

use crate::error::{Result, SeekError};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// The full extracted text of one PDF file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub filename: String,
    pub text: String,
}

/// Something that can turn a file into per-page text.
pub trait TextExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>>;
}

/// Extracts page text with the `pdf-extract` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        pdf_extract::extract_text_by_pages(path).map_err(|e| SeekError::Extraction {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

fn is_pdf_name(name: &str) -> bool {
    name.ends_with(".pdf")
}

/// Read every `.pdf` file directly inside `folder`, in directory listing order.
///
/// Pages are joined with a single space. Any failure aborts the whole load so
/// that search coverage never silently shrinks.
pub fn load_documents(folder: &Path, extractor: &dyn TextExtractor) -> Result<Vec<Document>> {
    let io_err = |source| SeekError::Io {
        path: folder.to_path_buf(),
        source,
    };

    let mut documents = Vec::new();
    for entry in fs::read_dir(folder).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let filename = entry.file_name().to_string_lossy().into_owned();
        if !is_pdf_name(&filename) {
            continue;
        }

        let path = entry.path();
        // Follows symlinks; a dangling link is an error, not a skip.
        let metadata = fs::metadata(&path).map_err(|source| SeekError::Io {
            path: path.clone(),
            source,
        })?;
        if !metadata.is_file() {
            debug!("Skipping non-file entry {}", path.display());
            continue;
        }

        let pages = extractor.extract_pages(&path)?;
        debug!("Extracted {} pages from {}", pages.len(), filename);
        documents.push(Document {
            filename,
            text: pages.join(" "),
        });
    }

    info!("Loaded {} PDF documents from {}", documents.len(), folder.display());
    Ok(documents)
}
