use crate::error::{ChunkerError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const TEXT_EXTENSION: &str = "txt";

/// A loaded text document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File the content was read from
    pub path: PathBuf,

    /// Raw file content
    pub content: String,
}

impl Document {
    /// File stem, used as the ingestion source name
    #[must_use]
    pub fn source_name(&self) -> String {
        source_name(&self.path)
    }
}

/// Ingestion source name for a file: its stem, or `"unknown"` without one.
#[must_use]
pub fn source_name(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| "unknown".to_string(), |stem| stem.to_string_lossy().into_owned())
}

/// Load a `.txt` file, or every `.txt` file under a directory (sorted by path).
pub fn load_documents(path: impl AsRef<Path>) -> Result<Vec<Document>> {
    let path = path.as_ref();

    if path.is_dir() {
        let mut files = Vec::new();
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.map_err(|e| ChunkerError::Other(e.to_string()))?;
            if entry.file_type().is_file() && is_text_file(entry.path()) {
                files.push(entry.into_path());
            }
        }

        log::info!("Loading {} text files from {}", files.len(), path.display());
        return files.into_iter().map(|file| read_document(&file)).collect();
    }

    if path.is_file() && is_text_file(path) {
        return Ok(vec![read_document(path)?]);
    }

    if !path.exists() {
        return Err(ChunkerError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", path.display()),
        )));
    }

    Err(ChunkerError::unsupported_file(path.display().to_string()))
}

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TEXT_EXTENSION))
}

fn read_document(path: &Path) -> Result<Document> {
    log::debug!("Reading {}", path.display());
    Ok(Document {
        path: path.to_path_buf(),
        content: fs::read_to_string(path)?,
    })
}
