use super::types::SourceDocument;
use crate::error::{ProvenanceError, PvResult};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Supplies decoded source documents to the store.
pub trait RecordSource {
    fn documents(&self) -> PvResult<Vec<SourceDocument>>;
}

/// Every `*.json` file of a directory, in file-name order.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    pub dir: PathBuf,
}

impl JsonDirSource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn json_files(&self) -> PvResult<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .flatten()
            .map(|entry| entry.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();
        Ok(files)
    }
}

impl RecordSource for JsonDirSource {
    fn documents(&self) -> PvResult<Vec<SourceDocument>> {
        let files = self.json_files()?;
        debug!("Found {} json files in {:?}", files.len(), self.dir);

        let mut docs = Vec::with_capacity(files.len());
        for path in files {
            match read_document(&path) {
                Ok(doc) => docs.push(doc),
                Err(e) => warn!("Skipping {:?}: {}", path, e),
            }
        }
        Ok(docs)
    }
}

/// Pre-decoded documents, for callers that already hold the data.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub docs: Vec<SourceDocument>,
}

impl MemorySource {
    pub fn new(docs: Vec<SourceDocument>) -> Self {
        Self { docs }
    }
}

impl RecordSource for MemorySource {
    fn documents(&self) -> PvResult<Vec<SourceDocument>> {
        Ok(self.docs.clone())
    }
}

/// Reads and decodes a single source file.
pub fn read_document<P: AsRef<Path>>(path: P) -> PvResult<SourceDocument> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let root: Value = serde_json::from_str(&content)?;
    SourceDocument::from_json(root).ok_or_else(|| ProvenanceError::NotLabelled(path.to_path_buf()))
}
