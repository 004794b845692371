use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvenanceError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Export Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parsed as JSON but not shaped `[{"label": ..., "months": ...}, ...]`.
    #[error("Not a labelled source file: {0:?} does not start with a label object")]
    NotLabelled(PathBuf),

    #[error("Configuration Error: {0}")]
    Config(String),
}

pub type PvResult<T> = Result<T, ProvenanceError>;
