pub mod check;
pub mod export;
pub mod inspect;

use provenance::api::Analyzer;
use provenance::config::AnalyzerConfig;
use provenance::error::{ProvenanceError, PvResult};
use std::path::Path;

/// Loads `source` into a fresh analyzer; a missing directory is an error.
pub fn load_analyzer(source: &str, config: AnalyzerConfig) -> PvResult<Analyzer> {
    if !Path::new(source).is_dir() {
        return Err(ProvenanceError::Config(format!(
            "Source directory not found: {}",
            source
        )));
    }
    let mut analyzer = Analyzer::new(config);
    analyzer.set_source(source);
    Ok(analyzer)
}
