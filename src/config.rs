use crate::consts::{DEFAULT_COLOR_SEED, EXCLUSION_MARKER};
use crate::error::{ProvenanceError, PvResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

/// Which rate function scores a query value against a label's histogram.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategyKind {
    /// Inverse-fourth-power distance weighted sum over every bin.
    #[default]
    InverseDistance,
    /// Direct lookup, linearly interpolated across empty bins.
    GapInterpolated,
}

/// What to do with a query value that falls outside the trained [min, max].
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    /// Pin the query bin to the first or last bin.
    #[default]
    Clamp,
    /// Keep the signed bin index; distance keeps growing past the edges.
    Extrapolate,
}

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Only these properties are modelled and scored (all when empty)
    #[arg(long, value_delimiter = ',')]
    pub properties: Vec<String>,

    /// Merge "Casual rel" and "Close rel" into a composite "Friends" label
    #[arg(long, default_value_t = false)]
    pub friends_mode: bool,

    #[arg(long, default_value_t = ScoringStrategyKind::InverseDistance)]
    pub strategy: ScoringStrategyKind,

    #[arg(long, default_value_t = OutOfRangePolicy::Clamp)]
    pub out_of_range: OutOfRangePolicy,

    #[arg(long, default_value_t = DEFAULT_COLOR_SEED)]
    pub color_seed: u64,

    #[arg(long, default_value_t = EXCLUSION_MARKER)]
    pub exclusion_marker: char,
}

/// Allow-list test shared by model building and scoring; empty admits all.
pub fn is_allowed(allow: &[String], property: &str) -> bool {
    allow.is_empty() || allow.iter().any(|p| p == property)
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            properties: Vec::new(),
            friends_mode: false,
            strategy: ScoringStrategyKind::default(),
            out_of_range: OutOfRangePolicy::default(),
            color_seed: DEFAULT_COLOR_SEED,
            exclusion_marker: EXCLUSION_MARKER,
        }
    }
}

impl AnalyzerConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PvResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ProvenanceError::Config(format!("Failed to read config {:?}: {}", path, e))
        })?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// True when `property` passes the allow-list.
    pub fn allows(&self, property: &str) -> bool {
        is_allowed(&self.properties, property)
    }

    /// Copies values the user typed explicitly onto a file-loaded config.
    pub fn merge_from_cli(&mut self, cli: &AnalyzerConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(properties);
        update_if_present!(friends_mode);
        update_if_present!(strategy);
        update_if_present!(out_of_range);
        update_if_present!(color_seed);
        update_if_present!(exclusion_marker);
    }
}
