use crate::config::{AnalyzerConfig, OutOfRangePolicy, ScoringStrategyKind};
use crate::model::PropertyModel;
use crate::scorer::{CheckedMap, Classification, Evaluation, Scorer};
use crate::store::{read_document, Color, JsonDirSource, RecordSource, RecordStore, SourceDocument};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPoint {
    pub value: f64,
    pub color: Color,
    pub label_index: usize,
    pub label: String,
    pub month: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyReport {
    pub property: String,
    pub minimum: f64,
    pub maximum: f64,
    pub average: f64,
    pub list: Vec<PropertyPoint>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabelReport {
    pub label: String,
    pub color: Color,
    pub label_index: usize,
}

/// Owns one load cycle: the records of a source, the model built from
/// them, and the outcome of the last check.
pub struct Analyzer {
    config: AnalyzerConfig,
    source: Option<PathBuf>,
    store: RecordStore,
    scorer: Scorer,
    checked: CheckedMap,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        let scorer = Scorer::new(PropertyModel::default(), config.strategy);
        Self {
            config,
            source: None,
            store: RecordStore::default(),
            scorer,
            checked: CheckedMap::new(),
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Points the analyzer at a directory of JSON files and rebuilds
    /// everything. Returns false when the source is unchanged.
    pub fn set_source<P: AsRef<Path>>(&mut self, dir: P) -> bool {
        let dir = dir.as_ref();
        if self.source.as_deref() == Some(dir) {
            return false;
        }
        info!("Loading source {:?}", dir);
        self.source = Some(dir.to_path_buf());
        self.load_from(&JsonDirSource::new(dir));
        true
    }

    /// Replaces the store with the documents of `source`.
    pub fn load_from(&mut self, source: &dyn RecordSource) {
        let mut rng = fastrand::Rng::with_seed(self.config.color_seed);
        self.store = RecordStore::load(source, &mut rng, self.config.exclusion_marker);
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let model = PropertyModel::build(&self.store, &self.config.properties);
        self.scorer = Scorer::new(model, self.config.strategy);
        self.checked.clear();
    }

    pub fn properties(&self) -> &[String] {
        &self.config.properties
    }

    /// Sets the property allow-list; the model is rebuilt when it changes.
    pub fn set_properties(&mut self, properties: Vec<String>) -> bool {
        if self.config.properties == properties {
            return false;
        }
        self.config.properties = properties;
        self.rebuild();
        true
    }

    pub fn friends_mode(&self) -> bool {
        self.config.friends_mode
    }

    pub fn set_friends_mode(&mut self, friends_mode: bool) -> bool {
        if self.config.friends_mode == friends_mode {
            return false;
        }
        self.config.friends_mode = friends_mode;
        true
    }

    pub fn set_strategy(&mut self, kind: ScoringStrategyKind) {
        self.config.strategy = kind;
        self.scorer.set_strategy(kind);
    }

    pub fn set_out_of_range(&mut self, policy: OutOfRangePolicy) {
        self.config.out_of_range = policy;
    }

    /// Every raw value of every non-degenerate property, with attribution.
    pub fn by_properties(&self) -> Vec<PropertyReport> {
        self.scorer
            .model()
            .scorable()
            .map(|item| PropertyReport {
                property: item.property.clone(),
                minimum: item.minimum,
                maximum: item.maximum,
                average: item.average(),
                list: item
                    .labels
                    .values()
                    .flat_map(|pl| {
                        pl.values.iter().map(move |v| PropertyPoint {
                            value: v.value,
                            color: pl.color,
                            label_index: pl.label_index,
                            label: pl.label.clone(),
                            month: v.month.clone(),
                        })
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn labels(&self) -> Vec<LabelReport> {
        self.store
            .labels()
            .iter()
            .map(|l| LabelReport {
                label: l.name.clone(),
                color: l.color,
                label_index: l.index,
            })
            .collect()
    }

    pub fn checked_map(&self) -> &CheckedMap {
        &self.checked
    }

    /// Classifies the sample file at `path`. Unreadable samples give an
    /// empty result.
    pub fn check<P: AsRef<Path>>(&mut self, path: P) -> Classification {
        self.check_evaluation(path).classification
    }

    pub fn check_evaluation<P: AsRef<Path>>(&mut self, path: P) -> Evaluation {
        self.checked.clear();
        match read_document(path.as_ref()) {
            Ok(sample) => self.evaluate(&sample),
            Err(e) => {
                warn!("Could not read sample {:?}: {}", path.as_ref(), e);
                Evaluation::default()
            }
        }
    }

    pub fn evaluate(&mut self, sample: &SourceDocument) -> Evaluation {
        let evaluation = self.scorer.evaluate(sample, &self.config);
        self.checked = evaluation.checked.clone();
        evaluation
    }
}
