pub mod engine;
pub mod histogram;
pub mod strategy;
pub mod types;

pub use self::histogram::{bin_index, build_histograms, Histogram};
pub use self::strategy::{GapInterpolated, InverseDistance, ScoringStrategy};
pub use self::types::{
    CheckedMap, CheckedMonth, Classification, Evaluation, LabelRate, LabelShare, MonthBreakdown,
};

use crate::config::{AnalyzerConfig, OutOfRangePolicy, ScoringStrategyKind};
use crate::model::PropertyModel;
use crate::store::SourceDocument;

/// Scores samples against the per-label histograms of a property model.
pub struct Scorer {
    model: PropertyModel,
    strategy: Box<dyn ScoringStrategy>,
    kind: ScoringStrategyKind,
}

impl Scorer {
    /// Builds the histograms of `model` and takes ownership of the result.
    pub fn new(model: PropertyModel, kind: ScoringStrategyKind) -> Self {
        Self {
            model: build_histograms(model),
            strategy: kind.build(),
            kind,
        }
    }

    pub fn model(&self) -> &PropertyModel {
        &self.model
    }

    pub fn strategy_kind(&self) -> ScoringStrategyKind {
        self.kind
    }

    pub fn set_strategy(&mut self, kind: ScoringStrategyKind) {
        self.kind = kind;
        self.strategy = kind.build();
    }

    /// Rate of each label for a single property value.
    ///
    /// Unknown and degenerate properties rate nobody.
    pub fn score(&self, property: &str, value: f64, policy: OutOfRangePolicy) -> Vec<LabelRate> {
        match self.model.get(property) {
            Some(item) => engine::rate_labels(self.strategy.as_ref(), item, value, policy),
            None => Vec::new(),
        }
    }

    pub fn evaluate(&self, sample: &SourceDocument, config: &AnalyzerConfig) -> Evaluation {
        engine::evaluate(&self.model, self.strategy.as_ref(), config, sample)
    }

    pub fn classify(&self, sample: &SourceDocument, config: &AnalyzerConfig) -> Classification {
        self.evaluate(sample, config).classification
    }
}
