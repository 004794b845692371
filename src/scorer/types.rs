use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The observable outcome of classifying one sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Winning label (or "Friends (...)" in friends mode).
    pub result: String,
    /// `Label (P.P%)` pairs, highest first.
    pub percents: String,
    /// One `month: Label (P.P%), ...` line per month.
    pub string: String,
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelRate {
    pub label: String,
    pub label_index: usize,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelShare {
    pub label: String,
    pub label_index: usize,
    pub rate: f64,
    /// Share of the rate sum, floored to one decimal.
    pub percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthBreakdown {
    pub month: String,
    pub shares: Vec<LabelShare>,
}

/// A sample value as it was checked against the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckedMonth {
    pub month: String,
    pub value: f64,
    pub minimum: f64,
    pub maximum: f64,
    pub property: String,
}

pub type CheckedMap = BTreeMap<String, Vec<CheckedMonth>>;

/// Everything a classification run produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Evaluation {
    pub classification: Classification,
    pub ranking: Vec<LabelShare>,
    pub months: Vec<MonthBreakdown>,
    pub checked: CheckedMap,
}
