#![allow(dead_code)]

use provenance::store::SourceDocument;
use serde_json::{json, Map, Value};
use std::path::Path;
use tempfile::TempDir;

/// Builder for the `[{"label": ..., "months": {...}}]` file shape.
pub struct DocBuilder {
    label: String,
    months: Map<String, Value>,
}

impl DocBuilder {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            months: Map::new(),
        }
    }

    /// Adds a month whose `sum` map holds `fields`.
    pub fn month(mut self, key: &str, fields: Value) -> Self {
        self.months.insert(key.to_string(), json!({ "sum": fields }));
        self
    }

    /// Adds one month per value of a single property.
    pub fn series(mut self, property: &str, values: &[f64]) -> Self {
        for v in values {
            let key = format!("2019-{:02}", self.months.len() + 1);
            self.months.insert(key, json!({ "sum": { property: v } }));
        }
        self
    }

    pub fn json(&self) -> Value {
        json!([{ "label": self.label, "months": self.months }])
    }

    pub fn doc(&self) -> SourceDocument {
        SourceDocument::from_json(self.json()).unwrap()
    }

    pub fn write(&self, dir: &Path, file: &str) {
        std::fs::write(dir.join(file), self.json().to_string()).unwrap();
    }
}

/// Temp directory holding one file per builder (`00.json`, `01.json`, ...).
pub fn source_dir(docs: &[DocBuilder]) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    for (i, d) in docs.iter().enumerate() {
        d.write(dir.path(), &format!("{:02}.json", i));
    }
    dir
}

/// Label "A" around the bottom of x's range and "B" around the top.
pub fn two_cluster_docs() -> Vec<DocBuilder> {
    vec![
        DocBuilder::new("A").series("x", &[0.0, 10.0]),
        DocBuilder::new("B").series("x", &[90.0, 100.0]),
    ]
}

pub fn rate_of(rates: &[provenance::scorer::LabelRate], label: &str) -> f64 {
    rates
        .iter()
        .find(|r| r.label == label)
        .map(|r| r.rate)
        .unwrap_or(0.0)
}
