pub mod loader;
pub mod types;

pub use self::loader::{read_document, JsonDirSource, MemorySource, RecordSource};
pub use self::types::{scalar_value, Color, Label, MonthRecord, SourceDocument};

use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Per-label monthly records, labels in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    labels: Vec<Label>,
    by_name: HashMap<String, usize>,
}

impl RecordStore {
    /// Builds a store from every document `source` yields.
    ///
    /// Source failures leave the store empty; they never abort the caller.
    pub fn load(source: &dyn RecordSource, rng: &mut fastrand::Rng, exclusion_marker: char) -> Self {
        match source.documents() {
            Ok(docs) => Self::from_documents(docs, rng, exclusion_marker),
            Err(e) => {
                warn!("Record source unavailable: {}", e);
                Self::default()
            }
        }
    }

    pub fn from_documents(
        docs: Vec<SourceDocument>,
        rng: &mut fastrand::Rng,
        exclusion_marker: char,
    ) -> Self {
        let mut store = Self::default();
        let mut skipped = 0;

        for doc in docs {
            if doc.label.contains(exclusion_marker) {
                debug!("Skipping excluded label '{}'", doc.label);
                skipped += 1;
                continue;
            }
            store.ingest(doc, rng);
        }

        info!(
            "Loaded {} labels, {} monthly records ({} excluded documents)",
            store.labels.len(),
            store.record_count(),
            skipped
        );
        store
    }

    fn ingest(&mut self, doc: SourceDocument, rng: &mut fastrand::Rng) {
        let idx = match self.by_name.get(&doc.label) {
            Some(&idx) => idx,
            None => {
                let idx = self.labels.len();
                self.labels.push(Label {
                    name: doc.label.clone(),
                    index: idx,
                    color: Color::random(rng),
                    records: Vec::new(),
                });
                self.by_name.insert(doc.label.clone(), idx);
                idx
            }
        };

        let label = &mut self.labels[idx];
        for (month, fields) in doc.months {
            if fields.is_empty() {
                continue;
            }
            label.records.push(MonthRecord { month, fields });
        }
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn label(&self, name: &str) -> Option<&Label> {
        self.by_name.get(name).map(|&idx| &self.labels[idx])
    }

    pub fn record_count(&self) -> usize {
        self.labels.iter().map(|l| l.records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
