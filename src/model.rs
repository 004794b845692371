use crate::config::is_allowed;
use crate::histogram::Histogram;
use crate::store::{scalar_value, Color, RecordStore};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyValue {
    pub value: f64,
    /// Month key the value was read from.
    pub month: Option<String>,
}

/// The values one label contributed to one property, and their histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyLabel {
    pub label: String,
    pub label_index: usize,
    pub color: Color,
    pub values: Vec<PropertyValue>,
    pub histogram: Histogram,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyItem {
    pub property: String,
    pub minimum: f64,
    pub maximum: f64,
    pub sum: f64,
    pub count: usize,
    /// Keyed by label index so iteration follows load order.
    pub labels: BTreeMap<usize, PropertyLabel>,
}

impl PropertyItem {
    pub fn new(property: &str) -> Self {
        Self {
            property: property.to_string(),
            minimum: f64::INFINITY,
            maximum: f64::NEG_INFINITY,
            sum: 0.0,
            count: 0,
            labels: BTreeMap::new(),
        }
    }

    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    /// Zero-variance, never observed, or unbounded (`max - min` overflows)
    /// properties carry no usable signal.
    pub fn is_degenerate(&self) -> bool {
        let range = self.range();
        self.count == 0 || !(range > 0.0 && range.is_finite())
    }

    pub fn range(&self) -> f64 {
        self.maximum - self.minimum
    }

    fn observe(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
        if value > self.maximum {
            self.maximum = value;
        }
        if value < self.minimum {
            self.minimum = value;
        }
    }
}

/// Every scalar property seen across the store, with per-label raw values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyModel {
    pub properties: BTreeMap<String, PropertyItem>,
}

impl PropertyModel {
    /// Full pass over labels x records x fields. An empty `allow` admits all.
    pub fn build(store: &RecordStore, allow: &[String]) -> Self {
        let mut properties: BTreeMap<String, PropertyItem> = BTreeMap::new();

        for label in store.labels() {
            for record in &label.records {
                for (name, raw) in &record.fields {
                    if !is_allowed(allow, name) {
                        continue;
                    }
                    let Some(value) = scalar_value(raw) else {
                        continue;
                    };

                    let item = properties
                        .entry(name.clone())
                        .or_insert_with(|| PropertyItem::new(name));
                    item.observe(value);

                    item.labels
                        .entry(label.index)
                        .or_insert_with(|| PropertyLabel {
                            label: label.name.clone(),
                            label_index: label.index,
                            color: label.color,
                            values: Vec::new(),
                            histogram: Histogram::default(),
                        })
                        .values
                        .push(PropertyValue {
                            value,
                            month: Some(record.month.clone()),
                        });
                }
            }
        }

        debug!(
            "Property model: {} properties ({} degenerate)",
            properties.len(),
            properties.values().filter(|p| p.is_degenerate()).count()
        );

        Self { properties }
    }

    pub fn get(&self, property: &str) -> Option<&PropertyItem> {
        self.properties.get(property)
    }

    /// Properties that take part in distribution building and scoring.
    pub fn scorable(&self) -> impl Iterator<Item = &PropertyItem> {
        self.properties.values().filter(|p| !p.is_degenerate())
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
