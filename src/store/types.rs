use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self {
            r: rng.u8(0..255),
            g: rng.u8(0..255),
            b: rng.u8(0..255),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One month of a label's numeric fields (the `sum` map of a month).
#[derive(Debug, Clone, PartialEq)]
pub struct MonthRecord {
    pub month: String,
    pub fields: Map<String, Value>,
}

/// A labelled entity and everything loaded for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub name: String,
    pub index: usize,
    pub color: Color,
    pub records: Vec<MonthRecord>,
}

/// The decoded head of a source file: `[{"label": ..., "months": {...}}, ...]`.
///
/// `months` maps a month key to that month's `sum` map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceDocument {
    pub label: String,
    pub months: BTreeMap<String, Map<String, Value>>,
}

impl SourceDocument {
    /// Decodes a whole file body. `None` when there is no leading object.
    pub fn from_json(root: Value) -> Option<Self> {
        let head = match root {
            Value::Array(items) => items.into_iter().next()?,
            _ => return None,
        };
        let Value::Object(mut head) = head else {
            return None;
        };

        let label = match head.remove("label") {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };

        let mut months = BTreeMap::new();
        if let Some(Value::Object(raw_months)) = head.remove("months") {
            for (key, month) in raw_months {
                let sum = match month {
                    Value::Object(mut m) => match m.remove("sum") {
                        Some(Value::Object(sum)) => sum,
                        _ => Map::new(),
                    },
                    _ => Map::new(),
                };
                months.insert(key, sum);
            }
        }

        Some(Self { label, months })
    }
}

/// Reads a JSON field as a scalar feature value.
///
/// Numbers are taken as-is, booleans become 1/0 and numeric strings are
/// parsed. Containers, nulls and free text are not features.
pub fn scalar_value(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    };
    v.filter(|v| v.is_finite())
}
