use crate::config::OutOfRangePolicy;
use crate::consts::RESOLUTION;
use crate::model::{PropertyItem, PropertyModel};
use tracing::{debug, warn};

pub use crate::histogram::Histogram;

/// Position of `value` inside [min, max], in [0, 1] for in-range values.
#[inline(always)]
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    (value - min) / (max - min)
}

/// Unclamped bin of `value`; negative or >= RESOLUTION when out of range.
pub fn raw_bin_index(value: f64, min: f64, max: f64) -> i64 {
    (normalize(value, min, max) * RESOLUTION as f64).floor() as i64
}

/// Bin of `value`, with `max` (and anything past it) landing in the last bin.
pub fn bin_index(value: f64, min: f64, max: f64) -> usize {
    raw_bin_index(value, min, max).clamp(0, RESOLUTION as i64 - 1) as usize
}

/// Farthest an extrapolated query index may sit from the bin range.
/// Weights past it are below 1e-36 for every strategy.
pub const EXTRAPOLATION_LIMIT: i64 = RESOLUTION as i64 * 1_000_000;

/// Bin a query value is scored at, per the out-of-range policy.
pub fn query_index(value: f64, item: &PropertyItem, policy: OutOfRangePolicy) -> i64 {
    match policy {
        OutOfRangePolicy::Clamp => bin_index(value, item.minimum, item.maximum) as i64,
        OutOfRangePolicy::Extrapolate => raw_bin_index(value, item.minimum, item.maximum)
            .clamp(-EXTRAPOLATION_LIMIT, RESOLUTION as i64 + EXTRAPOLATION_LIMIT),
    }
}

/// Fills every label histogram of every non-degenerate property.
///
/// Each raw value adds `normal / n` to its bin, `n` being the label's value
/// count for the property, so a histogram's total is the label's mean
/// normalized value rather than 1.
pub fn build_histograms(mut model: PropertyModel) -> PropertyModel {
    for item in model.properties.values_mut() {
        let degenerate = item.is_degenerate();
        let (min, max) = (item.minimum, item.maximum);

        for pl in item.labels.values_mut() {
            pl.histogram = Histogram::default();
            if degenerate || pl.values.is_empty() {
                continue;
            }
            let n = pl.values.len() as f64;
            for v in &pl.values {
                let normal = normalize(v.value, min, max);
                pl.histogram.add(bin_index(v.value, min, max), normal / n);
            }
        }

        if degenerate {
            if item.range().is_finite() {
                debug!(
                    "Property '{}' is degenerate (min == max == {}), no histograms",
                    item.property, item.minimum
                );
            } else {
                warn!(
                    "Property '{}' spans an unbounded range ({} .. {}), skipped",
                    item.property, item.minimum, item.maximum
                );
            }
        }
    }
    model
}
