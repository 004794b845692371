use crate::consts::RESOLUTION;
use std::collections::BTreeMap;

/// Sparse per-label histogram: bin index -> accumulated normalized mass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    bins: BTreeMap<usize, f64>,
}

impl Histogram {
    /// Mass of bin `i`; missing bins hold 0.
    #[inline(always)]
    pub fn mass(&self, i: usize) -> f64 {
        self.bins.get(&i).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, i: usize) -> bool {
        self.bins.contains_key(&i)
    }

    pub fn add(&mut self, i: usize, mass: f64) {
        *self.bins.entry(i).or_insert(0.0) += mass;
    }

    /// Occupied bins in ascending index order.
    pub fn bins(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.bins.iter().map(|(&i, &m)| (i, m))
    }

    /// Nearest occupied bins strictly below and strictly above `index`.
    pub fn neighbours(&self, index: i64) -> (Option<(usize, f64)>, Option<(usize, f64)>) {
        let before = if index <= 0 {
            None
        } else {
            let upper = (index as usize).min(RESOLUTION);
            self.bins.range(..upper).next_back().map(|(&i, &m)| (i, m))
        };
        let after = if index >= RESOLUTION as i64 - 1 {
            None
        } else {
            let lower = if index < 0 { 0 } else { index as usize + 1 };
            self.bins.range(lower..).next().map(|(&i, &m)| (i, m))
        };
        (before, after)
    }

    pub fn total(&self) -> f64 {
        self.bins.values().sum()
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}
