use super::histogram::Histogram;
use crate::config::ScoringStrategyKind;
use crate::consts::RESOLUTION;

/// Likelihood-like score of a query bin against one label's histogram.
pub trait ScoringStrategy {
    fn rate(&self, histogram: &Histogram, index: i64) -> f64;
}

/// Sum of every bin's mass weighted by `1 / (|i - index| + 1)^4`.
///
/// All RESOLUTION bins are visited; empty bins weigh 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct InverseDistance;

impl ScoringStrategy for InverseDistance {
    fn rate(&self, histogram: &Histogram, index: i64) -> f64 {
        let mut res = 0.0;
        for i in 0..RESOLUTION {
            let mass = histogram.mass(i);
            let dist = (i as i64).abs_diff(index) as f64 + 1.0;
            res += mass / dist.powi(4);
        }
        res
    }
}

/// Mass of the query bin, or a straight line between the nearest occupied
/// bins around it. Missing neighbours count as mass 0 just outside the range.
#[derive(Debug, Clone, Copy, Default)]
pub struct GapInterpolated;

impl ScoringStrategy for GapInterpolated {
    fn rate(&self, histogram: &Histogram, index: i64) -> f64 {
        if (0..RESOLUTION as i64).contains(&index) && histogram.contains(index as usize) {
            return histogram.mass(index as usize);
        }

        let (before, after) = histogram.neighbours(index);
        let (b_idx, b_mass) = before.map_or((-1.0, 0.0), |(i, m)| (i as f64, m));
        let (a_idx, a_mass) = after.map_or((RESOLUTION as f64, 0.0), |(i, m)| (i as f64, m));

        let t = ((index as f64 - b_idx) / (a_idx - b_idx)).clamp(0.0, 1.0);
        b_mass + (a_mass - b_mass) * t
    }
}

impl ScoringStrategyKind {
    pub fn build(self) -> Box<dyn ScoringStrategy> {
        match self {
            Self::InverseDistance => Box::new(InverseDistance),
            Self::GapInterpolated => Box::new(GapInterpolated),
        }
    }
}
