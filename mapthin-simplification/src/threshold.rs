//! Removal-interval selection via rank-order statistics
//!
//! Derives a single global removal interval from per-arc vertex weights and
//! a target retention percentage. Interior weights are sampled at a fixed
//! stride (default: every second vertex) before ranking, trading a little
//! accuracy for speed on large datasets.

use mapthin_core::{Error, Result, VertexWeights};

/// Selects a removal interval from per-arc vertex weights.
///
/// The interval is the `(k+1)`-th smallest sampled interior weight, with
/// `k = floor((1 - retain_pct) * samples)`. Thinning an arc collection at
/// that interval removes roughly `1 - retain_pct` of its interior vertices.
#[derive(Debug, Clone, Copy)]
pub struct IntervalSelector {
    /// Sampling stride over interior vertices. Stride 2 ranks every second
    /// interior weight; stride 1 ranks all of them (exact percentile).
    pub sample_stride: usize,
}

impl Default for IntervalSelector {
    fn default() -> Self {
        Self { sample_stride: 2 }
    }
}

impl IntervalSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stride(sample_stride: usize) -> Self {
        Self { sample_stride }
    }

    /// Compute the removal interval for a target retention percentage.
    ///
    /// `retain_pct` must lie strictly between 0 and 1. Fails when no arc
    /// contributes an interior vertex to sample.
    pub fn select(&self, weights: &[VertexWeights], retain_pct: f64) -> Result<f64> {
        if !(retain_pct > 0.0 && retain_pct < 1.0) {
            return Err(Error::InvalidData(format!(
                "invalid retention percentage: {retain_pct}"
            )));
        }
        if self.sample_stride == 0 {
            return Err(Error::InvalidData("sample stride must be >= 1".to_string()));
        }

        let stride = self.sample_stride;
        let count: usize = weights
            .iter()
            .map(|uu| uu.len().saturating_sub(2).div_ceil(stride))
            .sum();
        if count == 0 {
            return Err(Error::InvalidData(
                "no interior vertices to sample".to_string(),
            ));
        }

        let mut samples = Vec::with_capacity(count);
        for uu in weights {
            let lim = uu.len().saturating_sub(1);
            for j in (1..lim).step_by(stride) {
                samples.push(uu[j]);
            }
        }
        debug_assert_eq!(samples.len(), count);

        // floor() lands on count itself when retain_pct underflows to ~0
        let k = (((1.0 - retain_pct) * count as f64).floor() as usize).min(count - 1);
        let (_, kth, _) = samples.select_nth_unstable_by(k, f64::total_cmp);
        Ok(*kth)
    }
}

/// Compute a removal interval with the default every-second-vertex sampling.
pub fn interval_by_retention(weights: &[VertexWeights], retain_pct: f64) -> Result<f64> {
    IntervalSelector::new().select(weights, retain_pct)
}
