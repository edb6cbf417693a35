//! Interval-driven arc thinning
//!
//! Removes interior vertices whose weight does not exceed a removal
//! interval, with a per-arc guarantee on the minimum number of surviving
//! interior points and detection of closed rings that collapse below
//! 4 points.

use crate::threshold::IntervalSelector;
use itertools::izip;
use log::debug;
use mapthin_core::{Arc, ArcCollection, Error, Result, VertexWeights};
use priority_queue::PriorityQueue;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::time::Instant;

// ============================================================
// Results and Configuration
// ============================================================

/// Outcome of thinning one arc.
#[derive(Debug, Clone, PartialEq)]
pub enum ThinnedArc {
    /// The arc survived thinning with both endpoints intact.
    Retained(Arc),
    /// The arc was a closed ring that thinned below 4 points; it must be
    /// dropped from further processing.
    Collapsed,
}

impl ThinnedArc {
    pub fn is_collapsed(&self) -> bool {
        matches!(self, ThinnedArc::Collapsed)
    }

    pub fn as_arc(&self) -> Option<&Arc> {
        match self {
            ThinnedArc::Retained(arc) => Some(arc),
            ThinnedArc::Collapsed => None,
        }
    }

    pub fn into_arc(self) -> Option<Arc> {
        match self {
            ThinnedArc::Retained(arc) => Some(arc),
            ThinnedArc::Collapsed => None,
        }
    }

    /// Vertex count of the surviving arc; 0 for a collapsed ring.
    pub fn point_count(&self) -> usize {
        self.as_arc().map_or(0, |arc| arc.len())
    }
}

/// Batch thinning configuration.
#[derive(Debug, Clone, Default)]
pub struct ThinOptions {
    /// Per-arc minimum number of interior points that must survive,
    /// parallel to the arc collection. `None` means no minimum anywhere.
    pub min_points: Option<Vec<usize>>,
}

/// Before/after point counts summed across a thinned batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinStats {
    pub original_points: usize,
    pub thinned_points: usize,
}

/// Result of thinning an arc collection.
#[derive(Debug, Clone)]
pub struct ThinnedBatch {
    pub arcs: Vec<ThinnedArc>,
    pub stats: ThinStats,
}

// ============================================================
// Candidate Rank for Priority Queue
// ============================================================

#[derive(Debug, Clone, Copy)]
struct VertexRank {
    index: usize,
    weight: f64,
}

impl PartialEq for VertexRank {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for VertexRank {}

impl PartialOrd for VertexRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VertexRank {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-first: the queue surfaces the weakest candidate, and among
        // equal weights the earliest-seen vertex
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.index.cmp(&self.index))
    }
}

// ============================================================
// Strip
// ============================================================

/// Strip an arc down to its endpoints plus the `retained` highest-weight
/// interior points, preserving original vertex order.
///
/// A candidate set of at most `retained` interior vertices is kept while
/// scanning in order; once full, the weakest candidate is replaced only when
/// a new vertex weighs *strictly* more, so ties keep the earlier-seen point.
/// With `retained >= interior count` the arc comes back unchanged.
pub fn strip_arc(xx: &[f64], yy: &[f64], weights: &[f64], retained: usize) -> Result<Arc> {
    let len = xx.len();
    if len < 2 {
        return Err(Error::InvalidData(format!(
            "arc must have at least 2 vertices, got {len}"
        )));
    }
    debug_assert_eq!(yy.len(), len);
    debug_assert_eq!(weights.len(), len);

    let mut candidates: PriorityQueue<usize, VertexRank> = PriorityQueue::new();
    if retained > 0 {
        for (i, &u) in weights.iter().enumerate().take(len - 1).skip(1) {
            if candidates.len() < retained {
                candidates.push(i, VertexRank { index: i, weight: u });
            } else if let Some((_, weakest)) = candidates.peek() {
                if u > weakest.weight {
                    candidates.pop();
                    candidates.push(i, VertexRank { index: i, weight: u });
                }
            }
        }
    }

    let mut kept: Vec<usize> = candidates.into_iter().map(|(i, _)| i).collect();
    kept.sort_unstable();

    let mut xx2 = Vec::with_capacity(kept.len() + 2);
    let mut yy2 = Vec::with_capacity(kept.len() + 2);
    xx2.push(xx[0]);
    yy2.push(yy[0]);
    for &i in &kept {
        xx2.push(xx[i]);
        yy2.push(yy[i]);
    }
    xx2.push(xx[len - 1]);
    yy2.push(yy[len - 1]);
    Ok(Arc::from_xy(xx2, yy2))
}

// ============================================================
// Single-Arc Thinning
// ============================================================

/// Thin one arc at a removal interval.
///
/// Keeps every vertex whose weight is strictly greater than `interval`
/// (endpoints carry infinite weight by convention and always survive). When
/// fewer than `min_interior` interior points remain, the arc is recomputed
/// via [`strip_arc`] so the `min_interior` highest-weight interior points
/// survive regardless of the interval. A closed ring that ends up below
/// 4 points comes back as [`ThinnedArc::Collapsed`].
pub fn thin_arc(
    xx: &[f64],
    yy: &[f64],
    weights: &[f64],
    interval: f64,
    min_interior: usize,
) -> Result<ThinnedArc> {
    let len = xx.len();
    if yy.len() != len || weights.len() != len || len < 2 {
        return Err(Error::InvalidData(format!(
            "invalid arc data: {len} x-coords, {} y-coords, {} weights",
            yy.len(),
            weights.len()
        )));
    }

    let mut xdest = Vec::new();
    let mut ydest = Vec::new();
    for (&x, &y, &u) in izip!(xx, yy, weights) {
        if u > interval {
            xdest.push(x);
            ydest.push(y);
        }
    }

    // min_interior counts interior points only, endpoints excluded
    let mut arc = Arc::from_xy(xdest, ydest);
    if arc.len() < min_interior + 2 {
        arc = strip_arc(xx, yy, weights, min_interior)?;
    }

    if arc.len() < 4 && arc.is_closed() {
        return Ok(ThinnedArc::Collapsed);
    }
    Ok(ThinnedArc::Retained(arc))
}

// ============================================================
// Batch Thinning
// ============================================================

/// Thin every arc in a collection at one removal interval.
///
/// `weights` must be parallel to `arcs`, and `opts.min_points` (when
/// present) must be too. Arcs are processed independently and in parallel;
/// output order matches input order.
pub fn thin_arcs(
    arcs: &ArcCollection,
    weights: &[VertexWeights],
    interval: f64,
    opts: &ThinOptions,
) -> Result<ThinnedBatch> {
    if weights.len() != arcs.len() {
        return Err(Error::InvalidData(format!(
            "weight arrays ({}) do not match arcs ({})",
            weights.len(),
            arcs.len()
        )));
    }
    if let Some(min_points) = &opts.min_points {
        if min_points.len() != arcs.len() {
            return Err(Error::InvalidData(format!(
                "min_points ({}) does not match arcs ({})",
                min_points.len(),
                arcs.len()
            )));
        }
    }

    let thinned: Vec<ThinnedArc> = arcs
        .arcs
        .par_iter()
        .zip(weights.par_iter())
        .enumerate()
        .map(|(i, (arc, uu))| {
            let min_interior = opts.min_points.as_ref().map_or(0, |mp| mp[i]);
            thin_arc(&arc.xx, &arc.yy, uu, interval, min_interior)
        })
        .collect::<Result<_>>()?;

    let stats = ThinStats {
        original_points: arcs.total_point_count(),
        thinned_points: thinned.iter().map(|t| t.point_count()).sum(),
    };
    Ok(ThinnedBatch {
        arcs: thinned,
        stats,
    })
}

/// Thin every arc in a collection at a target retention percentage.
///
/// Selects the removal interval from the weight distribution (default
/// every-second-vertex sampling, see [`IntervalSelector`]) and then runs
/// [`thin_arcs`] at that interval.
pub fn thin_arcs_by_retention(
    arcs: &ArcCollection,
    weights: &[VertexWeights],
    retain_pct: f64,
    opts: &ThinOptions,
) -> Result<ThinnedBatch> {
    if weights.len() != arcs.len() {
        return Err(Error::InvalidData(format!(
            "weight arrays ({}) do not match arcs ({})",
            weights.len(),
            arcs.len()
        )));
    }

    let started = Instant::now();
    let interval = IntervalSelector::new().select(weights, retain_pct)?;
    debug!(
        "selected removal interval {interval} in {:?}",
        started.elapsed()
    );

    let started = Instant::now();
    let batch = thin_arcs(arcs, weights, interval, opts)?;
    debug!(
        "removed {} of {} points in {:?}",
        batch.stats.original_points - batch.stats.thinned_points,
        batch.stats.original_points,
        started.elapsed()
    );
    Ok(batch)
}
