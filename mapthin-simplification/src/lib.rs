//! Threshold-driven arc thinning algorithms
//!
//! This crate reduces the vertex count of boundary arcs while preserving
//! their endpoints and overall shape:
//! - Removal-interval selection from a target retention percentage
//! - Per-arc interval thinning with a minimum-interior-points guarantee
//! - Collapsed-ring detection for arcs that degenerate below 4 points
//! - Spherical projection of lng/lat arcs ahead of weight computation
//!
//! Vertex weights themselves come from an external weighting algorithm
//! (Douglas-Peucker distance, Visvalingam area, ...) plugged in through the
//! [`ArcWeighting`] trait.

pub mod dispatch;
pub mod sphere;
pub mod thin;
pub mod threshold;

pub use dispatch::*;
pub use sphere::*;
pub use thin::*;
pub use threshold::*;

use mapthin_core::{Result, VertexWeights};

/// Compute per-vertex removal weights for one arc
///
/// Implementations score every vertex of an arc; a higher weight means the
/// vertex matters more and is removed later. By convention the two endpoint
/// weights are `f64::INFINITY`.
pub trait ArcWeighting {
    /// Weight an arc given its planar x/y coordinates.
    fn weigh(&self, xx: &[f64], yy: &[f64]) -> Result<VertexWeights>;

    /// Weight an arc given 3-D coordinates on a sphere.
    ///
    /// The coordinate buffers are reusable scratch space and may be longer
    /// than the arc; `len` gives the actual vertex count. The returned
    /// weights must have exactly `len` entries.
    fn weigh_spherical(
        &self,
        xx: &[f64],
        yy: &[f64],
        zz: &[f64],
        len: usize,
    ) -> Result<VertexWeights>;
}
