//! Arc types and related functionality

use serde::{Deserialize, Serialize};

/// Per-vertex importance weights for one arc, parallel to its coordinates.
///
/// Lower values mean the vertex is safer to remove. Endpoint weights are
/// conventionally `f64::INFINITY` so the endpoints never fall below a
/// removal interval.
pub type VertexWeights = Vec<f64>;

/// An ordered polyline stored as parallel coordinate sequences.
///
/// The first and last vertices are *endpoints*; every vertex in between is
/// an *interior point*. Thinning operations never remove endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub xx: Vec<f64>,
    pub yy: Vec<f64>,
}

impl Arc {
    /// Create an arc from parallel x and y coordinate sequences.
    pub fn from_xy(xx: Vec<f64>, yy: Vec<f64>) -> Self {
        debug_assert_eq!(xx.len(), yy.len());
        Self { xx, yy }
    }

    /// Number of vertices in the arc.
    pub fn len(&self) -> usize {
        self.xx.len()
    }

    /// Check if the arc has no vertices.
    pub fn is_empty(&self) -> bool {
        self.xx.is_empty()
    }

    /// Number of interior points (vertices excluding the two endpoints).
    pub fn interior_len(&self) -> usize {
        self.len().saturating_sub(2)
    }

    /// Whether the arc forms a closed ring (first vertex equals last vertex).
    pub fn is_closed(&self) -> bool {
        !self.is_empty()
            && self.xx.first() == self.xx.last()
            && self.yy.first() == self.yy.last()
    }

    /// First vertex of the arc, if any.
    pub fn first(&self) -> Option<(f64, f64)> {
        Some((*self.xx.first()?, *self.yy.first()?))
    }

    /// Last vertex of the arc, if any.
    pub fn last(&self) -> Option<(f64, f64)> {
        Some((*self.xx.last()?, *self.yy.last()?))
    }
}
