//! Weighting dispatch over arc collections
//!
//! Runs an [`ArcWeighting`] implementation across every arc of a
//! collection, optionally projecting lng/lat coordinates onto the sphere
//! first so the weights reflect 3-D geometry.

use crate::sphere::SphereBuffers;
use crate::ArcWeighting;
use mapthin_core::{ArcCollection, Error, Result, VertexWeights};
use rayon::prelude::*;

/// Weighting dispatch configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplifyOptions {
    /// Project lng/lat arcs onto the sphere before weighting.
    pub spherical: bool,
}

fn check_weight_len(got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(Error::InvalidData(format!(
            "weighting returned {got} weights for an arc of {expected} vertices"
        )));
    }
    Ok(())
}

/// Compute per-arc vertex weights for a whole collection.
///
/// In planar mode each arc's x/y coordinates go straight to the weighting
/// implementation, in parallel. In spherical mode arcs are treated as
/// lng/lat degrees, projected through one scratch-buffer pool owned by this
/// call, and weighted sequentially; the pool's buffers may be longer than
/// the current arc, so the weighting receives the vertex count explicitly.
///
/// Results come back in input order, one weight array per arc.
pub fn simplify_arcs<W>(
    arcs: &ArcCollection,
    weighting: &W,
    opts: &SimplifyOptions,
) -> Result<Vec<VertexWeights>>
where
    W: ArcWeighting + Sync,
{
    if opts.spherical {
        let mut pool = SphereBuffers::new();
        let mut out = Vec::with_capacity(arcs.len());
        for arc in arcs {
            let len = arc.len();
            let (x, y, z) = pool.project(&arc.xx, &arc.yy);
            let uu = weighting.weigh_spherical(x, y, z, len)?;
            check_weight_len(uu.len(), len)?;
            out.push(uu);
        }
        Ok(out)
    } else {
        arcs.arcs
            .par_iter()
            .map(|arc| {
                let uu = weighting.weigh(&arc.xx, &arc.yy)?;
                check_weight_len(uu.len(), arc.len())?;
                Ok(uu)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::EARTH_RADIUS_M;
    use approx::assert_relative_eq;
    use mapthin_core::Arc;

    /// Echoes planar x-coords (or spherical z-coords) back as weights.
    struct CoordWeighting;

    impl ArcWeighting for CoordWeighting {
        fn weigh(&self, xx: &[f64], _yy: &[f64]) -> Result<VertexWeights> {
            Ok(xx.to_vec())
        }

        fn weigh_spherical(
            &self,
            _xx: &[f64],
            _yy: &[f64],
            zz: &[f64],
            len: usize,
        ) -> Result<VertexWeights> {
            Ok(zz[..len].to_vec())
        }
    }

    struct FailingWeighting;

    impl ArcWeighting for FailingWeighting {
        fn weigh(&self, _xx: &[f64], _yy: &[f64]) -> Result<VertexWeights> {
            Err(Error::InvalidData("weighting rejected the arc".to_string()))
        }

        fn weigh_spherical(
            &self,
            _xx: &[f64],
            _yy: &[f64],
            _zz: &[f64],
            _len: usize,
        ) -> Result<VertexWeights> {
            Err(Error::InvalidData("weighting rejected the arc".to_string()))
        }
    }

    struct ShortWeighting;

    impl ArcWeighting for ShortWeighting {
        fn weigh(&self, _xx: &[f64], _yy: &[f64]) -> Result<VertexWeights> {
            Ok(vec![1.0])
        }

        fn weigh_spherical(
            &self,
            _xx: &[f64],
            _yy: &[f64],
            _zz: &[f64],
            _len: usize,
        ) -> Result<VertexWeights> {
            Ok(vec![1.0])
        }
    }

    fn lnglat_arcs() -> ArcCollection {
        ArcCollection::from_arcs(vec![
            Arc::from_xy(
                vec![0.0, 10.0, 20.0, 30.0, 40.0],
                vec![90.0, 45.0, 0.0, -45.0, -90.0],
            ),
            Arc::from_xy(vec![0.0, 0.0, 0.0], vec![90.0, 0.0, -90.0]),
        ])
    }

    #[test]
    fn test_planar_dispatch_preserves_arc_order() {
        let arcs = ArcCollection::from_arcs(vec![
            Arc::from_xy(vec![0.0, 1.0, 2.0], vec![5.0, 6.0, 7.0]),
            Arc::from_xy(vec![9.0, 8.0], vec![1.0, 2.0]),
        ]);
        let weights = simplify_arcs(&arcs, &CoordWeighting, &SimplifyOptions::default()).unwrap();
        assert_eq!(weights, vec![vec![0.0, 1.0, 2.0], vec![9.0, 8.0]]);
    }

    #[test]
    fn test_spherical_dispatch_projects_before_weighting() {
        let arcs = ArcCollection::from_arcs(vec![Arc::from_xy(
            vec![0.0, 0.0, 0.0],
            vec![90.0, 0.0, -90.0],
        )]);
        let opts = SimplifyOptions { spherical: true };
        let weights = simplify_arcs(&arcs, &CoordWeighting, &opts).unwrap();

        assert_eq!(weights.len(), 1);
        let zz = &weights[0];
        assert_relative_eq!(zz[0], EARTH_RADIUS_M, max_relative = 1e-12);
        assert_relative_eq!(zz[1], 0.0, epsilon = 1e-9);
        assert_relative_eq!(zz[2], -EARTH_RADIUS_M, max_relative = 1e-12);
    }

    #[test]
    fn test_spherical_dispatch_passes_true_arc_length() {
        // The second arc is shorter than the scratch buffers grown for the
        // first; its weight array must still match its own vertex count
        let arcs = lnglat_arcs();
        let opts = SimplifyOptions { spherical: true };
        let weights = simplify_arcs(&arcs, &CoordWeighting, &opts).unwrap();

        assert_eq!(weights[0].len(), 5);
        assert_eq!(weights[1].len(), 3);
        assert_relative_eq!(weights[1][2], -EARTH_RADIUS_M, max_relative = 1e-12);
    }

    #[test]
    fn test_weighting_errors_propagate() {
        let arcs = lnglat_arcs();
        assert!(simplify_arcs(&arcs, &FailingWeighting, &SimplifyOptions::default()).is_err());
        let opts = SimplifyOptions { spherical: true };
        assert!(simplify_arcs(&arcs, &FailingWeighting, &opts).is_err());
    }

    #[test]
    fn test_wrong_weight_length_is_rejected() {
        let arcs = lnglat_arcs();
        assert!(simplify_arcs(&arcs, &ShortWeighting, &SimplifyOptions::default()).is_err());
        let opts = SimplifyOptions { spherical: true };
        assert!(simplify_arcs(&arcs, &ShortWeighting, &opts).is_err());
    }
}
