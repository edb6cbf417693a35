//! Spherical projection of geographic coordinates
//!
//! Converts lng/lat degree coordinates into 3-D Cartesian coordinates on a
//! sphere of radius [`EARTH_RADIUS_M`], so vertex weighting runs over true
//! 3-D geometry instead of a distorted longitude/latitude grid.

/// Radius of the spherical Earth datum, in meters. A perfect sphere, not an
/// ellipsoid.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Project parallel lng/lat sequences (degrees) onto the sphere.
///
/// Writes into the caller-owned `x`/`y`/`z` buffers, which must be at least
/// as long as the input. Entries past the input length are left untouched,
/// so oversized scratch buffers can be reused across arcs. Total for any
/// finite input; the poles map to `(0, 0, ±r)`.
pub fn lnglat_to_sphere(lng: &[f64], lat: &[f64], x: &mut [f64], y: &mut [f64], z: &mut [f64]) {
    let deg2rad = std::f64::consts::PI / 180.0;
    let r = EARTH_RADIUS_M;
    for i in 0..lng.len() {
        let theta = lng[i] * deg2rad;
        let phi = lat[i] * deg2rad;
        let cos_phi = phi.cos();
        x[i] = theta.cos() * cos_phi * r;
        y[i] = theta.sin() * cos_phi * r;
        z[i] = phi.sin() * r;
    }
}

/// Reusable x/y/z scratch buffers for spherical projection.
///
/// Grows all three buffers together to 1.2x the needed length, so a pass
/// over many arcs reallocates only when it meets a longer arc than any seen
/// before. Each concurrent projection pass needs its own pool.
#[derive(Debug, Default)]
pub struct SphereBuffers {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl SphereBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project one arc into the pool, growing it if needed. Returns the
    /// projected x/y/z slices; each is `capacity()` long, so only the first
    /// `lng.len()` entries belong to this arc.
    pub fn project(&mut self, lng: &[f64], lat: &[f64]) -> (&[f64], &[f64], &[f64]) {
        self.ensure_capacity(lng.len());
        lnglat_to_sphere(lng, lat, &mut self.x, &mut self.y, &mut self.z);
        (&self.x, &self.y, &self.z)
    }

    /// Current buffer length.
    pub fn capacity(&self) -> usize {
        self.x.len()
    }

    fn ensure_capacity(&mut self, len: usize) {
        if self.x.len() < len {
            let grown = (len as f64 * 1.2).ceil() as usize;
            self.x.resize(grown, 0.0);
            self.y.resize(grown, 0.0);
            self.z.resize(grown, 0.0);
        }
    }
}
