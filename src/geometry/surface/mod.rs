mod cone;
mod cylinder;
mod extrusion;
mod plane;
mod sphere;
mod torus;

pub use cone::Cone;
pub use cylinder::Cylinder;
pub use extrusion::Extrusion;
pub use plane::Plane;
pub use sphere::Sphere;
pub use torus::Torus;

use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// Parameter domain for a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDomain {
    /// Start of the U parameter range.
    pub u_min: f64,
    /// End of the U parameter range.
    pub u_max: f64,
    /// Start of the V parameter range.
    pub v_min: f64,
    /// End of the V parameter range.
    pub v_max: f64,
}

impl SurfaceDomain {
    /// Creates a new surface domain.
    #[must_use]
    pub fn new(u_min: f64, u_max: f64, v_min: f64, v_max: f64) -> Self {
        Self {
            u_min,
            u_max,
            v_min,
            v_max,
        }
    }

    /// Returns `true` if both ranges run from low to high. NaN bounds fail.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.u_min <= self.u_max && self.v_min <= self.v_max
    }

    /// Returns `true` if `(u, v)` lies inside the domain, bounds included.
    #[must_use]
    pub fn contains(&self, u: f64, v: f64) -> bool {
        (self.u_min..=self.u_max).contains(&u) && (self.v_min..=self.v_max).contains(&v)
    }

    /// Midpoint of the V range.
    #[must_use]
    pub fn v_mid(&self) -> f64 {
        0.5 * (self.v_min + self.v_max)
    }

    /// Parameter at fraction `a / n` of the U range, and likewise for V.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn sample(&self, a: usize, b: usize, n: usize) -> (f64, f64) {
        let n = n as f64;
        (
            (self.u_max - self.u_min) * a as f64 / n + self.u_min,
            (self.v_max - self.v_min) * b as f64 / n + self.v_min,
        )
    }

    /// Moves a periodic `u` into `[u_min, u_min + period)`.
    #[must_use]
    pub fn wrap_u(&self, u: f64, period: f64) -> f64 {
        self.u_min + (u - self.u_min).rem_euclid(period)
    }

    /// Clamps `(u, v)` into the domain.
    ///
    /// With a period, a `u` outside the range snaps to whichever bound is
    /// angularly closer.
    #[must_use]
    pub fn clamp(&self, u: f64, v: f64, period: Option<f64>) -> (f64, f64) {
        let v = v.clamp(self.v_min, self.v_max);
        let u = match period {
            Some(period) => {
                let u = self.wrap_u(u, period);
                if u <= self.u_max {
                    u
                } else {
                    let past_max = u - self.u_max;
                    let before_min = self.u_min + period - u;
                    if past_max <= before_min {
                        self.u_max
                    } else {
                        self.u_min
                    }
                }
            }
            None => u.clamp(self.u_min, self.u_max),
        };
        (u, v)
    }
}

/// Trait for parametric surfaces in 3D space.
pub trait Surface {
    /// Evaluates the surface at parameters `(u, v)`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3>;

    /// Computes the unit surface normal at parameters `(u, v)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal is degenerate at `(u, v)`.
    fn normal(&self, u: f64, v: f64) -> Result<Vector3>;

    /// Computes the `(u, v)` parameters of the surface point nearest `point`.
    ///
    /// # Errors
    ///
    /// Returns an error if the inversion fails.
    fn inverse(&self, point: &Point3) -> Result<(f64, f64)>;

    /// Returns the natural parameter domain of the surface.
    fn domain(&self) -> SurfaceDomain;

    /// Period of the U parameter, if the surface is closed in U.
    fn u_period(&self) -> Option<f64> {
        None
    }
}

/// Period shared by all surfaces of revolution.
pub(crate) const FULL_TURN: f64 = TAU;

/// Normalizes `axis` and `ref_dir`, requiring them to be perpendicular.
pub(crate) fn orthonormal_frame(axis: Vector3, ref_dir: Vector3) -> Result<(Vector3, Vector3)> {
    let axis_len = axis.norm();
    let ref_len = ref_dir.norm();
    if axis_len < TOLERANCE || ref_len < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    let axis = axis / axis_len;
    let ref_dir = ref_dir / ref_len;
    if axis.dot(&ref_dir).abs() > TOLERANCE {
        return Err(GeometryError::Degenerate(
            "reference direction must be perpendicular to axis".into(),
        )
        .into());
    }
    Ok((axis, ref_dir))
}
