use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Surface, SurfaceDomain};

/// Coarse samples used to seed point inversion.
const INVERSE_SAMPLES: usize = 64;

/// Golden-section iterations used to refine point inversion.
const INVERSE_REFINE_STEPS: usize = 48;

/// A free-form surface: a Bezier profile swept along a straight direction.
///
/// `P(u, v) = B(u) + v * direction` with `u, v` in `[0, 1]`, where `B` is the
/// Bezier curve over the control points. The normal is
/// `B'(u) x direction`, normalized.
#[derive(Debug, Clone)]
pub struct Extrusion {
    control_points: Vec<Point3>,
    direction: Vector3,
}

impl Extrusion {
    /// Creates a new extrusion.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than two control points or the
    /// direction is zero-length.
    pub fn new(control_points: Vec<Point3>, direction: Vector3) -> Result<Self> {
        if control_points.len() < 2 {
            return Err(GeometryError::Degenerate(
                "extrusion profile needs at least two control points".into(),
            )
            .into());
        }
        if direction.norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            control_points,
            direction,
        })
    }

    /// Returns the profile control points.
    #[must_use]
    pub fn control_points(&self) -> &[Point3] {
        &self.control_points
    }

    /// Returns the sweep direction (its length is the sweep distance).
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }

    fn profile_point(&self, u: f64) -> Point3 {
        let mut pts: Vec<Vector3> = self.control_points.iter().map(|p| p.coords).collect();
        let n = pts.len();
        for level in 1..n {
            for i in 0..n - level {
                pts[i] = pts[i] * (1.0 - u) + pts[i + 1] * u;
            }
        }
        Point3::from(pts[0])
    }

    fn profile_tangent(&self, u: f64) -> Vector3 {
        let mut diffs: Vec<Vector3> = self
            .control_points
            .windows(2)
            .map(|w| w[1] - w[0])
            .collect();
        let n = diffs.len();
        for level in 1..n {
            for i in 0..n - level {
                diffs[i] = diffs[i] * (1.0 - u) + diffs[i + 1] * u;
            }
        }
        #[allow(clippy::cast_precision_loss)]
        let degree = n as f64;
        diffs[0] * degree
    }

    /// Squared distance from `point` to the sweep line through `B(u)`, and
    /// the `v` of its foot.
    fn line_residual(&self, u: f64, point: &Point3) -> (f64, f64) {
        let base = self.profile_point(u);
        let dp = point - base;
        let v = dp.dot(&self.direction) / self.direction.norm_squared();
        let foot = base + self.direction * v;
        ((point - foot).norm_squared(), v)
    }
}

impl Surface for Extrusion {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        Ok(self.profile_point(u) + self.direction * v)
    }

    fn normal(&self, u: f64, _v: f64) -> Result<Vector3> {
        let n = self.profile_tangent(u).cross(&self.direction);
        let len = n.norm();
        if len < TOLERANCE {
            return Err(GeometryError::Degenerate(
                "extrusion profile is parallel to the sweep direction".into(),
            )
            .into());
        }
        Ok(n / len)
    }

    fn inverse(&self, point: &Point3) -> Result<(f64, f64)> {
        #[allow(clippy::cast_precision_loss)]
        let step = 1.0 / INVERSE_SAMPLES as f64;
        #[allow(clippy::cast_precision_loss)]
        let seed = (0..=INVERSE_SAMPLES)
            .map(|i| i as f64 * step)
            .min_by(|&a, &b| {
                self.line_residual(a, point)
                    .0
                    .total_cmp(&self.line_residual(b, point).0)
            })
            .ok_or_else(|| GeometryError::Degenerate("empty inversion grid".into()))?;

        let ratio = 0.5 * (5.0_f64.sqrt() - 1.0);
        let (mut lo, mut hi) = ((seed - step).max(0.0), (seed + step).min(1.0));
        for _ in 0..INVERSE_REFINE_STEPS {
            let a = hi - ratio * (hi - lo);
            let b = lo + ratio * (hi - lo);
            if self.line_residual(a, point).0 <= self.line_residual(b, point).0 {
                hi = b;
            } else {
                lo = a;
            }
        }
        let u = 0.5 * (lo + hi);
        let (_, v) = self.line_residual(u, point);
        Ok((u, v))
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(0.0, 1.0, 0.0, 1.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn wavy_wall(direction: Vector3) -> Extrusion {
        Extrusion::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 2.0, 0.0),
                Point3::new(2.0, -2.0, 0.0),
                Point3::new(3.0, 0.0, 0.0),
            ],
            direction,
        )
        .unwrap()
    }

    #[test]
    fn endpoints_match_control_polygon() {
        let s = wavy_wall(Vector3::z() * 2.0);
        assert_relative_eq!(s.evaluate(0.0, 0.0).unwrap(), Point3::origin());
        assert_relative_eq!(s.evaluate(1.0, 1.0).unwrap(), Point3::new(3.0, 0.0, 2.0));
    }

    #[test]
    fn vertical_sweep_has_horizontal_normals() {
        let s = wavy_wall(Vector3::z() * 2.0);
        for i in 0..=10 {
            let n = s.normal(f64::from(i) / 10.0, 0.5).unwrap();
            assert!(n.z.abs() < 1e-15);
        }
    }

    #[test]
    fn tilted_sweep_has_vertical_component() {
        let s = wavy_wall(Vector3::new(0.0, 1.0, 2.0));
        let n = s.normal(0.5, 0.5).unwrap();
        assert!(n.z.abs() > 0.1);
    }

    #[test]
    fn inverse_roundtrip() {
        let s = wavy_wall(Vector3::z() * 2.0);
        let p = s.evaluate(0.37, 0.8).unwrap();
        let (u, v) = s.inverse(&p).unwrap();
        assert_relative_eq!(u, 0.37, epsilon = 1e-6);
        assert_relative_eq!(v, 0.8, epsilon = 1e-6);
    }

    #[test]
    fn single_control_point_fails() {
        assert!(Extrusion::new(vec![Point3::origin()], Vector3::z()).is_err());
    }
}
