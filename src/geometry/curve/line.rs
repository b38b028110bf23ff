use crate::error::{GeometryError, Result};
use crate::math::{is_layer_aligned, Point3, Vector3, TOLERANCE};

use super::Curve;

/// An infinite line defined by an origin point and a direction vector.
///
/// The parametric form is: `P(t) = origin + t * direction`.
#[derive(Debug, Clone)]
pub struct Line {
    origin: Point3,
    direction: Vector3,
}

impl Line {
    /// Creates a new line from an origin and direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector is zero-length.
    pub fn new(origin: Point3, direction: Vector3) -> Result<Self> {
        let len = direction.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            origin,
            direction: direction / len,
        })
    }

    /// Creates the line through `start` and `end`, parameterized by arc length
    /// from `start`. Returns the line and the parameter of `end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide.
    pub fn through(start: Point3, end: Point3) -> Result<(Self, f64)> {
        let line = Self::new(start, end - start)?;
        Ok((line, (end - start).norm()))
    }

    /// Returns the origin point of the line.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit direction vector of the line.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }

    /// Returns `true` if the line runs along the layering axis.
    #[must_use]
    pub fn is_vertical(&self) -> bool {
        is_layer_aligned(&self.direction)
    }
}

impl Curve for Line {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        Ok(self.origin + self.direction * t)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn through_parameterizes_by_length() {
        let (line, t_end) = Line::through(Point3::new(1.0, 1.0, 0.0), Point3::new(1.0, 1.0, 4.0)).unwrap();
        assert!((t_end - 4.0).abs() < 1e-12);
        assert!((line.evaluate(t_end).unwrap() - Point3::new(1.0, 1.0, 4.0)).norm() < 1e-12);
        assert!(line.is_vertical());
    }

    #[test]
    fn slanted_line_is_not_vertical() {
        let line = Line::new(Point3::origin(), Vector3::new(0.1, 0.0, 1.0)).unwrap();
        assert!(!line.is_vertical());
    }

    #[test]
    fn coincident_points_fail() {
        assert!(Line::through(Point3::origin(), Point3::origin()).is_err());
    }
}
