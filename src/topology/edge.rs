use crate::error::Result;
use crate::geometry::curve::{Circle, Curve, Line};
use crate::math::Point3;

slotmap::new_key_type! {
    /// Unique identifier for an edge in the topology store.
    pub struct EdgeId;
}

/// The geometric curve associated with an edge.
#[derive(Debug, Clone)]
pub enum EdgeCurve {
    /// A line segment.
    Line(Line),
    /// A circular arc.
    Circle(Circle),
    /// Any other curve; only its endpoints are known.
    Other,
}

/// Data associated with a topological edge.
///
/// Edges are connectivity keys: two faces are adjacent when they list the
/// same [`EdgeId`].
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// The geometric curve defining this edge's shape.
    pub curve: EdgeCurve,
    /// Start point of the edge.
    pub start: Point3,
    /// End point of the edge.
    pub end: Point3,
    /// Parameter on the curve corresponding to the start point.
    pub t_start: f64,
    /// Parameter on the curve corresponding to the end point.
    pub t_end: f64,
}

impl EdgeData {
    /// Creates a straight edge between two points.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide.
    pub fn line(start: Point3, end: Point3) -> Result<Self> {
        let (line, t_end) = Line::through(start, end)?;
        Ok(Self {
            curve: EdgeCurve::Line(line),
            start,
            end,
            t_start: 0.0,
            t_end,
        })
    }

    /// Creates an arc edge over `[t_start, t_end]` of `circle`.
    ///
    /// # Errors
    ///
    /// Returns an error if the circle cannot be evaluated.
    pub fn arc(circle: Circle, t_start: f64, t_end: f64) -> Result<Self> {
        let start = circle.evaluate(t_start)?;
        let end = circle.evaluate(t_end)?;
        Ok(Self {
            curve: EdgeCurve::Circle(circle),
            start,
            end,
            t_start,
            t_end,
        })
    }

    /// Creates an edge of unknown curve type between two points.
    #[must_use]
    pub fn other(start: Point3, end: Point3) -> Self {
        Self {
            curve: EdgeCurve::Other,
            start,
            end,
            t_start: 0.0,
            t_end: 1.0,
        }
    }

    /// Returns the line if this edge is straight.
    #[must_use]
    pub fn as_line(&self) -> Option<&Line> {
        match &self.curve {
            EdgeCurve::Line(line) => Some(line),
            EdgeCurve::Circle(_) | EdgeCurve::Other => None,
        }
    }

    /// Point halfway along the edge's parameter interval.
    ///
    /// For curves of unknown type this is the chord midpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve cannot be evaluated.
    pub fn midpoint(&self) -> Result<Point3> {
        let t = 0.5 * (self.t_start + self.t_end);
        match &self.curve {
            EdgeCurve::Line(line) => line.evaluate(t),
            EdgeCurve::Circle(circle) => circle.evaluate(t),
            EdgeCurve::Other => Ok(nalgebra::center(&self.start, &self.end)),
        }
    }
}
