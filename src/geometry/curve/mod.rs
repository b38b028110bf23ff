mod circle;
mod line;

pub use circle::Circle;
pub use line::Line;

use crate::error::Result;
use crate::math::Point3;

/// Trait for parametric curves in 3D space.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    fn evaluate(&self, t: f64) -> Result<Point3>;
}
