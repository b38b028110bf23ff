use crate::error::Result;
use crate::geometry::surface::{
    Cone, Cylinder, Extrusion, Plane, Sphere, Surface, SurfaceDomain, Torus,
};
use crate::math::{Point3, Vector3};

use super::edge::EdgeId;

slotmap::new_key_type! {
    /// Unique identifier for a face in the topology store.
    pub struct FaceId;
}

/// The geometric surface associated with a face.
#[derive(Debug, Clone)]
pub enum FaceSurface {
    /// A planar surface.
    Plane(Plane),
    /// A cylindrical surface.
    Cylinder(Cylinder),
    /// A conical surface.
    Cone(Cone),
    /// A spherical surface.
    Sphere(Sphere),
    /// A toroidal surface.
    Torus(Torus),
    /// A free-form surface.
    Other(Extrusion),
}

impl FaceSurface {
    /// Returns the surface behind the variant.
    #[must_use]
    pub fn as_surface(&self) -> &dyn Surface {
        match self {
            Self::Plane(s) => s,
            Self::Cylinder(s) => s,
            Self::Cone(s) => s,
            Self::Sphere(s) => s,
            Self::Torus(s) => s,
            Self::Other(s) => s,
        }
    }

    /// Axis direction and a point on the axis, for cylinders and cones.
    #[must_use]
    pub fn axis(&self) -> Option<(&Vector3, &Point3)> {
        match self {
            Self::Cylinder(c) => Some((c.axis(), c.center())),
            Self::Cone(c) => Some((c.axis(), c.center())),
            Self::Plane(_) | Self::Sphere(_) | Self::Torus(_) | Self::Other(_) => None,
        }
    }
}

/// Data associated with a topological face.
///
/// A face is the part of its surface inside a rectangular parameter range,
/// bounded by its edges.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// The geometric surface on which this face lies.
    pub surface: FaceSurface,
    /// The parameter range `(u1, u2, v1, v2)` covered by the face.
    pub domain: SurfaceDomain,
    /// Edges bounding the face. A seam edge may appear twice.
    pub edges: Vec<EdgeId>,
    /// If `true`, the face normal agrees with the surface normal.
    pub same_sense: bool,
}

impl FaceData {
    /// Creates a face whose outward normal agrees with the surface normal.
    #[must_use]
    pub fn new(surface: FaceSurface, domain: SurfaceDomain, edges: Vec<EdgeId>) -> Self {
        Self {
            surface,
            domain,
            edges,
            same_sense: true,
        }
    }

    /// Flips the face orientation.
    #[must_use]
    pub fn reversed(mut self) -> Self {
        self.same_sense = !self.same_sense;
        self
    }

    /// Evaluates the face's surface at `(u, v)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be evaluated.
    pub fn value_at(&self, u: f64, v: f64) -> Result<Point3> {
        self.surface.as_surface().evaluate(u, v)
    }

    /// Outward unit normal of the face at `(u, v)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface normal is degenerate at `(u, v)`.
    pub fn normal_at(&self, u: f64, v: f64) -> Result<Vector3> {
        let n = self.surface.as_surface().normal(u, v)?;
        Ok(if self.same_sense { n } else { -n })
    }

    /// Parameters of the surface point nearest `point`, with a periodic `u`
    /// wrapped to start at the face's `u1`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot invert the point.
    pub fn parameter(&self, point: &Point3) -> Result<(f64, f64)> {
        let surface = self.surface.as_surface();
        let (u, v) = surface.inverse(point)?;
        Ok(match surface.u_period() {
            Some(period) => (self.domain.wrap_u(u, period), v),
            None => (u, v),
        })
    }

    /// Returns `true` if `point` projects inside the face's parameter range.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot invert the point.
    pub fn contains_projection(&self, point: &Point3) -> Result<bool> {
        let (u, v) = self.parameter(point)?;
        Ok(self.domain.contains(u, v))
    }

    /// Clamps `(u, v)` into the face's parameter range.
    #[must_use]
    pub fn clamp_parameter(&self, u: f64, v: f64) -> (f64, f64) {
        self.domain.clamp(u, v, self.surface.as_surface().u_period())
    }
}
