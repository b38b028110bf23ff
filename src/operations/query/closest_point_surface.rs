use crate::error::Result;
use crate::math::Point3;
use crate::topology::{FaceData, FaceId, TopologyStore};

/// Result of a closest-point-on-face query.
#[derive(Debug, Clone, Copy)]
pub struct SurfacePoint {
    /// U parameter on the surface.
    pub u: f64,
    /// V parameter on the surface.
    pub v: f64,
    /// 3D point on the face.
    pub point: Point3,
    /// Distance from the query point to the face point.
    pub distance: f64,
}

/// Finds the point of a bounded face nearest a query point.
///
/// The query point is inverted onto the face's surface, the parameters are
/// clamped into the face's parameter range, and the surface is evaluated
/// there. This is exact for planar faces and for points whose surface foot
/// already lies inside the face.
pub struct ClosestPointOnFace {
    face: FaceId,
    query: Point3,
}

impl ClosestPointOnFace {
    /// Creates a new query.
    #[must_use]
    pub fn new(face: FaceId, query: Point3) -> Self {
        Self { face, query }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not found or its surface cannot
    /// invert or evaluate the point.
    pub fn execute(&self, store: &TopologyStore) -> Result<SurfacePoint> {
        closest_on_face(store.face(self.face)?, &self.query)
    }
}

pub(super) fn closest_on_face(face: &FaceData, query: &Point3) -> Result<SurfacePoint> {
    let (u, v) = face.surface.as_surface().inverse(query)?;
    let (u, v) = face.clamp_parameter(u, v);
    let point = face.value_at(u, v)?;
    Ok(SurfacePoint {
        u,
        v,
        point,
        distance: (query - point).norm(),
    })
}
