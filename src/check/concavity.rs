use std::cell::RefCell;

use slotmap::SecondaryMap;

use crate::error::Result;
use crate::topology::{FaceId, Shape};

/// Lazily decides whether cylindrical and conical faces are concave.
///
/// A face is concave when its outward normal points toward its axis, as
/// for a hole or an inside fillet. The verdict is read at the face's low
/// parameter corner `(u1, v1)` and cached for the lifetime of the oracle.
/// Faces without an axis are never concave.
#[derive(Debug)]
pub struct ConcavityOracle<'a> {
    shape: &'a Shape,
    cache: RefCell<SecondaryMap<FaceId, bool>>,
}

impl<'a> ConcavityOracle<'a> {
    /// Creates an oracle with an empty cache.
    #[must_use]
    pub fn new(shape: &'a Shape) -> Self {
        Self {
            shape,
            cache: RefCell::new(SecondaryMap::new()),
        }
    }

    /// Returns `true` if the face curves around material-free space.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is unknown or its normal is degenerate
    /// at the sample point.
    pub fn is_concave(&self, face: FaceId) -> Result<bool> {
        if let Some(&cached) = self.cache.borrow().get(face) {
            return Ok(cached);
        }

        let data = self.shape.face(face)?;
        let concave = match data.surface.axis() {
            Some((axis, center)) => {
                let (u, v) = (data.domain.u_min, data.domain.v_min);
                let point = data.value_at(u, v)?;
                let normal = data.normal_at(u, v)?;
                let offset = point - center;
                let radial = offset - axis * offset.dot(axis);
                radial.dot(&normal) < 0.0
            }
            None => false,
        };

        self.cache.borrow_mut().insert(face, concave);
        Ok(concave)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use crate::operations::creation::{Hole, MakePlate};

    #[test]
    fn hole_is_concave() {
        let shape = MakePlate::rectangle(20.0, 20.0, 3.0)
            .hole(Hole::Through {
                center: Point2::new(10.0, 10.0),
                radius: 2.0,
            })
            .execute()
            .unwrap();
        let oracle = ConcavityOracle::new(&shape);
        let hole = shape.face_id(6).unwrap();
        assert!(oracle.is_concave(hole).unwrap());
        // Second call is served from the cache.
        assert!(oracle.is_concave(hole).unwrap());
        let wall = shape.face_id(2).unwrap();
        assert!(!oracle.is_concave(wall).unwrap());
    }

    #[test]
    fn rounded_outer_corner_is_convex() {
        let shape = MakePlate::new(Point2::origin(), 2.0)
            .line_to(Point2::new(8.0, 0.0))
            .arc_to(Point2::new(10.0, 2.0), Point2::new(8.0, 2.0))
            .line_to(Point2::new(10.0, 10.0))
            .line_to(Point2::new(0.0, 10.0))
            .execute()
            .unwrap();
        let oracle = ConcavityOracle::new(&shape);
        assert!(!oracle.is_concave(shape.face_id(3).unwrap()).unwrap());
    }

    #[test]
    fn narrow_countersink_cone_is_concave() {
        let shape = MakePlate::rectangle(30.0, 30.0, 10.0)
            .hole(Hole::Countersink {
                center: Point2::new(15.0, 15.0),
                radius: 0.5,
                sink_radius: 1.0,
                sink_depth: 8.0,
            })
            .execute()
            .unwrap();
        let oracle = ConcavityOracle::new(&shape);
        assert!(oracle.is_concave(shape.face_id(7).unwrap()).unwrap());
    }

    #[test]
    fn apex_centered_cone_is_concave() {
        use crate::geometry::surface::{Cone, SurfaceDomain};
        use crate::math::{Point3, Vector3};
        use crate::topology::{FaceData, FaceSurface, ShapeBuilder};
        use std::f64::consts::{FRAC_PI_4, TAU};

        let cone = Cone::new(Point3::origin(), 0.0, Vector3::z(), FRAC_PI_4, Vector3::x()).unwrap();
        let mut builder = ShapeBuilder::new();
        let id = builder.add_face(
            FaceData::new(
                FaceSurface::Cone(cone),
                SurfaceDomain::new(0.0, TAU, 1.0, 2.0),
                vec![],
            )
            .reversed(),
        );
        let shape = builder.build().unwrap();
        assert!(ConcavityOracle::new(&shape).is_concave(id).unwrap());
    }
}
