use crate::error::{LoadError, Result};
use crate::topology::Shape;

use super::ShapeDocument;

/// Serializes a shape to a pretty-printed JSON document.
///
/// Faces and edges keep their shape order, so face indices survive a
/// save and reload.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn save_shape(shape: &Shape) -> Result<String> {
    let doc = ShapeDocument::from_shape(shape);
    Ok(serde_json::to_string_pretty(&doc).map_err(LoadError::Serialize)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::io::parse_shape;
    use crate::math::Point2;
    use crate::operations::creation::{Hole, MakePlate};
    use crate::topology::FaceSurface;
    use approx::assert_relative_eq;

    #[test]
    fn reload_keeps_face_order_and_orientation() {
        let shape = MakePlate::rectangle(20.0, 20.0, 3.0)
            .hole(Hole::Countersink {
                center: Point2::new(10.0, 10.0),
                radius: 2.0,
                sink_radius: 3.0,
                sink_depth: 1.0,
            })
            .execute()
            .unwrap();
        let json = save_shape(&shape).unwrap();
        assert!(json.contains("\"format\": \"kerfcheck-shape\""));

        let reloaded = parse_shape(&json).unwrap();
        assert_eq!(reloaded.face_count(), shape.face_count());
        assert_eq!(reloaded.edge_count(), shape.edge_count());
        for ((_, a), (_, b)) in shape.faces().zip(reloaded.faces()) {
            assert_eq!(a.same_sense, b.same_sense);
            assert_eq!(a.edges.len(), b.edges.len());
            assert_relative_eq!(a.domain.u_max, b.domain.u_max, epsilon = 1e-12);
            assert_relative_eq!(a.domain.v_max, b.domain.v_max, epsilon = 1e-12);
        }
        let (_, cone) = reloaded.faces().nth(7).unwrap();
        assert!(matches!(cone.surface, FaceSurface::Cone(_)));
        assert_relative_eq!(reloaded.thickness(), 3.0, epsilon = 1e-12);
    }
}
