use slotmap::SecondaryMap;

use crate::math::{is_close, is_layer_aligned};
use crate::topology::{FaceId, FaceSurface, Shape};

/// What a face's surface means for flat layered cutting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceClass {
    /// A plane facing straight up or down: a top, bottom or step floor.
    HorizontalPlane,
    /// A plane tilted away from both horizontal and vertical.
    AngledPlane,
    /// A plane containing the layering axis: an ordinary cut wall.
    VerticalPlane,
    VerticalCylinder,
    OffAxisCylinder,
    VerticalCone,
    OffAxisCone,
    /// A sphere or torus. Never cuttable.
    Bad,
    /// A free-form surface, decided by sampling its normals.
    Leftover,
}

impl SurfaceClass {
    /// Classifies a single surface.
    #[must_use]
    pub fn of(surface: &FaceSurface) -> Self {
        match surface {
            FaceSurface::Plane(plane) => {
                let n = plane.plane_normal();
                if is_layer_aligned(n) {
                    Self::HorizontalPlane
                } else if is_close(n.z, 0.0) {
                    Self::VerticalPlane
                } else {
                    Self::AngledPlane
                }
            }
            FaceSurface::Cylinder(c) if is_layer_aligned(c.axis()) => Self::VerticalCylinder,
            FaceSurface::Cylinder(_) => Self::OffAxisCylinder,
            FaceSurface::Cone(c) if is_layer_aligned(c.axis()) => Self::VerticalCone,
            FaceSurface::Cone(_) => Self::OffAxisCone,
            FaceSurface::Sphere(_) | FaceSurface::Torus(_) => Self::Bad,
            FaceSurface::Other(_) => Self::Leftover,
        }
    }

    /// Returns `true` for cylinders of either orientation.
    #[must_use]
    pub fn is_cylinder(self) -> bool {
        matches!(self, Self::VerticalCylinder | Self::OffAxisCylinder)
    }

    /// Returns `true` for cones of either orientation.
    #[must_use]
    pub fn is_cone(self) -> bool {
        matches!(self, Self::VerticalCone | Self::OffAxisCone)
    }
}

/// The class of every face of a shape.
#[derive(Debug)]
pub struct Classification {
    order: Vec<(FaceId, SurfaceClass)>,
    classes: SecondaryMap<FaceId, SurfaceClass>,
}

impl Classification {
    /// Classifies every face of `shape`.
    #[must_use]
    pub fn of(shape: &Shape) -> Self {
        let order: Vec<(FaceId, SurfaceClass)> = shape
            .faces()
            .map(|(id, face)| (id, SurfaceClass::of(&face.surface)))
            .collect();
        let classes = order.iter().copied().collect();
        Self { order, classes }
    }

    /// Class of a face, if it belongs to the classified shape.
    #[must_use]
    pub fn class(&self, face: FaceId) -> Option<SurfaceClass> {
        self.classes.get(face).copied()
    }

    /// Returns `true` if `face` has class `class`.
    #[must_use]
    pub fn is(&self, face: FaceId, class: SurfaceClass) -> bool {
        self.class(face) == Some(class)
    }

    /// Faces of one class, in shape order.
    pub fn faces_of(&self, class: SurfaceClass) -> impl Iterator<Item = FaceId> + '_ {
        self.order
            .iter()
            .filter(move |(_, c)| *c == class)
            .map(|(id, _)| *id)
    }

    /// Number of faces of one class.
    #[must_use]
    pub fn count(&self, class: SurfaceClass) -> usize {
        self.faces_of(class).count()
    }
}
