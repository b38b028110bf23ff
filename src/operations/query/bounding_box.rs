use crate::error::Result;
use crate::math::Point3;
use crate::topology::{FaceId, FaceSurface, TopologyStore};

/// Grid divisions per parameter direction when bounding curved faces.
///
/// A multiple of 4, so full turns of a revolved surface hit its quadrant
/// extremes exactly.
const BOUND_SAMPLES: usize = 24;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// An empty box that any point will grow.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Grows the box to contain `point`.
    pub fn include(&mut self, point: &Point3) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// The box grown by `margin` on every side.
    #[must_use]
    pub fn enlarged(&self, margin: f64) -> Self {
        Self {
            min: self.min.map(|c| c - margin),
            max: self.max.map(|c| c + margin),
        }
    }

    /// Returns `true` if the boxes overlap or touch.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        (0..3).all(|i| self.min[i] <= other.max[i] && other.min[i] <= self.max[i])
    }

    /// Extent along the layering (Z) axis.
    #[must_use]
    pub fn z_length(&self) -> f64 {
        self.max.z - self.min.z
    }
}

/// Computes the axis-aligned bounding box of a face.
///
/// Planar faces are bounded by their parameter corners; other faces are
/// sampled on a grid that includes the parameter bounds.
pub struct BoundingBox {
    face: FaceId,
}

impl BoundingBox {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(face: FaceId) -> Self {
        Self { face }
    }

    /// Executes the query, returning the AABB.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not found or cannot be evaluated.
    pub fn execute(&self, store: &TopologyStore) -> Result<Aabb> {
        let face = store.face(self.face)?;
        let d = face.domain;
        let mut aabb = Aabb::empty();
        if let FaceSurface::Plane(_) = face.surface {
            for (u, v) in [
                (d.u_min, d.v_min),
                (d.u_max, d.v_min),
                (d.u_min, d.v_max),
                (d.u_max, d.v_max),
            ] {
                aabb.include(&face.value_at(u, v)?);
            }
            return Ok(aabb);
        }
        for a in 0..=BOUND_SAMPLES {
            for b in 0..=BOUND_SAMPLES {
                let (u, v) = d.sample(a, b, BOUND_SAMPLES);
                aabb.include(&face.value_at(u, v)?);
            }
        }
        Ok(aabb)
    }
}
