use crate::error::Result;
use crate::math::Point3;
use crate::topology::{FaceData, FaceId, TopologyStore};

use super::closest_point_surface::closest_on_face;

/// Grid divisions per parameter direction used to seed the search.
const SEED_SAMPLES: usize = 12;

/// Maximum alternating-projection refinement steps.
const MAX_REFINE_STEPS: usize = 32;

/// Refinement stops once the distance improves by less than this.
const REFINE_TOLERANCE: f64 = 1e-12;

/// The closest pair of points between two faces.
#[derive(Debug, Clone, Copy)]
pub struct FacePair {
    /// Minimum distance found.
    pub distance: f64,
    /// Point on the first face.
    pub point_a: Point3,
    /// Point on the second face.
    pub point_b: Point3,
}

/// Computes the minimum distance between two bounded faces.
///
/// Both faces are sampled on a parameter grid that includes their bounds,
/// the nearest sample pair seeds the search, and the pair is then refined by
/// projecting alternately onto each face. Exact for parallel planar faces.
pub struct FaceDistance {
    a: FaceId,
    b: FaceId,
}

impl FaceDistance {
    /// Creates a new query between faces `a` and `b`.
    #[must_use]
    pub fn new(a: FaceId, b: FaceId) -> Self {
        Self { a, b }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if either face is not found or cannot be evaluated.
    pub fn execute(&self, store: &TopologyStore) -> Result<FacePair> {
        let face_a = store.face(self.a)?;
        let face_b = store.face(self.b)?;

        let samples_a = grid(face_a)?;
        let samples_b = grid(face_b)?;

        let mut best = FacePair {
            distance: f64::INFINITY,
            point_a: Point3::origin(),
            point_b: Point3::origin(),
        };
        for pa in &samples_a {
            for pb in &samples_b {
                let d = (pa - pb).norm();
                if d < best.distance {
                    best = FacePair {
                        distance: d,
                        point_a: *pa,
                        point_b: *pb,
                    };
                }
            }
        }

        for _ in 0..MAX_REFINE_STEPS {
            let on_b = closest_on_face(face_b, &best.point_a)?;
            let on_a = closest_on_face(face_a, &on_b.point)?;
            let d = (on_a.point - on_b.point).norm();
            if d >= best.distance - REFINE_TOLERANCE {
                if d < best.distance {
                    best = FacePair {
                        distance: d,
                        point_a: on_a.point,
                        point_b: on_b.point,
                    };
                }
                break;
            }
            best = FacePair {
                distance: d,
                point_a: on_a.point,
                point_b: on_b.point,
            };
        }

        Ok(best)
    }
}

fn grid(face: &FaceData) -> Result<Vec<Point3>> {
    let mut points = Vec::with_capacity((SEED_SAMPLES + 1) * (SEED_SAMPLES + 1));
    for a in 0..=SEED_SAMPLES {
        for b in 0..=SEED_SAMPLES {
            let (u, v) = face.domain.sample(a, b, SEED_SAMPLES);
            points.push(face.value_at(u, v)?);
        }
    }
    Ok(points)
}
