mod counterbore;
mod countersink;
mod draft;
mod radius;
mod residual;
mod small_cut;
mod small_radius;
mod tight_corner;

use std::collections::BTreeSet;

use crate::error::Result;
use crate::geometry::surface::Cylinder;
use crate::math::{is_close, Point3, Vector3};
use crate::topology::{FaceData, FaceId, FaceSurface, Shape};

use super::adjacency::AdjacencyGraph;
use super::classify::{Classification, SurfaceClass};
use super::concavity::ConcavityOracle;
use super::issue::{Issue, IssueKind};

pub use counterbore::Counterbore;
pub use countersink::Countersink;
pub use draft::DraftChamfer;
pub use radius::OffAxisRadius;
pub use residual::ResidualHorizontals;
pub use small_cut::SmallCut;
pub use small_radius::SmallRadius;
pub use tight_corner::{TightCorners, CORNER_ANGLE_THRESHOLD, CORNER_PROBE_OFFSET, TANGENT_TOLERANCE};

/// Everything the detectors read, built once per check.
#[derive(Debug)]
pub struct Analysis<'a> {
    pub shape: &'a Shape,
    pub classes: &'a Classification,
    pub graph: &'a AdjacencyGraph,
    pub concavity: &'a ConcavityOracle<'a>,
    pub kerf_width: f64,
}

impl Analysis<'_> {
    /// An issue naming `faces` by their shape-order indices.
    ///
    /// # Errors
    ///
    /// Returns an error if a face is not part of the shape.
    pub fn issue(&self, kind: IssueKind, faces: &[FaceId]) -> Result<Issue> {
        let indices = faces
            .iter()
            .map(|&f| self.shape.face_index(f))
            .collect::<Result<Vec<usize>>>()?;
        Ok(Issue::on_faces(kind, indices))
    }

    /// Sorts faces into shape order.
    ///
    /// # Errors
    ///
    /// Returns an error if a face is not part of the shape.
    pub fn in_shape_order(&self, faces: &mut [FaceId]) -> Result<()> {
        let mut keyed = faces
            .iter()
            .map(|&f| Ok((self.shape.face_index(f)?, f)))
            .collect::<Result<Vec<(usize, FaceId)>>>()?;
        keyed.sort_unstable_by_key(|(index, _)| *index);
        for (slot, (_, f)) in faces.iter_mut().zip(keyed) {
            *slot = f;
        }
        Ok(())
    }

    /// The cylinder behind a face, if it is one.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not part of the shape.
    pub fn cylinder(&self, face: FaceId) -> Result<Option<&Cylinder>> {
        Ok(match &self.shape.face(face)?.surface {
            FaceSurface::Cylinder(c) => Some(c),
            _ => None,
        })
    }

    /// Returns `true` if the face is a vertical cylinder or cone curving
    /// around empty space.
    ///
    /// # Errors
    ///
    /// Returns an error if the concavity test fails.
    pub fn is_concave_of(&self, face: FaceId, class: SurfaceClass) -> Result<bool> {
        Ok(self.classes.is(face, class) && self.concavity.is_concave(face)?)
    }

    /// Returns `true` if both faces' axes pass through the same x, y.
    ///
    /// # Errors
    ///
    /// Returns an error if a face is not part of the shape.
    pub fn coaxial(&self, a: FaceId, b: FaceId) -> Result<bool> {
        let axis_a = self.shape.face(a)?.surface.axis();
        let axis_b = self.shape.face(b)?.surface.axis();
        Ok(match (axis_a, axis_b) {
            (Some((_, ca)), Some((_, cb))) => is_close(ca.x, cb.x) && is_close(ca.y, cb.y),
            _ => false,
        })
    }
}

/// Outward normal of `face` at the parameters nearest `point`.
///
/// # Errors
///
/// Returns an error if the surface cannot invert the point or its normal is
/// degenerate there.
pub fn normal_near(face: &FaceData, point: &Point3) -> Result<Vector3> {
    let (u, v) = face.parameter(point)?;
    let (u, v) = face.clamp_parameter(u, v);
    face.normal_at(u, v)
}

/// Faces taken by earlier detectors, local to one check.
#[derive(Debug, Clone, Default)]
pub struct Claims {
    /// Cones explained as countersinks.
    pub cones: BTreeSet<FaceId>,
    /// Horizontal planes explained as counterbore floors.
    pub planes: BTreeSet<FaceId>,
    /// Faces meeting at an undersized fillet, one set per fillet.
    pub corner_groups: Vec<BTreeSet<FaceId>>,
}

impl Claims {
    /// Returns `true` if one corner group holds both faces.
    #[must_use]
    pub fn share_corner_group(&self, a: FaceId, b: FaceId) -> bool {
        self.corner_groups
            .iter()
            .any(|group| group.contains(&a) && group.contains(&b))
    }
}

/// One pass of the pipeline.
///
/// A pass sees the shared [`Analysis`] and the claims made by the passes
/// before it, and returns its issues with the claims it adds.
pub trait Detector {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Runs the pass.
    ///
    /// # Errors
    ///
    /// Returns an error if a geometric query on the shape fails.
    fn detect(&self, ctx: &Analysis<'_>, claims: Claims) -> Result<(Vec<Issue>, Claims)>;
}

/// The detectors in execution order.
#[must_use]
pub fn pipeline() -> [&'static dyn Detector; 8] {
    [
        &OffAxisRadius,
        &TightCorners,
        &Countersink,
        &Counterbore,
        &SmallRadius,
        &SmallCut,
        &DraftChamfer,
        &ResidualHorizontals,
    ]
}
