use tracing::trace;

use crate::check::classify::SurfaceClass;
use crate::check::issue::{Issue, IssueKind};
use crate::error::Result;
use crate::math::TOLERANCE;
use crate::operations::query::FaceDistance;
use crate::topology::FaceId;

use super::{normal_near, Analysis, Claims, Detector};

/// Reports gaps narrower than the kerf between two walls facing each other
/// across empty space.
///
/// Adjacent faces and faces that meet at one undersized fillet are skipped.
/// A close pair is only a cut when both outward normals point across the
/// gap; otherwise the material between them is a thin web or the faces
/// touch.
pub struct SmallCut;

impl Detector for SmallCut {
    fn name(&self) -> &'static str {
        "small-cut"
    }

    fn detect(&self, ctx: &Analysis<'_>, claims: Claims) -> Result<(Vec<Issue>, Claims)> {
        let kerf = ctx.kerf_width;
        let faces: Vec<FaceId> = ctx
            .shape
            .faces()
            .map(|(id, _)| id)
            .filter(|&id| !ctx.classes.is(id, SurfaceClass::HorizontalPlane))
            .collect();

        let mut issues = Vec::new();
        for (i, &a) in faces.iter().enumerate() {
            let reach_a = ctx.shape.face_bounds(a)?.enlarged(kerf / 2.0);
            for &b in &faces[i + 1..] {
                if ctx.graph.are_adjacent(a, b) || claims.share_corner_group(a, b) {
                    continue;
                }
                let reach_b = ctx.shape.face_bounds(b)?.enlarged(kerf / 2.0);
                if !reach_a.intersects(&reach_b) {
                    continue;
                }

                let pair = FaceDistance::new(a, b).execute(ctx.shape.store())?;
                if pair.distance > kerf || pair.distance < TOLERANCE {
                    continue;
                }
                let across = (pair.point_b - pair.point_a) / pair.distance;
                let na = normal_near(ctx.shape.face(a)?, &pair.point_a)?;
                let nb = normal_near(ctx.shape.face(b)?, &pair.point_b)?;
                let opposed = na.dot(&across) > TOLERANCE && nb.dot(&-across) > TOLERANCE;
                trace!(distance = pair.distance, opposed, "Close face pair");
                if opposed {
                    issues.push(ctx.issue(IssueKind::SmallCut, &[a, b])?);
                }
            }
        }
        Ok((issues, claims))
    }
}
