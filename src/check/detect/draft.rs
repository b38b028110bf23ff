use crate::check::classify::SurfaceClass;
use crate::check::issue::{Issue, IssueKind};
use crate::error::Result;
use crate::math::is_close;

use super::{Analysis, Claims, Detector};

/// Reports slanted faces: angled planes and vertical cones not already
/// explained as countersinks.
///
/// A face spanning the whole thickness is a draft, anything shorter a
/// chamfer. Each kind is reported at most once.
pub struct DraftChamfer;

impl Detector for DraftChamfer {
    fn name(&self) -> &'static str {
        "draft"
    }

    fn detect(&self, ctx: &Analysis<'_>, claims: Claims) -> Result<(Vec<Issue>, Claims)> {
        let bounds = ctx.shape.bounds();
        let slanted = ctx.classes.faces_of(SurfaceClass::AngledPlane).chain(
            ctx.classes
                .faces_of(SurfaceClass::VerticalCone)
                .filter(|f| !claims.cones.contains(f)),
        );

        let mut issues = Vec::new();
        let (mut draft, mut chamfer) = (false, false);
        for face in slanted {
            let span = ctx.shape.face_bounds(face)?;
            let full_depth =
                is_close(span.min.z, bounds.min.z) && is_close(span.max.z, bounds.max.z);
            if full_depth && !draft {
                issues.push(Issue::global(IssueKind::Draft));
                draft = true;
            } else if !full_depth && !chamfer {
                issues.push(Issue::global(IssueKind::Chamfer));
                chamfer = true;
            }
        }
        Ok((issues, claims))
    }
}
