use std::collections::BTreeSet;

use crate::check::classify::SurfaceClass;
use crate::check::issue::{Issue, IssueKind};
use crate::error::Result;
use crate::math::angle_between;
use crate::topology::FaceId;

use super::{Analysis, Claims, Detector, CORNER_ANGLE_THRESHOLD};

/// Reports concave vertical cylinders narrower than half the kerf.
///
/// A cylinder bordered only by the top and bottom (and other round faces)
/// is an undersized hole. Otherwise it is an undersized fillet between the
/// remaining faces: those faces become a corner group, and the fillet is
/// reported as a tight corner by how far its normal turns across it.
pub struct SmallRadius;

impl Detector for SmallRadius {
    fn name(&self) -> &'static str {
        "small-radius"
    }

    fn detect(&self, ctx: &Analysis<'_>, mut claims: Claims) -> Result<(Vec<Issue>, Claims)> {
        let min_radius = ctx.kerf_width / 2.0;
        let mut issues = Vec::new();
        for face in ctx.classes.faces_of(SurfaceClass::VerticalCylinder) {
            let Some(cylinder) = ctx.cylinder(face)? else {
                continue;
            };
            if cylinder.radius() >= min_radius || !ctx.concavity.is_concave(face)? {
                continue;
            }

            let group: BTreeSet<FaceId> = ctx
                .graph
                .neighbors(face)
                .iter()
                .copied()
                .filter(|&f| {
                    ctx.classes.class(f).is_some_and(|c| {
                        c != SurfaceClass::HorizontalPlane && !c.is_cylinder() && !c.is_cone()
                    })
                })
                .collect();

            if group.is_empty() {
                issues.push(ctx.issue(IssueKind::SmallHole, &[face])?);
                continue;
            }

            let data = ctx.shape.face(face)?;
            let v = data.domain.v_mid();
            let start = data.normal_at(data.domain.u_min, v)?;
            let end = data.normal_at(data.domain.u_max, v)?;
            let kind = if angle_between(&start, &end) > CORNER_ANGLE_THRESHOLD {
                IssueKind::TightCorner
            } else {
                IssueKind::TightCornerMild
            };
            claims.corner_groups.push(group);
            issues.push(ctx.issue(kind, &[face])?);
        }
        Ok((issues, claims))
    }
}
