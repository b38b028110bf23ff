use crate::check::classify::SurfaceClass;
use crate::check::issue::{Issue, IssueKind};
use crate::error::Result;
use crate::math::is_close;
use crate::topology::FaceId;

use super::{Analysis, Claims, Detector};

/// Reports counterbores: a horizontal plane bordered by two concave vertical
/// cylinders on one axis with different radii and different tops. Claims
/// the plane, which is the bore's floor rather than an extra layer.
pub struct Counterbore;

impl Detector for Counterbore {
    fn name(&self) -> &'static str {
        "counter-bore"
    }

    fn detect(&self, ctx: &Analysis<'_>, mut claims: Claims) -> Result<(Vec<Issue>, Claims)> {
        let mut issues = Vec::new();
        for plane in ctx.classes.faces_of(SurfaceClass::HorizontalPlane) {
            let mut bores: Vec<FaceId> = Vec::new();
            for &face in ctx.graph.neighbors(plane) {
                if ctx.is_concave_of(face, SurfaceClass::VerticalCylinder)? {
                    bores.push(face);
                }
            }

            for (i, &c1) in bores.iter().enumerate() {
                for &c2 in &bores[i + 1..] {
                    let (Some(cyl1), Some(cyl2)) = (ctx.cylinder(c1)?, ctx.cylinder(c2)?) else {
                        continue;
                    };
                    if is_close(cyl1.radius(), cyl2.radius()) {
                        continue;
                    }
                    let top1 = ctx.shape.face_bounds(c1)?.max.z;
                    let top2 = ctx.shape.face_bounds(c2)?.max.z;
                    if is_close(top1, top2) || !ctx.coaxial(c1, c2)? {
                        continue;
                    }
                    issues.push(ctx.issue(IssueKind::CounterBore, &[c1, c2, plane])?);
                    claims.planes.insert(plane);
                }
            }
        }
        Ok((issues, claims))
    }
}
