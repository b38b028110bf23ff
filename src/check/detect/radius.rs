use crate::check::classify::SurfaceClass;
use crate::check::issue::{Issue, IssueKind};
use crate::error::Result;

use super::{Analysis, Claims, Detector};

/// Reports rounded edges that a cutter moving along the layering axis
/// cannot produce: any cylinder or cone with an off-axis axis.
pub struct OffAxisRadius;

impl Detector for OffAxisRadius {
    fn name(&self) -> &'static str {
        "radius"
    }

    fn detect(&self, ctx: &Analysis<'_>, claims: Claims) -> Result<(Vec<Issue>, Claims)> {
        let off_axis = ctx.classes.count(SurfaceClass::OffAxisCylinder)
            + ctx.classes.count(SurfaceClass::OffAxisCone);
        let issues = if off_axis > 0 {
            vec![Issue::global(IssueKind::Radius)]
        } else {
            Vec::new()
        };
        Ok((issues, claims))
    }
}
