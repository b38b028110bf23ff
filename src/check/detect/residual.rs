use crate::check::classify::SurfaceClass;
use crate::check::issue::{Issue, IssueKind};
use crate::error::Result;

use super::{Analysis, Claims, Detector};

/// Reports horizontal planes left unexplained: after counterbore floors are
/// removed, a flat part has exactly a top and a bottom.
pub struct ResidualHorizontals;

impl Detector for ResidualHorizontals {
    fn name(&self) -> &'static str {
        "non-uniform"
    }

    fn detect(&self, ctx: &Analysis<'_>, claims: Claims) -> Result<(Vec<Issue>, Claims)> {
        let unexplained = ctx
            .classes
            .faces_of(SurfaceClass::HorizontalPlane)
            .filter(|f| !claims.planes.contains(f))
            .count();
        let issues = if unexplained == 2 {
            Vec::new()
        } else {
            vec![Issue::global(IssueKind::NonUniform)]
        };
        Ok((issues, claims))
    }
}
