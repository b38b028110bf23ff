use std::collections::BTreeSet;

use crate::check::classify::SurfaceClass;
use crate::check::issue::{Issue, IssueKind};
use crate::error::Result;

use super::{Analysis, Claims, Detector};

/// Reports countersinks: a concave vertical cone meeting a concave vertical
/// cylinder on the same axis. Claims the cone so later passes leave it alone.
pub struct Countersink;

impl Detector for Countersink {
    fn name(&self) -> &'static str {
        "counter-sink"
    }

    fn detect(&self, ctx: &Analysis<'_>, mut claims: Claims) -> Result<(Vec<Issue>, Claims)> {
        let mut issues = Vec::new();
        let mut reported = BTreeSet::new();
        for (edge_id, _) in ctx.shape.edges() {
            let Some((a, b)) = ctx.graph.edge_pair(edge_id) else {
                continue;
            };
            let (cone, cylinder) = if ctx.classes.is(a, SurfaceClass::VerticalCone) {
                (a, b)
            } else {
                (b, a)
            };
            if !ctx.is_concave_of(cone, SurfaceClass::VerticalCone)?
                || !ctx.is_concave_of(cylinder, SurfaceClass::VerticalCylinder)?
                || !ctx.coaxial(cone, cylinder)?
            {
                continue;
            }
            if !reported.insert((cone, cylinder)) {
                continue;
            }

            let mut pair = [cone, cylinder];
            ctx.in_shape_order(&mut pair)?;
            issues.push(ctx.issue(IssueKind::CounterSink, &pair)?);
            claims.cones.insert(cone);
        }
        Ok((issues, claims))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::check::fixtures::{self, run_detector};
    use crate::io::ShapeDocument;
    use crate::math::Point2;
    use crate::operations::creation::Hole;
    use crate::topology::Shape;

    fn countersunk() -> Shape {
        fixtures::plate_with_hole(Hole::Countersink {
            center: Point2::new(10.0, 10.0),
            radius: 2.0,
            sink_radius: 3.0,
            sink_depth: 1.0,
        })
    }

    #[test]
    fn pair_is_reported_once_and_cone_claimed() {
        let shape = countersunk();
        let (issues, claims) = run_detector(&shape, &Countersink, Claims::default());
        assert_eq!(issues, vec![Issue::on_faces(IssueKind::CounterSink, vec![6, 7])]);
        assert_eq!(claims.cones.len(), 1);
        assert!(claims.cones.contains(&shape.face_id(7).unwrap()));
    }

    #[test]
    fn cone_listed_before_cylinder_gives_same_pair() {
        let mut doc = ShapeDocument::from_shape(&countersunk());
        doc.faces.swap(6, 7);
        let swapped = doc.into_shape().unwrap();

        let (issues, claims) = run_detector(&swapped, &Countersink, Claims::default());
        assert_eq!(issues, vec![Issue::on_faces(IssueKind::CounterSink, vec![6, 7])]);
        assert!(claims.cones.contains(&swapped.face_id(6).unwrap()));
    }

    #[test]
    fn plain_hole_is_not_countersink() {
        let shape = fixtures::plate_with_hole(Hole::Through {
            center: Point2::new(10.0, 10.0),
            radius: 3.0,
        });
        let (issues, claims) = run_detector(&shape, &Countersink, Claims::default());
        assert!(issues.is_empty());
        assert!(claims.cones.is_empty());
    }
}
