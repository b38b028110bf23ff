mod adjacency;
mod classify;
mod concavity;
pub mod detect;
mod gate;
mod issue;
mod params;

#[cfg(test)]
pub(crate) mod fixtures;

pub use adjacency::AdjacencyGraph;
pub use classify::{Classification, SurfaceClass};
pub use concavity::ConcavityOracle;
pub use gate::{flat_stock_gate, GateFailure, LEFTOVER_GRID};
pub use issue::{Issue, IssueKind, Report};
pub use params::{CheckParams, MIN_KERF_WIDTH};

use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::io::load_shape;
use crate::topology::Shape;

use detect::{Analysis, Claims};

/// Loads the shape document at `path` and checks it with default parameters.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded or a geometric query
/// fails during the check.
pub fn check(path: impl AsRef<Path>) -> Result<Report> {
    check_with(path, &CheckParams::default())
}

/// Loads the shape document at `path` and checks it.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded, the parameters are
/// invalid, or a geometric query fails during the check.
pub fn check_with(path: impl AsRef<Path>, params: &CheckParams) -> Result<Report> {
    let shape = load_shape(path)?;
    check_shape(&shape, params)
}

/// Checks a shape for flat layered cutting.
///
/// Every face is classified, and shapes that are not flat stock stop early
/// with a single non-uniform issue. Otherwise the detectors run over the
/// face adjacency graph in this order:
///
/// 1. off-axis radius
/// 2. tight corners along vertical edges
/// 3. countersinks
/// 4. counterbores
/// 5. undersized holes and fillets
/// 6. cuts narrower than the kerf
/// 7. drafts and chamfers
/// 8. unexplained horizontal planes
///
/// Issues are returned in detector order. The shape is not modified, so
/// checking it again gives the same report.
///
/// ```
/// use kerfcheck::math::Point2;
/// use kerfcheck::operations::creation::{Hole, MakePlate};
/// use kerfcheck::{check_shape, CheckParams, IssueKind};
///
/// let shape = MakePlate::rectangle(20.0, 20.0, 3.0)
///     .hole(Hole::Through { center: Point2::new(10.0, 10.0), radius: 1.0 })
///     .execute()
///     .unwrap();
/// let report = check_shape(&shape, &CheckParams::default()).unwrap();
/// assert_eq!(report.kinds(), vec![IssueKind::SmallHole]);
/// ```
///
/// # Errors
///
/// Returns an error if the parameters are invalid or a geometric query
/// fails during the check.
pub fn check_shape(shape: &Shape, params: &CheckParams) -> Result<Report> {
    let kerf_width = params.kerf_width_for(shape)?;
    info!(
        faces = shape.face_count(),
        edges = shape.edge_count(),
        kerf_width,
        "Checking shape"
    );

    let classes = Classification::of(shape);
    if let Some(failure) = flat_stock_gate(shape, &classes)? {
        debug!(reason = failure.reason(), "Shape is not flat stock");
        return Ok(Report {
            issues: vec![Issue::global(IssueKind::NonUniform)],
        });
    }

    let graph = AdjacencyGraph::build(shape);
    let concavity = ConcavityOracle::new(shape);
    let ctx = Analysis {
        shape,
        classes: &classes,
        graph: &graph,
        concavity: &concavity,
        kerf_width,
    };

    let mut report = Report::default();
    let mut claims = Claims::default();
    for detector in detect::pipeline() {
        let (issues, next) = detector.detect(&ctx, claims)?;
        debug!(detector = detector.name(), issues = issues.len(), "Detector finished");
        report.issues.extend(issues);
        claims = next;
    }

    info!(issues = report.issues.len(), "Check complete");
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::io::save_shape;
    use crate::math::Point2;
    use crate::operations::creation::{Hole, MakePlate};

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn run(shape: &Shape) -> Report {
        init_tracing();
        check_shape(shape, &CheckParams::default()).unwrap()
    }

    fn faces_of(report: &Report, kind: IssueKind) -> Vec<Vec<usize>> {
        report
            .issues
            .iter()
            .filter(|i| i.kind == kind)
            .map(|i| i.faces.clone().unwrap_or_default())
            .collect()
    }

    fn plate() -> MakePlate {
        MakePlate::rectangle(20.0, 20.0, 3.0)
    }

    #[test]
    fn clean_plate_has_no_issues() {
        let report = run(&plate().execute().unwrap());
        assert!(report.is_clean(), "{report:?}");
    }

    #[test]
    fn large_hole_is_clean() {
        let shape = plate()
            .hole(Hole::Through {
                center: Point2::new(10.0, 10.0),
                radius: 3.0,
            })
            .execute()
            .unwrap();
        assert!(run(&shape).is_clean());
    }

    #[test]
    fn sphere_is_only_non_uniform() {
        let report = run(&fixtures::plate_with_dome());
        assert_eq!(report.kinds(), vec![IssueKind::NonUniform]);
        assert_eq!(report.issues[0].faces, None);
    }

    #[test]
    fn torus_is_only_non_uniform() {
        assert_eq!(run(&fixtures::plate_with_ring()).kinds(), vec![IssueKind::NonUniform]);
    }

    #[test]
    fn lone_plane_is_only_non_uniform() {
        assert_eq!(run(&fixtures::lone_plane()).kinds(), vec![IssueKind::NonUniform]);
    }

    #[test]
    fn leaning_freeform_is_only_non_uniform() {
        assert_eq!(run(&fixtures::plate_with_freeform(true)).kinds(), vec![IssueKind::NonUniform]);
    }

    #[test]
    fn vertical_freeform_passes_gate() {
        let report = run(&fixtures::plate_with_freeform(false));
        assert!(!report.has(IssueKind::NonUniform), "{report:?}");
    }

    #[test]
    fn off_axis_groove_is_radius() {
        let report = run(&fixtures::plate_with_groove());
        assert_eq!(report.kinds(), vec![IssueKind::Radius]);
        assert_eq!(report.issues[0].faces, None);
    }

    #[test]
    fn full_depth_slope_is_draft() {
        let report = run(&fixtures::bevelled_block(0.0));
        assert_eq!(report.to_json().unwrap(), r#"{"issues":[{"kind":"draft","faces":null}]}"#);
    }

    #[test]
    fn partial_slope_is_chamfer() {
        assert_eq!(run(&fixtures::bevelled_block(2.0)).kinds(), vec![IssueKind::Chamfer]);
    }

    #[test]
    fn small_hole_names_its_cylinder() {
        let shape = plate()
            .hole(Hole::Through {
                center: Point2::new(10.0, 10.0),
                radius: 1.0,
            })
            .execute()
            .unwrap();
        let report = run(&shape);
        assert_eq!(report.kinds(), vec![IssueKind::SmallHole]);
        assert_eq!(faces_of(&report, IssueKind::SmallHole), vec![vec![6]]);
    }

    #[test]
    fn kerf_override_changes_small_hole_threshold() {
        let shape = plate()
            .hole(Hole::Through {
                center: Point2::new(10.0, 10.0),
                radius: 1.0,
            })
            .execute()
            .unwrap();
        let params = CheckParams::default().with_kerf_width(1.0);
        assert!(check_shape(&shape, &params).unwrap().is_clean());
    }

    #[test]
    fn counterbore_names_both_bores_and_floor() {
        let shape = plate()
            .hole(Hole::Counterbore {
                center: Point2::new(10.0, 10.0),
                radius: 2.0,
                bore_radius: 4.0,
                bore_depth: 1.0,
            })
            .execute()
            .unwrap();
        let report = run(&shape);
        assert_eq!(report.kinds(), vec![IssueKind::CounterBore]);
        assert_eq!(faces_of(&report, IssueKind::CounterBore), vec![vec![6, 7, 8]]);
    }

    #[test]
    fn countersink_claims_its_cone() {
        let shape = plate()
            .hole(Hole::Countersink {
                center: Point2::new(10.0, 10.0),
                radius: 2.0,
                sink_radius: 3.0,
                sink_depth: 1.0,
            })
            .execute()
            .unwrap();
        let report = run(&shape);
        assert_eq!(report.kinds(), vec![IssueKind::CounterSink]);
        assert_eq!(faces_of(&report, IssueKind::CounterSink), vec![vec![6, 7]]);
    }

    #[test]
    fn sharp_inner_corner_is_tight() {
        let report = run(&fixtures::l_plate(None).execute().unwrap());
        assert_eq!(report.kinds(), vec![IssueKind::TightCorner]);
        // Walls 4 and 5 meet at the notch.
        assert_eq!(faces_of(&report, IssueKind::TightCorner), vec![vec![4, 5]]);
    }

    #[test]
    fn shallow_bend_is_mild() {
        let report = run(&fixtures::shallow_bend().execute().unwrap());
        assert_eq!(report.kinds(), vec![IssueKind::TightCornerMild]);
    }

    #[test]
    fn small_fillet_is_tight_corner_without_small_cut() {
        let report = run(&fixtures::l_plate(Some(0.5)).execute().unwrap());
        assert_eq!(report.kinds(), vec![IssueKind::TightCorner]);
        assert_eq!(faces_of(&report, IssueKind::TightCorner), vec![vec![5]]);
    }

    #[test]
    fn generous_fillet_is_clean() {
        assert!(run(&fixtures::l_plate(Some(3.0)).execute().unwrap()).is_clean());
    }

    #[test]
    fn narrow_slot_is_small_cut() {
        let report = run(&fixtures::slotted_plate(1.0).execute().unwrap());
        assert_eq!(report.count(IssueKind::TightCorner), 2);
        assert_eq!(faces_of(&report, IssueKind::SmallCut), vec![vec![5, 7]]);
    }

    #[test]
    fn wide_slot_is_not_small_cut() {
        let report = run(&fixtures::slotted_plate(4.0).execute().unwrap());
        assert!(!report.has(IssueKind::SmallCut));
    }

    #[test]
    fn thin_web_between_holes_is_not_small_cut() {
        let shape = MakePlate::rectangle(30.0, 20.0, 3.0)
            .hole(Hole::Through {
                center: Point2::new(11.5, 10.0),
                radius: 3.0,
            })
            .hole(Hole::Through {
                center: Point2::new(18.5, 10.0),
                radius: 3.0,
            })
            .execute()
            .unwrap();
        assert!(run(&shape).is_clean());
    }

    #[test]
    fn extra_floor_is_residual_non_uniform() {
        assert_eq!(run(&fixtures::plate_with_pocket_floor()).kinds(), vec![IssueKind::NonUniform]);
    }

    #[test]
    fn check_is_idempotent() {
        let shape = fixtures::slotted_plate(1.0).execute().unwrap();
        let first = run(&shape);
        let second = run(&shape);
        assert_eq!(first, second);
    }

    #[test]
    fn check_reads_saved_document() {
        let shape = plate()
            .hole(Hole::Through {
                center: Point2::new(10.0, 10.0),
                radius: 1.0,
            })
            .execute()
            .unwrap();
        let path = std::env::temp_dir().join(format!("kerfcheck-{}.json", std::process::id()));
        std::fs::write(&path, save_shape(&shape).unwrap()).unwrap();
        let report = check(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(report, run(&shape));
    }

    #[test]
    fn missing_document_fails() {
        assert!(check("/nonexistent/kerfcheck/shape.json").is_err());
    }
}
