use std::f64::consts::PI;

use crate::check::issue::{Issue, IssueKind};
use crate::error::Result;
use crate::math::{angle_between, TOLERANCE};

use super::{normal_near, Analysis, Claims, Detector};

/// Corners whose normals turn by more than this (10 degrees) are tight;
/// smaller turns are mild.
pub const CORNER_ANGLE_THRESHOLD: f64 = 10.0 * PI / 180.0;

/// Normals closer than this (radians) meet tangentially: no corner.
pub const TANGENT_TOLERANCE: f64 = 1e-6;

/// Distance the corner probe steps off the edge along the mean normal.
pub const CORNER_PROBE_OFFSET: f64 = 0.001;

/// Reports internal corners along vertical straight edges.
///
/// A round cutter leaves a radius in every internal corner, so any vertical
/// edge where two faces meet at an angle inside the part is flagged. The
/// corner is internal when a point stepped off the edge midpoint along the
/// mean of the two outward normals still projects onto both faces.
pub struct TightCorners;

impl Detector for TightCorners {
    fn name(&self) -> &'static str {
        "tight-corner"
    }

    fn detect(&self, ctx: &Analysis<'_>, claims: Claims) -> Result<(Vec<Issue>, Claims)> {
        let mut issues = Vec::new();
        for (edge_id, edge) in ctx.shape.edges() {
            let Some((a, b)) = ctx.graph.edge_pair(edge_id) else {
                continue;
            };
            if !edge.as_line().is_some_and(|line| line.is_vertical()) {
                continue;
            }

            let mid = edge.midpoint()?;
            let face_a = ctx.shape.face(a)?;
            let face_b = ctx.shape.face(b)?;
            let na = normal_near(face_a, &mid)?;
            let nb = normal_near(face_b, &mid)?;

            let angle = angle_between(&na, &nb);
            if angle < TANGENT_TOLERANCE {
                continue;
            }
            let mean = na + nb;
            if mean.norm() < TOLERANCE {
                continue;
            }

            let probe = mid + mean.normalize() * CORNER_PROBE_OFFSET;
            if !(face_a.contains_projection(&probe)? && face_b.contains_projection(&probe)?) {
                continue;
            }

            let kind = if angle > CORNER_ANGLE_THRESHOLD {
                IssueKind::TightCorner
            } else {
                IssueKind::TightCornerMild
            };
            let mut pair = [a, b];
            ctx.in_shape_order(&mut pair)?;
            issues.push(ctx.issue(kind, &pair)?);
        }
        Ok((issues, claims))
    }
}
