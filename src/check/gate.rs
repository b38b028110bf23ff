use crate::error::Result;
use crate::math::is_close;
use crate::topology::Shape;

use super::classify::{Classification, SurfaceClass};

/// Samples per parameter direction when testing free-form faces.
pub const LEFTOVER_GRID: usize = 20;

/// Why a shape failed the flat-stock gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateFailure {
    /// Fewer than two horizontal planes, so no top and bottom.
    MissingFaces,
    /// A sphere or torus face.
    BadSurface,
    /// A free-form face whose normal leaves the horizontal plane.
    LeaningLeftover,
}

impl GateFailure {
    /// Short reason for logs.
    #[must_use]
    pub fn reason(self) -> &'static str {
        match self {
            Self::MissingFaces => "fewer than two horizontal planes",
            Self::BadSurface => "sphere or torus face",
            Self::LeaningLeftover => "free-form face is not vertical",
        }
    }
}

/// Decides whether the detectors should run at all.
///
/// # Errors
///
/// Returns an error if a free-form face cannot be evaluated.
pub fn flat_stock_gate(shape: &Shape, classes: &Classification) -> Result<Option<GateFailure>> {
    if classes.count(SurfaceClass::HorizontalPlane) < 2 {
        return Ok(Some(GateFailure::MissingFaces));
    }
    if classes.count(SurfaceClass::Bad) > 0 {
        return Ok(Some(GateFailure::BadSurface));
    }

    for id in classes.faces_of(SurfaceClass::Leftover) {
        let face = shape.face(id)?;
        for a in 0..LEFTOVER_GRID {
            for b in 0..LEFTOVER_GRID {
                let (u, v) = face.domain.sample(a, b, LEFTOVER_GRID);
                if !is_close(face.normal_at(u, v)?.z, 0.0) {
                    return Ok(Some(GateFailure::LeaningLeftover));
                }
            }
        }
    }
    Ok(None)
}
