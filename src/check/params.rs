use crate::error::{CheckError, Result};
use crate::topology::Shape;

/// Smallest kerf width ever assumed, in model units (1/8 inch in mm).
pub const MIN_KERF_WIDTH: f64 = 3.175;

/// Parameters for a manufacturability check.
///
/// # Example
///
/// ```
/// use kerfcheck::CheckParams;
///
/// // Kerf follows the shape: max(3.175, thickness).
/// let params = CheckParams::default();
/// assert!(params.kerf_width.is_none());
///
/// // A fixed 2mm waterjet kerf.
/// let waterjet = CheckParams::default().with_kerf_width(2.0);
/// assert_eq!(waterjet.kerf_width, Some(2.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CheckParams {
    /// Width of material removed by the cut. `None` derives it from the
    /// shape being checked.
    pub kerf_width: Option<f64>,
}

impl CheckParams {
    /// Sets an explicit kerf width.
    #[must_use]
    pub const fn with_kerf_width(mut self, width: f64) -> Self {
        self.kerf_width = Some(width);
        self
    }

    /// Kerf width to use for `shape`.
    ///
    /// Without an override this is the larger of [`MIN_KERF_WIDTH`] and the
    /// shape's extent along the layering axis.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::InvalidKerfWidth`] if the override is not a
    /// positive finite number.
    pub fn kerf_width_for(&self, shape: &Shape) -> Result<f64> {
        match self.kerf_width {
            Some(width) if width.is_finite() && width > 0.0 => Ok(width),
            Some(width) => Err(CheckError::InvalidKerfWidth(width).into()),
            None => Ok(MIN_KERF_WIDTH.max(shape.thickness())),
        }
    }
}
