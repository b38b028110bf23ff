mod document;
mod load;
mod save;

pub use document::{CurveRecord, EdgeRecord, FaceRecord, ShapeDocument, SurfaceRecord};
pub use load::{load_shape, parse_shape};
pub use save::save_shape;

/// Format identifier written to and required in every document.
pub const FORMAT_ID: &str = "kerfcheck-shape";

/// Current document version.
pub const FORMAT_VERSION: u32 = 1;
