use std::path::Path;

use tracing::debug;

use crate::error::{LoadError, Result};
use crate::topology::Shape;

use super::{ShapeDocument, FORMAT_ID, FORMAT_VERSION};

/// Reads and builds the shape document at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or [`parse_shape`] fails.
pub fn load_shape(path: impl AsRef<Path>) -> Result<Shape> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = json.len(), "Loading shape document");
    parse_shape(&json)
}

/// Builds a shape from a JSON document.
///
/// Validates the format identifier and version before building.
///
/// # Errors
///
/// Returns an error if the JSON is malformed, the format or version is not
/// supported, a face references a missing edge, or any geometry is
/// degenerate.
pub fn parse_shape(json: &str) -> Result<Shape> {
    let doc: ShapeDocument = serde_json::from_str(json).map_err(LoadError::Parse)?;

    if doc.format != FORMAT_ID {
        return Err(LoadError::UnknownFormat(doc.format).into());
    }
    if doc.version > FORMAT_VERSION {
        return Err(LoadError::FutureVersion {
            file_version: doc.version,
            supported_version: FORMAT_VERSION,
        }
        .into());
    }

    doc.into_shape()
}
