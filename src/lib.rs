pub mod check;
pub mod error;
pub mod geometry;
pub mod io;
pub mod math;
pub mod operations;
pub mod topology;

pub use check::{check, check_shape, check_with, CheckParams, Issue, IssueKind, Report};
pub use error::{KerfError, Result};
