mod bounding_box;
mod closest_point_surface;
mod face_distance;

pub use bounding_box::{Aabb, BoundingBox};
pub use closest_point_surface::{ClosestPointOnFace, SurfacePoint};
pub use face_distance::{FaceDistance, FacePair};
