pub mod curve;
pub mod surface;

pub use curve::{Circle, Curve, Line};
pub use surface::{Cone, Cylinder, Extrusion, Plane, Sphere, Surface, SurfaceDomain, Torus};
