use serde::{Deserialize, Serialize};
use slotmap::SecondaryMap;

use crate::error::{LoadError, Result};
use crate::geometry::curve::{Circle, Line};
use crate::geometry::surface::{Cone, Cylinder, Extrusion, Plane, Sphere, SurfaceDomain, Torus};
use crate::math::{Point3, Vector3};
use crate::topology::{EdgeCurve, EdgeData, EdgeId, FaceData, FaceSurface, Shape, ShapeBuilder};

use super::{FORMAT_ID, FORMAT_VERSION};

/// The top-level document structure.
///
/// Edges and faces are listed by position. Faces refer to their edges by
/// index into the edge list, and a face's position is the index issues
/// report for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeDocument {
    /// Format identifier.
    pub format: String,
    /// Format version number.
    pub version: u32,
    /// Faces in shape order.
    pub faces: Vec<FaceRecord>,
    /// Edges referenced by the faces.
    pub edges: Vec<EdgeRecord>,
}

/// A face: its surface, parameter range `[u1, u2, v1, v2]` and edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceRecord {
    pub surface: SurfaceRecord,
    pub domain: [f64; 4],
    /// `true` if the outward normal opposes the surface normal.
    #[serde(default)]
    pub reversed: bool,
    pub edges: Vec<usize>,
}

/// Surface geometry, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SurfaceRecord {
    Plane {
        origin: [f64; 3],
        u_dir: [f64; 3],
        v_dir: [f64; 3],
    },
    Cylinder {
        center: [f64; 3],
        radius: f64,
        axis: [f64; 3],
        ref_dir: [f64; 3],
    },
    Cone {
        center: [f64; 3],
        radius: f64,
        axis: [f64; 3],
        half_angle: f64,
        ref_dir: [f64; 3],
    },
    Sphere {
        center: [f64; 3],
        radius: f64,
        axis: [f64; 3],
        ref_dir: [f64; 3],
    },
    Torus {
        center: [f64; 3],
        major_radius: f64,
        minor_radius: f64,
        axis: [f64; 3],
        ref_dir: [f64; 3],
    },
    /// A free-form surface, stored as a swept Bezier profile.
    Extrusion {
        control_points: Vec<[f64; 3]>,
        direction: [f64; 3],
    },
}

/// An edge: its curve, end points and parameter interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub curve: CurveRecord,
    pub start: [f64; 3],
    pub end: [f64; 3],
    pub t_start: f64,
    pub t_end: f64,
}

/// Curve geometry, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CurveRecord {
    Line {
        origin: [f64; 3],
        direction: [f64; 3],
    },
    Circle {
        center: [f64; 3],
        radius: f64,
        normal: [f64; 3],
        ref_dir: [f64; 3],
    },
    Other,
}

impl ShapeDocument {
    /// Records a shape, keeping its face and edge order.
    #[must_use]
    pub fn from_shape(shape: &Shape) -> Self {
        let mut edge_index: SecondaryMap<EdgeId, usize> = SecondaryMap::new();
        let edges = shape
            .edges()
            .enumerate()
            .map(|(index, (id, edge))| {
                edge_index.insert(id, index);
                EdgeRecord::from_edge(edge)
            })
            .collect();
        let faces = shape
            .faces()
            .map(|(_, face)| FaceRecord {
                surface: SurfaceRecord::from_surface(&face.surface),
                domain: [
                    face.domain.u_min,
                    face.domain.u_max,
                    face.domain.v_min,
                    face.domain.v_max,
                ],
                reversed: !face.same_sense,
                edges: face
                    .edges
                    .iter()
                    .filter_map(|e| edge_index.get(*e).copied())
                    .collect(),
            })
            .collect();
        Self {
            format: FORMAT_ID.to_string(),
            version: FORMAT_VERSION,
            faces,
            edges,
        }
    }

    /// Builds the shape the document describes.
    ///
    /// # Errors
    ///
    /// Returns an error if a face references a missing edge or any geometry
    /// is degenerate.
    pub fn into_shape(self) -> Result<Shape> {
        let mut builder = ShapeBuilder::new();
        let edge_ids = self
            .edges
            .into_iter()
            .map(|record| Ok(builder.add_edge(record.into_edge()?)))
            .collect::<Result<Vec<EdgeId>>>()?;

        for (face_index, record) in self.faces.into_iter().enumerate() {
            let edges = record
                .edges
                .iter()
                .map(|&edge| {
                    edge_ids.get(edge).copied().ok_or(LoadError::DanglingEdge {
                        face: face_index,
                        edge,
                    })
                })
                .collect::<std::result::Result<Vec<EdgeId>, LoadError>>()?;
            let [u_min, u_max, v_min, v_max] = record.domain;
            let face = FaceData::new(
                record.surface.into_surface()?,
                SurfaceDomain::new(u_min, u_max, v_min, v_max),
                edges,
            );
            builder.add_face(if record.reversed { face.reversed() } else { face });
        }
        builder.build()
    }
}

impl SurfaceRecord {
    fn from_surface(surface: &FaceSurface) -> Self {
        match surface {
            FaceSurface::Plane(s) => Self::Plane {
                origin: point(s.origin()),
                u_dir: vector(s.u_dir()),
                v_dir: vector(s.v_dir()),
            },
            FaceSurface::Cylinder(s) => Self::Cylinder {
                center: point(s.center()),
                radius: s.radius(),
                axis: vector(s.axis()),
                ref_dir: vector(s.ref_dir()),
            },
            FaceSurface::Cone(s) => Self::Cone {
                center: point(s.center()),
                radius: s.radius(),
                axis: vector(s.axis()),
                half_angle: s.half_angle(),
                ref_dir: vector(s.ref_dir()),
            },
            FaceSurface::Sphere(s) => Self::Sphere {
                center: point(s.center()),
                radius: s.radius(),
                axis: vector(s.axis()),
                ref_dir: vector(s.ref_dir()),
            },
            FaceSurface::Torus(s) => Self::Torus {
                center: point(s.center()),
                major_radius: s.major_radius(),
                minor_radius: s.minor_radius(),
                axis: vector(s.axis()),
                ref_dir: vector(s.ref_dir()),
            },
            FaceSurface::Other(s) => Self::Extrusion {
                control_points: s.control_points().iter().map(point).collect(),
                direction: vector(s.direction()),
            },
        }
    }

    fn into_surface(self) -> Result<FaceSurface> {
        Ok(match self {
            Self::Plane {
                origin,
                u_dir,
                v_dir,
            } => FaceSurface::Plane(Plane::new(origin.into(), u_dir.into(), v_dir.into())?),
            Self::Cylinder {
                center,
                radius,
                axis,
                ref_dir,
            } => FaceSurface::Cylinder(Cylinder::new(
                center.into(),
                radius,
                axis.into(),
                ref_dir.into(),
            )?),
            Self::Cone {
                center,
                radius,
                axis,
                half_angle,
                ref_dir,
            } => FaceSurface::Cone(Cone::new(
                center.into(),
                radius,
                axis.into(),
                half_angle,
                ref_dir.into(),
            )?),
            Self::Sphere {
                center,
                radius,
                axis,
                ref_dir,
            } => FaceSurface::Sphere(Sphere::new(
                center.into(),
                radius,
                axis.into(),
                ref_dir.into(),
            )?),
            Self::Torus {
                center,
                major_radius,
                minor_radius,
                axis,
                ref_dir,
            } => FaceSurface::Torus(Torus::new(
                center.into(),
                major_radius,
                minor_radius,
                axis.into(),
                ref_dir.into(),
            )?),
            Self::Extrusion {
                control_points,
                direction,
            } => FaceSurface::Other(Extrusion::new(
                control_points.into_iter().map(Point3::from).collect(),
                direction.into(),
            )?),
        })
    }
}

impl EdgeRecord {
    fn from_edge(edge: &EdgeData) -> Self {
        let curve = match &edge.curve {
            EdgeCurve::Line(line) => CurveRecord::Line {
                origin: point(line.origin()),
                direction: vector(line.direction()),
            },
            EdgeCurve::Circle(circle) => CurveRecord::Circle {
                center: point(circle.center()),
                radius: circle.radius(),
                normal: vector(circle.normal()),
                ref_dir: vector(circle.ref_dir()),
            },
            EdgeCurve::Other => CurveRecord::Other,
        };
        Self {
            curve,
            start: point(&edge.start),
            end: point(&edge.end),
            t_start: edge.t_start,
            t_end: edge.t_end,
        }
    }

    fn into_edge(self) -> Result<EdgeData> {
        let curve = match self.curve {
            CurveRecord::Line { origin, direction } => {
                EdgeCurve::Line(Line::new(origin.into(), direction.into())?)
            }
            CurveRecord::Circle {
                center,
                radius,
                normal,
                ref_dir,
            } => EdgeCurve::Circle(Circle::new(
                center.into(),
                radius,
                normal.into(),
                ref_dir.into(),
            )?),
            CurveRecord::Other => EdgeCurve::Other,
        };
        Ok(EdgeData {
            curve,
            start: self.start.into(),
            end: self.end.into(),
            t_start: self.t_start,
            t_end: self.t_end,
        })
    }
}

fn point(p: &Point3) -> [f64; 3] {
    [p.x, p.y, p.z]
}

fn vector(v: &Vector3) -> [f64; 3] {
    [v.x, v.y, v.z]
}
