use std::f64::consts::TAU;

use crate::error::{OperationError, Result};
use crate::geometry::curve::Circle;
use crate::geometry::surface::{Cone, Cylinder, Plane, SurfaceDomain};
use crate::math::{Point2, Point3, Vector2, Vector3, TOLERANCE};
use crate::topology::{EdgeData, EdgeId, FaceData, FaceSurface, Shape, ShapeBuilder};

/// Divisions per arc when bounding the profile.
const ARC_BOUND_SAMPLES: usize = 8;

/// One piece of the outer profile, starting where the previous one ended.
#[derive(Debug, Clone, Copy)]
enum Segment {
    Line { end: Point2 },
    Arc { end: Point2, center: Point2 },
}

impl Segment {
    fn end(&self) -> Point2 {
        match self {
            Self::Line { end } | Self::Arc { end, .. } => *end,
        }
    }
}

/// A hole drilled along the layering axis through the whole plate.
#[derive(Debug, Clone, Copy)]
pub enum Hole {
    /// A plain cylindrical hole.
    Through {
        /// Hole axis position.
        center: Point2,
        /// Hole radius.
        radius: f64,
    },
    /// A hole widened to `bore_radius` over `bore_depth` from the top.
    Counterbore {
        /// Hole axis position.
        center: Point2,
        /// Radius of the narrow part.
        radius: f64,
        /// Radius of the bore.
        bore_radius: f64,
        /// Depth of the bore, measured down from the top face.
        bore_depth: f64,
    },
    /// A hole flared to `sink_radius` at the top over `sink_depth`.
    Countersink {
        /// Hole axis position.
        center: Point2,
        /// Radius of the narrow part.
        radius: f64,
        /// Radius where the cone meets the top face.
        sink_radius: f64,
        /// Depth of the cone, measured down from the top face.
        sink_depth: f64,
    },
}

/// Builds a prismatic plate: a closed 2D profile extruded over
/// `[0, thickness]` along +Z, with holes.
///
/// The profile runs with the material on the left of travel (counter-clockwise
/// for a plain outline). Arc segments take the shorter way around their center;
/// an arc turning left becomes a convex rounded edge, one turning right a
/// concave fillet. The profile is closed with a straight segment if it does
/// not end at its start.
///
/// Faces are ordered bottom, top, one wall per profile segment, then the
/// faces of each hole in the order holes were added.
///
/// # Example
///
/// ```
/// use kerfcheck::math::Point2;
/// use kerfcheck::operations::creation::{Hole, MakePlate};
///
/// let shape = MakePlate::rectangle(20.0, 20.0, 3.0)
///     .hole(Hole::Through { center: Point2::new(10.0, 10.0), radius: 2.0 })
///     .execute()
///     .unwrap();
/// assert_eq!(shape.face_count(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct MakePlate {
    start: Point2,
    segments: Vec<Segment>,
    thickness: f64,
    holes: Vec<Hole>,
}

impl MakePlate {
    /// Starts a profile at `start`.
    #[must_use]
    pub fn new(start: Point2, thickness: f64) -> Self {
        Self {
            start,
            segments: Vec::new(),
            thickness,
            holes: Vec::new(),
        }
    }

    /// A `width` x `height` rectangle with its lower-left corner at the origin.
    #[must_use]
    pub fn rectangle(width: f64, height: f64, thickness: f64) -> Self {
        Self::new(Point2::origin(), thickness)
            .line_to(Point2::new(width, 0.0))
            .line_to(Point2::new(width, height))
            .line_to(Point2::new(0.0, height))
    }

    /// Appends a straight segment.
    #[must_use]
    pub fn line_to(mut self, end: Point2) -> Self {
        self.segments.push(Segment::Line { end });
        self
    }

    /// Appends a circular arc around `center`.
    #[must_use]
    pub fn arc_to(mut self, end: Point2, center: Point2) -> Self {
        self.segments.push(Segment::Arc { end, center });
        self
    }

    /// Adds a hole.
    #[must_use]
    pub fn hole(mut self, hole: Hole) -> Self {
        self.holes.push(hole);
        self
    }

    /// Builds the plate into a new shape.
    ///
    /// # Errors
    ///
    /// See [`MakePlate::add_to`].
    pub fn execute(&self) -> Result<Shape> {
        let mut builder = ShapeBuilder::new();
        self.add_to(&mut builder)?;
        builder.build()
    }

    /// Adds the plate's faces and edges to an existing builder.
    ///
    /// # Errors
    ///
    /// Returns an error if the thickness is not positive, the profile has
    /// fewer than three segments or a degenerate segment, an arc's end points
    /// are not equidistant from its center or span a half turn, or a hole
    /// has invalid dimensions.
    pub fn add_to(&self, builder: &mut ShapeBuilder) -> Result<()> {
        let t = self.thickness;
        if t < TOLERANCE {
            return Err(invalid("plate thickness must be positive"));
        }

        let mut segments = self.segments.clone();
        if segments
            .last()
            .is_some_and(|s| (s.end() - self.start).norm() > TOLERANCE)
        {
            segments.push(Segment::Line { end: self.start });
        }
        if segments.len() < 3 {
            return Err(invalid("profile needs at least three segments"));
        }

        let starts: Vec<Point2> = std::iter::once(self.start)
            .chain(segments.iter().map(Segment::end))
            .take(segments.len())
            .collect();

        let verticals = starts
            .iter()
            .map(|p| Ok(builder.add_edge(EdgeData::line(at(p, 0.0), at(p, t))?)))
            .collect::<Result<Vec<EdgeId>>>()?;

        let mut walls = Vec::with_capacity(segments.len());
        let mut bottom_edges = Vec::new();
        let mut top_edges = Vec::new();
        let mut outline = Outline::default();
        for (i, segment) in segments.iter().enumerate() {
            let start = starts[i];
            let end = segment.end();
            let (surface, domain, same_sense, bottom, top) = match *segment {
                Segment::Line { end } => line_wall(&start, &end, t, &mut outline)?,
                Segment::Arc { end, center } => arc_wall(&start, &end, &center, t, &mut outline)?,
            };
            outline.include(&end);
            let bottom = builder.add_edge(bottom);
            let top = builder.add_edge(top);
            bottom_edges.push(bottom);
            top_edges.push(top);

            let edges = vec![bottom, verticals[(i + 1) % segments.len()], top, verticals[i]];
            let face = FaceData::new(surface, domain, edges);
            walls.push(if same_sense { face } else { face.reversed() });
        }

        let mut hole_faces = Vec::new();
        for hole in &self.holes {
            let (bottom, top, faces) = hole_faces_for(hole, t, builder)?;
            bottom_edges.push(bottom);
            top_edges.push(top);
            hole_faces.extend(faces);
        }

        let bottom = Plane::new(Point3::origin(), Vector3::y(), Vector3::x())?;
        builder.add_face(FaceData::new(
            FaceSurface::Plane(bottom),
            SurfaceDomain::new(outline.min.y, outline.max.y, outline.min.x, outline.max.x),
            bottom_edges,
        ));
        let top = Plane::new(Point3::new(0.0, 0.0, t), Vector3::x(), Vector3::y())?;
        builder.add_face(FaceData::new(
            FaceSurface::Plane(top),
            SurfaceDomain::new(outline.min.x, outline.max.x, outline.min.y, outline.max.y),
            top_edges,
        ));
        for face in walls.into_iter().chain(hole_faces) {
            builder.add_face(face);
        }
        Ok(())
    }
}

/// 2D bounds of the profile.
#[derive(Debug)]
struct Outline {
    min: Point2,
    max: Point2,
}

impl Default for Outline {
    fn default() -> Self {
        Self {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }
}

impl Outline {
    fn include(&mut self, p: &Point2) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }
}

type Wall = (FaceSurface, SurfaceDomain, bool, EdgeData, EdgeData);

fn line_wall(start: &Point2, end: &Point2, t: f64, outline: &mut Outline) -> Result<Wall> {
    let dir: Vector2 = end - start;
    let len = dir.norm();
    if len < TOLERANCE {
        return Err(invalid("profile has a zero-length segment"));
    }
    outline.include(start);
    let plane = Plane::new(at(start, 0.0), Vector3::new(dir.x, dir.y, 0.0), Vector3::z())?;
    Ok((
        FaceSurface::Plane(plane),
        SurfaceDomain::new(0.0, len, 0.0, t),
        true,
        EdgeData::line(at(start, 0.0), at(end, 0.0))?,
        EdgeData::line(at(start, t), at(end, t))?,
    ))
}

fn arc_wall(
    start: &Point2,
    end: &Point2,
    center: &Point2,
    t: f64,
    outline: &mut Outline,
) -> Result<Wall> {
    let a = start - center;
    let b = end - center;
    let radius = a.norm();
    if radius < TOLERANCE || (b.norm() - radius).abs() > TOLERANCE * radius.max(1.0) * 1e3 {
        return Err(invalid("arc end points must be equidistant from the center"));
    }
    let turn = a.perp(&b);
    if turn.abs() < TOLERANCE {
        return Err(invalid("arc must span less than a half turn"));
    }
    let angle_a = a.y.atan2(a.x).rem_euclid(TAU);
    let angle_b = b.y.atan2(b.x).rem_euclid(TAU);
    // Left turns keep the center on the material side.
    let convex = turn > 0.0;
    let (lo, hi) = if convex {
        (angle_a, angle_a + (angle_b - angle_a).rem_euclid(TAU))
    } else {
        (angle_b, angle_b + (angle_a - angle_b).rem_euclid(TAU))
    };

    #[allow(clippy::cast_precision_loss)]
    for k in 0..=ARC_BOUND_SAMPLES {
        let u = lo + (hi - lo) * k as f64 / ARC_BOUND_SAMPLES as f64;
        outline.include(&(center + Vector2::new(u.cos(), u.sin()) * radius));
    }

    let cylinder = Cylinder::new(at(center, 0.0), radius, Vector3::z(), Vector3::x())?;
    let rim = |z: f64| -> Result<EdgeData> {
        let circle = Circle::new(at(center, z), radius, Vector3::z(), Vector3::x())?;
        EdgeData::arc(circle, lo, hi)
    };
    Ok((
        FaceSurface::Cylinder(cylinder),
        SurfaceDomain::new(lo, hi, 0.0, t),
        convex,
        rim(0.0)?,
        rim(t)?,
    ))
}

/// Adds a hole's edges and returns its bottom rim, top rim and faces.
fn hole_faces_for(
    hole: &Hole,
    t: f64,
    builder: &mut ShapeBuilder,
) -> Result<(EdgeId, EdgeId, Vec<FaceData>)> {
    match *hole {
        Hole::Through { center, radius } => {
            check_radius(radius)?;
            let bottom = builder.add_edge(rim(&center, radius, 0.0)?);
            let top = builder.add_edge(rim(&center, radius, t)?);
            let bore = bore_face(&center, radius, 0.0, t, bottom, top, builder)?;
            Ok((bottom, top, vec![bore]))
        }
        Hole::Counterbore {
            center,
            radius,
            bore_radius,
            bore_depth,
        } => {
            check_radius(radius)?;
            if bore_radius <= radius + TOLERANCE {
                return Err(invalid("counterbore must be wider than its hole"));
            }
            check_depth(bore_depth, t)?;
            let floor_z = t - bore_depth;
            let bottom = builder.add_edge(rim(&center, radius, 0.0)?);
            let inner = builder.add_edge(rim(&center, radius, floor_z)?);
            let outer = builder.add_edge(rim(&center, bore_radius, floor_z)?);
            let top = builder.add_edge(rim(&center, bore_radius, t)?);

            let hole = bore_face(&center, radius, 0.0, floor_z, bottom, inner, builder)?;
            let bore = bore_face(&center, bore_radius, floor_z, t, outer, top, builder)?;
            let floor = Plane::new(Point3::new(0.0, 0.0, floor_z), Vector3::x(), Vector3::y())?;
            let floor = FaceData::new(
                FaceSurface::Plane(floor),
                SurfaceDomain::new(
                    center.x - bore_radius,
                    center.x + bore_radius,
                    center.y - bore_radius,
                    center.y + bore_radius,
                ),
                vec![outer, inner],
            );
            Ok((bottom, top, vec![hole, bore, floor]))
        }
        Hole::Countersink {
            center,
            radius,
            sink_radius,
            sink_depth,
        } => {
            check_radius(radius)?;
            if sink_radius <= radius + TOLERANCE {
                return Err(invalid("countersink must be wider than its hole"));
            }
            check_depth(sink_depth, t)?;
            let joint_z = t - sink_depth;
            let bottom = builder.add_edge(rim(&center, radius, 0.0)?);
            let joint = builder.add_edge(rim(&center, radius, joint_z)?);
            let top = builder.add_edge(rim(&center, sink_radius, t)?);
            let hole = bore_face(&center, radius, 0.0, joint_z, bottom, joint, builder)?;

            let half_angle = ((sink_radius - radius) / sink_depth).atan();
            let seam = builder.add_edge(EdgeData::line(
                at(&(center + Vector2::x() * radius), joint_z),
                at(&(center + Vector2::x() * sink_radius), t),
            )?);
            let cone = Cone::new(
                at(&center, joint_z),
                radius,
                Vector3::z(),
                half_angle,
                Vector3::x(),
            )?;
            let cone = FaceData::new(
                FaceSurface::Cone(cone),
                SurfaceDomain::new(0.0, TAU, 0.0, sink_depth / half_angle.cos()),
                vec![joint, seam, top, seam],
            )
            .reversed();
            Ok((bottom, top, vec![hole, cone]))
        }
    }
}

/// A full cylindrical hole wall between `z0` and `z1`, facing its axis.
fn bore_face(
    center: &Point2,
    radius: f64,
    z0: f64,
    z1: f64,
    lower: EdgeId,
    upper: EdgeId,
    builder: &mut ShapeBuilder,
) -> Result<FaceData> {
    let seam_at = center + Vector2::x() * radius;
    let seam = builder.add_edge(EdgeData::line(at(&seam_at, z0), at(&seam_at, z1))?);
    let cylinder = Cylinder::new(at(center, 0.0), radius, Vector3::z(), Vector3::x())?;
    Ok(FaceData::new(
        FaceSurface::Cylinder(cylinder),
        SurfaceDomain::new(0.0, TAU, z0, z1),
        vec![lower, seam, upper, seam],
    )
    .reversed())
}

fn rim(center: &Point2, radius: f64, z: f64) -> Result<EdgeData> {
    let circle = Circle::new(at(center, z), radius, Vector3::z(), Vector3::x())?;
    EdgeData::arc(circle, 0.0, TAU)
}

fn check_radius(radius: f64) -> Result<()> {
    if radius < TOLERANCE {
        return Err(invalid("hole radius must be positive"));
    }
    Ok(())
}

fn check_depth(depth: f64, thickness: f64) -> Result<()> {
    if depth < TOLERANCE || depth > thickness - TOLERANCE {
        return Err(invalid("hole step depth must lie strictly inside the plate"));
    }
    Ok(())
}

fn at(p: &Point2, z: f64) -> Point3 {
    Point3::new(p.x, p.y, z)
}

fn invalid(msg: &str) -> crate::error::KerfError {
    OperationError::InvalidInput(msg.into()).into()
}
