#![allow(clippy::unwrap_used)]

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::geometry::surface::{Cone, Cylinder, Extrusion, Plane, Sphere, SurfaceDomain, Torus};
use crate::math::{Point2, Point3, Vector3};
use crate::operations::creation::{Hole, MakePlate};
use crate::topology::{EdgeData, FaceData, FaceSurface, Shape, ShapeBuilder};

use super::detect::{Analysis, Claims, Detector};
use super::{AdjacencyGraph, CheckParams, Classification, ConcavityOracle, Issue};

const SIDE: f64 = 20.0;
const THICKNESS: f64 = 3.0;

fn plate_builder() -> ShapeBuilder {
    let mut builder = ShapeBuilder::new();
    MakePlate::rectangle(SIDE, SIDE, THICKNESS)
        .add_to(&mut builder)
        .unwrap();
    builder
}

/// Runs a single detector over `shape` with the default kerf.
pub fn run_detector(
    shape: &Shape,
    detector: &dyn Detector,
    claims: Claims,
) -> (Vec<Issue>, Claims) {
    let classes = Classification::of(shape);
    let graph = AdjacencyGraph::build(shape);
    let concavity = ConcavityOracle::new(shape);
    let ctx = Analysis {
        shape,
        classes: &classes,
        graph: &graph,
        concavity: &concavity,
        kerf_width: CheckParams::default().kerf_width_for(shape).unwrap(),
    };
    detector.detect(&ctx, claims).unwrap()
}

/// A 20 x 20 x 3 plate with one hole in the middle.
pub fn plate_with_hole(hole: Hole) -> Shape {
    MakePlate::rectangle(SIDE, SIDE, THICKNESS)
        .hole(hole)
        .execute()
        .unwrap()
}

/// A plate with a hemispherical dome on top.
pub fn plate_with_dome() -> Shape {
    let mut builder = plate_builder();
    let sphere = Sphere::new(Point3::new(10.0, 10.0, THICKNESS), 2.0, Vector3::z(), Vector3::x())
        .unwrap();
    builder.add_face(FaceData::new(
        FaceSurface::Sphere(sphere),
        SurfaceDomain::new(0.0, TAU, 0.0, FRAC_PI_2),
        vec![],
    ));
    builder.build().unwrap()
}

/// A plate with a toroidal ring sitting on top.
pub fn plate_with_ring() -> Shape {
    let mut builder = plate_builder();
    let torus = Torus::new(
        Point3::new(10.0, 10.0, THICKNESS),
        4.0,
        1.0,
        Vector3::z(),
        Vector3::x(),
    )
    .unwrap();
    builder.add_face(FaceData::new(
        FaceSurface::Torus(torus),
        SurfaceDomain::new(0.0, TAU, 0.0, PI),
        vec![],
    ));
    builder.build().unwrap()
}

/// A single horizontal square.
pub fn lone_plane() -> Shape {
    let mut builder = ShapeBuilder::new();
    let plane = Plane::new(Point3::origin(), Vector3::x(), Vector3::y()).unwrap();
    builder.add_face(FaceData::new(
        FaceSurface::Plane(plane),
        SurfaceDomain::new(0.0, 10.0, 0.0, 10.0),
        vec![],
    ));
    builder.build().unwrap()
}

/// A plate with a wavy free-form wall in the middle, swept straight up or
/// leaning sideways.
pub fn plate_with_freeform(leaning: bool) -> Shape {
    let mut builder = plate_builder();
    let direction = if leaning {
        Vector3::new(0.0, 1.0, THICKNESS)
    } else {
        Vector3::new(0.0, 0.0, THICKNESS)
    };
    let wall = Extrusion::new(
        vec![
            Point3::new(5.0, 10.0, 0.0),
            Point3::new(8.0, 12.0, 0.0),
            Point3::new(12.0, 8.0, 0.0),
            Point3::new(15.0, 10.0, 0.0),
        ],
        direction,
    )
    .unwrap();
    builder.add_face(FaceData::new(
        FaceSurface::Other(wall),
        SurfaceDomain::new(0.0, 1.0, 0.0, 1.0),
        vec![],
    ));
    builder.build().unwrap()
}

fn groove_builder() -> ShapeBuilder {
    let mut builder = plate_builder();
    let groove = Cylinder::new(Point3::new(10.0, 5.0, THICKNESS), 1.0, Vector3::y(), Vector3::x())
        .unwrap();
    builder.add_face(
        FaceData::new(
            FaceSurface::Cylinder(groove),
            SurfaceDomain::new(0.0, PI, 0.0, 10.0),
            vec![],
        )
        .reversed(),
    );
    builder
}

/// A plate with a half-round groove running along Y in its top face.
pub fn plate_with_groove() -> Shape {
    groove_builder().build().unwrap()
}

/// A plate with a tapered pin lying along X on its top face, optionally
/// beside the groove of [`plate_with_groove`].
pub fn plate_with_taper(with_groove: bool) -> Shape {
    let mut builder = if with_groove {
        groove_builder()
    } else {
        plate_builder()
    };
    let taper = Cone::new(Point3::new(4.0, 15.0, THICKNESS), 1.0, Vector3::x(), 0.2, Vector3::z())
        .unwrap();
    builder.add_face(FaceData::new(
        FaceSurface::Cone(taper),
        SurfaceDomain::new(0.0, PI, 0.0, 8.0),
        vec![],
    ));
    builder.build().unwrap()
}

/// A plate with a row of loose slanted planes near its front edge, one per
/// entry. A `true` entry runs the full thickness, a `false` one only the
/// top millimetre.
pub fn plate_with_slants(full_depth: &[bool]) -> Shape {
    let mut builder = plate_builder();
    let slant = Vector3::new(0.0, 3.0, 4.0) / 5.0;
    for (x, &full) in (0..).map(|i| 2.0 + 4.0 * f64::from(i)).zip(full_depth) {
        let base = if full { 0.0 } else { THICKNESS - 1.0 };
        let plane = Plane::new(Point3::new(x, 1.0, base), Vector3::x(), slant).unwrap();
        builder.add_face(FaceData::new(
            FaceSurface::Plane(plane),
            SurfaceDomain::new(0.0, 2.0, 0.0, (THICKNESS - base) / slant.z),
            vec![],
        ));
    }
    builder.build().unwrap()
}

/// A plate with a drafted round boss face of the given height standing on
/// the bottom. Its cone narrows upward and touches no other face.
pub fn plate_with_boss_cone(height: f64) -> Shape {
    let mut builder = plate_builder();
    let half_angle: f64 = -0.2;
    let boss = Cone::new(Point3::new(10.0, 10.0, 0.0), 3.0, Vector3::z(), half_angle, Vector3::x())
        .unwrap();
    builder.add_face(FaceData::new(
        FaceSurface::Cone(boss),
        SurfaceDomain::new(0.0, TAU, 0.0, height / half_angle.cos()),
        vec![],
    ));
    builder.build().unwrap()
}

/// A plate with an extra upward-facing floor halfway down.
pub fn plate_with_pocket_floor() -> Shape {
    let mut builder = plate_builder();
    let floor = Plane::new(Point3::new(0.0, 0.0, 1.5), Vector3::x(), Vector3::y()).unwrap();
    builder.add_face(FaceData::new(
        FaceSurface::Plane(floor),
        SurfaceDomain::new(8.0, 12.0, 8.0, 12.0),
        vec![],
    ));
    builder.build().unwrap()
}

/// A 10 x 10 x 3 block whose +X side slopes inward by 20 degrees from
/// `slope_from_z` to the top. Below `slope_from_z` the side is vertical.
pub fn bevelled_block(slope_from_z: f64) -> Shape {
    let t = THICKNESS;
    let rise = t - slope_from_z;
    let run = rise * 20.0_f64.to_radians().tan();
    let p = Point3::new;
    let line = |a: Point3, b: Point3| EdgeData::line(a, b).unwrap();
    let rect = |origin: Point3, u: Vector3, v: Vector3, u_len: f64, v_len: f64| {
        (
            Plane::new(origin, u, v).unwrap(),
            SurfaceDomain::new(0.0, u_len, 0.0, v_len),
        )
    };

    let mut b = ShapeBuilder::new();
    let (b0, b1, b2, b3) = (p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0), p(10.0, 10.0, 0.0), p(0.0, 10.0, 0.0));
    let (t0, t1, t2, t3) = (p(0.0, 0.0, t), p(10.0 - run, 0.0, t), p(10.0 - run, 10.0, t), p(0.0, 10.0, t));
    let (m1, m2) = (p(10.0, 0.0, slope_from_z), p(10.0, 10.0, slope_from_z));

    let bottom_front = b.add_edge(line(b0, b1));
    let bottom_right = b.add_edge(line(b1, b2));
    let bottom_back = b.add_edge(line(b2, b3));
    let bottom_left = b.add_edge(line(b3, b0));
    let top_front = b.add_edge(line(t0, t1));
    let top_right = b.add_edge(line(t1, t2));
    let top_back = b.add_edge(line(t2, t3));
    let top_left = b.add_edge(line(t3, t0));
    let front_left = b.add_edge(line(b0, t0));
    let back_left = b.add_edge(line(b3, t3));
    let slope_front = b.add_edge(line(m1, t1));
    let slope_back = b.add_edge(line(m2, t2));

    let bottom = Plane::new(Point3::origin(), Vector3::y(), Vector3::x()).unwrap();
    b.add_face(FaceData::new(
        FaceSurface::Plane(bottom),
        SurfaceDomain::new(0.0, 10.0, 0.0, 10.0),
        vec![bottom_front, bottom_right, bottom_back, bottom_left],
    ));
    let top = Plane::new(p(0.0, 0.0, t), Vector3::x(), Vector3::y()).unwrap();
    b.add_face(FaceData::new(
        FaceSurface::Plane(top),
        SurfaceDomain::new(0.0, 10.0 - run, 0.0, 10.0),
        vec![top_front, top_right, top_back, top_left],
    ));

    let (front_right, back_right, slope_foot) = if slope_from_z > 0.0 {
        let r1 = b.add_edge(line(b1, m1));
        let r2 = b.add_edge(line(b2, m2));
        (vec![r1, slope_front], vec![r2, slope_back], b.add_edge(line(m1, m2)))
    } else {
        (vec![slope_front], vec![slope_back], bottom_right)
    };

    let (plane, domain) = rect(b0, Vector3::x(), Vector3::z(), 10.0, t);
    let mut edges = vec![bottom_front, top_front, front_left];
    edges.extend(&front_right);
    b.add_face(FaceData::new(FaceSurface::Plane(plane), domain, edges));

    let (plane, domain) = rect(b2, -Vector3::x(), Vector3::z(), 10.0, t);
    let mut edges = vec![bottom_back, top_back, back_left];
    edges.extend(&back_right);
    b.add_face(FaceData::new(FaceSurface::Plane(plane), domain, edges));

    let (plane, domain) = rect(b3, -Vector3::y(), Vector3::z(), 10.0, t);
    b.add_face(FaceData::new(
        FaceSurface::Plane(plane),
        domain,
        vec![bottom_left, front_left, top_left, back_left],
    ));

    if slope_from_z > 0.0 {
        let (plane, domain) = rect(b1, Vector3::y(), Vector3::z(), 10.0, slope_from_z);
        b.add_face(FaceData::new(
            FaceSurface::Plane(plane),
            domain,
            vec![bottom_right, front_right[0], slope_foot, back_right[0]],
        ));
    }

    let slant = Vector3::new(-run, 0.0, rise);
    let (plane, domain) = rect(m1, Vector3::y(), slant, 10.0, slant.norm());
    b.add_face(FaceData::new(
        FaceSurface::Plane(plane),
        domain,
        vec![slope_foot, slope_back, top_right, slope_front],
    ));

    b.build().unwrap()
}

/// A 20 x 20 L-shaped plate with the notch at (10, 10), optionally filleted.
pub fn l_plate(fillet: Option<f64>) -> MakePlate {
    let plate = MakePlate::new(Point2::origin(), THICKNESS)
        .line_to(Point2::new(SIDE, 0.0))
        .line_to(Point2::new(SIDE, 10.0));
    let plate = match fillet {
        Some(r) => plate
            .line_to(Point2::new(10.0 + r, 10.0))
            .arc_to(Point2::new(10.0, 10.0 + r), Point2::new(10.0 + r, 10.0 + r)),
        None => plate.line_to(Point2::new(10.0, 10.0)),
    };
    plate
        .line_to(Point2::new(10.0, SIDE))
        .line_to(Point2::new(0.0, SIDE))
}

/// A plate whose top edge bends inward by 5 degrees halfway along.
pub fn shallow_bend() -> MakePlate {
    let rise = 15.0 * 5.0_f64.to_radians().tan();
    MakePlate::new(Point2::origin(), THICKNESS)
        .line_to(Point2::new(30.0, 0.0))
        .line_to(Point2::new(30.0, 20.0))
        .line_to(Point2::new(15.0, 20.0))
        .line_to(Point2::new(0.0, 20.0 + rise))
}

/// A plate with a slot of `width` cut down from its top edge to y = 5.
pub fn slotted_plate(width: f64) -> MakePlate {
    let (right, left) = (10.0 + width / 2.0, 10.0 - width / 2.0);
    MakePlate::new(Point2::origin(), THICKNESS)
        .line_to(Point2::new(SIDE, 0.0))
        .line_to(Point2::new(SIDE, SIDE))
        .line_to(Point2::new(right, SIDE))
        .line_to(Point2::new(right, 5.0))
        .line_to(Point2::new(left, 5.0))
        .line_to(Point2::new(left, SIDE))
        .line_to(Point2::new(0.0, SIDE))
}
