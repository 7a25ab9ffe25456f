//! Primitive control-shape wires, used when a mesh fit is not wanted or not
//! possible. Sizing is mesh-aware: each template reads the associated point
//! cloud to contain the part it will drive, with a minimum size floor so the
//! control stays selectable on tiny parts.
//!
//! Wires are produced in joint-relative space (centered at the origin); the
//! host positions them at the joint afterwards.

use super::core::{Axis, BBox, Point3};

/// Number of CVs used for generated circles.
const CIRCLE_SEGMENTS: usize = 16;

/// One closed CV loop handed to the external curve builder.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveWire {
    pub points: Vec<Point3>,
    /// True for wires that must keep sharp corners (degree-1 curves).
    pub sharp: bool,
}

/// Rectangular wireframe sized to contain the cloud: 0.6x the bounding-box
/// half-extents per axis, floored at 0.3x the control scale.
///
/// The 16-point path traces all 12 box edges as a single stroke.
#[must_use]
pub fn box_wire(cloud: &[Point3], scale: f64) -> PrimitiveWire {
    let (w, h, d) = match BBox::from_points(cloud) {
        Some(bbox) => {
            let s = bbox.size();
            let floor = scale * 0.3;
            (
                (s.x * 0.6 * scale).max(floor),
                (s.y * 0.6 * scale).max(floor),
                (s.z * 0.6 * scale).max(floor),
            )
        }
        None => (scale, scale, scale),
    };

    let points = vec![
        Point3::new(-w, -h, -d),
        Point3::new(w, -h, -d),
        Point3::new(w, h, -d),
        Point3::new(-w, h, -d),
        Point3::new(-w, -h, -d),
        Point3::new(-w, -h, d),
        Point3::new(w, -h, d),
        Point3::new(w, h, d),
        Point3::new(-w, h, d),
        Point3::new(-w, -h, d),
        Point3::new(w, -h, d),
        Point3::new(w, -h, -d),
        Point3::new(w, h, -d),
        Point3::new(w, h, d),
        Point3::new(-w, h, d),
        Point3::new(-w, h, -d),
    ];

    PrimitiveWire {
        points,
        sharp: true,
    }
}

/// Flat circle of CVs around the given axis.
#[must_use]
pub fn circle_wire(radius: f64, normal: Axis) -> PrimitiveWire {
    let mut points = Vec::with_capacity(CIRCLE_SEGMENTS);
    for i in 0..CIRCLE_SEGMENTS {
        let angle = std::f64::consts::TAU * i as f64 / CIRCLE_SEGMENTS as f64;
        let (sin, cos) = angle.sin_cos();
        let p = match normal {
            Axis::X => Point3::new(0.0, cos * radius, sin * radius),
            Axis::Y => Point3::new(cos * radius, 0.0, sin * radius),
            Axis::Z => Point3::new(cos * radius, sin * radius, 0.0),
        };
        points.push(p);
    }

    PrimitiveWire {
        points,
        sharp: false,
    }
}

/// Cylinder cross-section: a Y-normal circle at 0.7x the largest XZ distance
/// from the cloud's centroid, floored at 0.3x the control scale.
#[must_use]
pub fn cylinder_wire(cloud: &[Point3], scale: f64) -> PrimitiveWire {
    let radius = if cloud.is_empty() {
        scale
    } else {
        let center = Point3::centroid(cloud);
        let max_planar = cloud
            .iter()
            .map(|p| ((p.x - center.x).powi(2) + (p.z - center.z).powi(2)).sqrt())
            .fold(0.0, f64::max);
        (max_planar * 0.7 * scale).max(scale * 0.3)
    };

    circle_wire(radius, Axis::Y)
}

/// Sphere representation: three axis-aligned circles at 0.8x the largest
/// radial distance from the cloud's centroid, floored at 0.3x the control
/// scale.
#[must_use]
pub fn sphere_wires(cloud: &[Point3], scale: f64) -> Vec<PrimitiveWire> {
    let radius = if cloud.is_empty() {
        scale
    } else {
        let center = Point3::centroid(cloud);
        let max_distance = cloud
            .iter()
            .map(|p| p.distance_to(center))
            .fold(0.0, f64::max);
        (max_distance * 0.8 * scale).max(scale * 0.3)
    };

    vec![
        circle_wire(radius, Axis::Y),
        circle_wire(radius, Axis::X),
        circle_wire(radius, Axis::Z),
    ]
}
