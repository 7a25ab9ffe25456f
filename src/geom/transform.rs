//! Per-joint transform application: uniform scaling and Euler rotation about
//! a point set's own centroid, followed by a fixed offset.
//!
//! Rotation is composed as three planar rotations in X, then Y, then Z order
//! (degrees). Zero-angle rotations are skipped; that is an optimization, not
//! a semantic difference, since the zero rotation is the identity. Angles are
//! not normalized or clamped here - the configuration layer owns the UI range.

use super::core::{Point3, Vec3};

/// Uniformly scale points about their own centroid.
///
/// A factor of 1.0 returns the input unchanged.
#[must_use]
pub fn scale_about_centroid(points: &[Point3], factor: f64) -> Vec<Point3> {
    if factor == 1.0 {
        return points.to_vec();
    }
    let center = Point3::centroid(points);
    points
        .iter()
        .map(|p| center.add_vec(p.sub_point(center) * factor))
        .collect()
}

/// Rotate points about their own centroid by Euler angles in degrees, in
/// X→Y→Z order, then translate by `offset`.
///
/// With a zero offset and zero angles this is a point-for-point no-op.
#[must_use]
pub fn apply_joint_transform(points: &[Point3], offset: Vec3, rotation_degrees: Vec3) -> Vec<Point3> {
    let no_offset = offset == Vec3::ZERO;
    let no_rotation = rotation_degrees == Vec3::ZERO;
    if no_offset && no_rotation {
        return points.to_vec();
    }

    let center = Point3::centroid(points);

    points
        .iter()
        .map(|p| {
            let mut relative = p.sub_point(center);

            if rotation_degrees.x != 0.0 {
                let (sin, cos) = rotation_degrees.x.to_radians().sin_cos();
                let y = relative.y * cos - relative.z * sin;
                let z = relative.y * sin + relative.z * cos;
                relative.y = y;
                relative.z = z;
            }

            if rotation_degrees.y != 0.0 {
                let (sin, cos) = rotation_degrees.y.to_radians().sin_cos();
                let x = relative.x * cos + relative.z * sin;
                let z = -relative.x * sin + relative.z * cos;
                relative.x = x;
                relative.z = z;
            }

            if rotation_degrees.z != 0.0 {
                let (sin, cos) = rotation_degrees.z.to_radians().sin_cos();
                let x = relative.x * cos - relative.y * sin;
                let y = relative.x * sin + relative.y * cos;
                relative.x = x;
                relative.y = y;
            }

            center.add_vec(relative).add_vec(offset)
        })
        .collect()
}

/// Re-express world-space points relative to a reference position (typically
/// the joint the fitted control will drive).
#[must_use]
pub fn to_relative_points(points: &[Point3], reference: Point3) -> Vec<Point3> {
    points
        .iter()
        .map(|p| Point3::ORIGIN.add_vec(p.sub_point(reference)))
        .collect()
}
