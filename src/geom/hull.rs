//! Planar hull projection: flatten a 3D point set onto its dominant
//! coordinate plane and trace the 2D convex hull of the result.
//!
//! The projection plane is the bounding-box face with the largest area, on
//! the assumption that it shows the most shape detail. The dropped coordinate
//! is replaced by its mean so the lifted hull lands in the middle of the
//! cloud rather than on one of its faces.

use super::core::{Axis, BBox, Point3};

/// Coordinate plane a point set is projected onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectionPlane {
    Xy,
    Xz,
    Yz,
}

impl ProjectionPlane {
    /// The axis dropped by this projection.
    #[must_use]
    pub const fn dropped_axis(self) -> Axis {
        match self {
            Self::Xy => Axis::Z,
            Self::Xz => Axis::Y,
            Self::Yz => Axis::X,
        }
    }

    /// The two axes kept by this projection, in (u, v) order.
    #[must_use]
    pub const fn kept_axes(self) -> (Axis, Axis) {
        match self {
            Self::Xy => (Axis::X, Axis::Y),
            Self::Xz => (Axis::X, Axis::Z),
            Self::Yz => (Axis::Y, Axis::Z),
        }
    }

    /// Pick the plane with the largest bounding-box face area. Ties prefer
    /// XY, then XZ, matching the original heuristic's comparison order.
    #[must_use]
    pub fn dominant_for(bbox: BBox) -> Self {
        let (xy, xz, yz) = bbox.face_areas();
        if xy >= xz && xy >= yz {
            Self::Xy
        } else if xz >= yz {
            Self::Xz
        } else {
            Self::Yz
        }
    }

    /// Project a point onto this plane as (u, v).
    #[must_use]
    pub fn project(self, p: Point3) -> (f64, f64) {
        let (u, v) = self.kept_axes();
        (p.component(u), p.component(v))
    }

    /// Lift a (u, v) pair back to 3D with the dropped coordinate fixed.
    #[must_use]
    pub fn lift(self, uv: (f64, f64), dropped: f64) -> Point3 {
        let (ua, va) = self.kept_axes();
        Point3::ORIGIN
            .with_component(ua, uv.0)
            .with_component(va, uv.1)
            .with_component(self.dropped_axis(), dropped)
    }
}

/// Diagnostics for a hull projection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HullDiagnostics {
    /// Number of input points.
    pub input_point_count: usize,
    /// Number of hull points.
    pub output_point_count: usize,
    /// Plane the points were projected onto, `None` when the degenerate
    /// passthrough was taken.
    pub plane: Option<ProjectionPlane>,
    /// Number of exact duplicates discarded before the scan.
    pub duplicates_removed: usize,
}

/// Project `points` onto their dominant coordinate plane and return the
/// convex hull as an ordered polygon lifted back into 3D.
///
/// Degenerate inputs (fewer than 3 unique points after dedup, or no bounding
/// box) are returned unchanged; callers treat the result as "no hull".
#[must_use]
pub fn planar_hull(points: &[Point3]) -> (Vec<Point3>, HullDiagnostics) {
    let mut diagnostics = HullDiagnostics {
        input_point_count: points.len(),
        output_point_count: points.len(),
        plane: None,
        duplicates_removed: 0,
    };

    let Some(bbox) = BBox::from_points(points) else {
        return (points.to_vec(), diagnostics);
    };

    let plane = ProjectionPlane::dominant_for(bbox);
    let dropped_axis = plane.dropped_axis();
    let dropped_mean =
        points.iter().map(|p| p.component(dropped_axis)).sum::<f64>() / points.len() as f64;

    let projected: Vec<(f64, f64)> = points.iter().map(|p| plane.project(*p)).collect();
    let unique = dedup_exact(&projected);
    diagnostics.duplicates_removed = projected.len() - unique.len();

    if unique.len() < 3 {
        // No polygon to trace; hand the input back untouched.
        return (points.to_vec(), diagnostics);
    }

    let hull = graham_scan(&unique);
    diagnostics.plane = Some(plane);
    diagnostics.output_point_count = hull.len();

    let lifted = hull
        .into_iter()
        .map(|uv| plane.lift(uv, dropped_mean))
        .collect();

    (lifted, diagnostics)
}

/// 2D convex hull via Graham scan.
///
/// Anchor is the lowest-then-leftmost point; remaining points are sorted by
/// polar angle around it and swept, popping any point that would make a
/// non-left turn. Collinear points on the hull edge are dropped.
#[must_use]
pub fn graham_scan(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let anchor = *points
        .iter()
        .min_by(|a, b| {
            (a.1, a.0)
                .partial_cmp(&(b.1, b.0))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("non-empty point set");

    // Equal angles sort near-to-far so the sweep pops the nearer point and
    // keeps the true extreme.
    let mut sorted: Vec<(f64, f64)> = points.iter().copied().filter(|p| *p != anchor).collect();
    sorted.sort_by(|a, b| {
        let key = |p: &(f64, f64)| {
            let dx = p.0 - anchor.0;
            let dy = p.1 - anchor.1;
            (dy.atan2(dx), dx * dx + dy * dy)
        };
        key(a)
            .partial_cmp(&key(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut hull = vec![anchor];
    for point in sorted {
        while hull.len() >= 2
            && cross_2d(hull[hull.len() - 2], hull[hull.len() - 1], point) <= 0.0
        {
            hull.pop();
        }
        hull.push(point);
    }

    hull
}

/// Sign of the z-component of `(a - o) × (b - o)`. Positive for a left turn.
#[must_use]
pub fn cross_2d(o: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

/// Drop exact (bitwise) duplicates, keeping first occurrences in order.
fn dedup_exact(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut unique: Vec<(f64, f64)> = Vec::with_capacity(points.len());
    for p in points {
        if !unique
            .iter()
            .any(|q| q.0.to_bits() == p.0.to_bits() && q.1.to_bits() == p.1.to_bits())
        {
            unique.push(*p);
        }
    }
    unique
}
