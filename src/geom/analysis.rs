//! Point-cloud shape analysis for the fitting heuristics.
//!
//! Weapon parts fall into a handful of silhouettes: long thin pieces
//! (magazines, barrels, triggers), moderately stretched bodies (receivers,
//! stocks) and compact chunks (bolts, bullets). The classification below is
//! empirically tuned to those asset families and should be treated as a
//! domain-specific approximation rather than a general-purpose shape
//! descriptor.

use super::core::{Axis, BBox, Point3};
use super::hull::ProjectionPlane;

/// Silhouette class derived from the elongation ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeClass {
    /// Ratio > 3.0: magazines, triggers, barrels.
    Elongated,
    /// Ratio > 1.5: receivers, stocks.
    Moderate,
    /// Everything else: bolts, bullets, small parts.
    Compact,
}

impl ShapeClass {
    #[must_use]
    pub fn from_elongation(ratio: f64) -> Self {
        if ratio > 3.0 {
            Self::Elongated
        } else if ratio > 1.5 {
            Self::Moderate
        } else {
            Self::Compact
        }
    }
}

/// Shape summary for one point cloud.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudAnalysis {
    pub centroid: Point3,
    pub bbox: BBox,
    /// Longest bounding-box axis.
    pub primary_axis: Axis,
    /// Second-longest bounding-box axis.
    pub secondary_axis: Axis,
    /// Longest extent divided by second-longest (floored at 1e-3).
    pub elongation_ratio: f64,
    /// Plane that best shows the silhouette.
    pub viewing_plane: ProjectionPlane,
    pub class: ShapeClass,
}

/// Analyze a point cloud's orientation and silhouette.
///
/// Returns `None` for clouds too small to classify (< 4 points).
#[must_use]
pub fn analyze_cloud(points: &[Point3]) -> Option<CloudAnalysis> {
    if points.len() < 4 {
        return None;
    }
    let bbox = BBox::from_points(points)?;
    let [primary, secondary, _] = bbox.axes_by_extent();

    let elongation_ratio = bbox.extent(primary) / bbox.extent(secondary).max(0.001);

    // Clearly stretched meshes get a side-on plane so the length reads;
    // anything closer to cubic falls back to the largest-area face.
    let viewing_plane = if elongation_ratio > 2.0 {
        elongated_viewing_plane(primary, secondary)
    } else {
        ProjectionPlane::dominant_for(bbox)
    };

    Some(CloudAnalysis {
        centroid: Point3::centroid(points),
        bbox,
        primary_axis: primary,
        secondary_axis: secondary,
        elongation_ratio,
        viewing_plane,
        class: ShapeClass::from_elongation(elongation_ratio),
    })
}

/// Viewing plane for an elongated mesh: the one spanned by its two longest
/// axes, so the outline captures the length rather than the cross-section.
#[must_use]
pub fn elongated_viewing_plane(primary: Axis, secondary: Axis) -> ProjectionPlane {
    match (primary, secondary) {
        (Axis::X, Axis::Y) | (Axis::Y, Axis::X) => ProjectionPlane::Xy,
        (Axis::X, Axis::Z) | (Axis::Z, Axis::X) => ProjectionPlane::Xz,
        (Axis::Y, Axis::Z) | (Axis::Z, Axis::Y) => ProjectionPlane::Yz,
        // Degenerate orderings (primary == secondary) cannot occur from
        // axes_by_extent; default to XY for safety.
        _ => ProjectionPlane::Xy,
    }
}

/// Adjust a fitted boundary for the silhouette class:
///
/// - elongated: extend each point 0.1 units along the primary axis, away
///   from the centroid, to emphasize the length;
/// - moderate: unchanged;
/// - compact: pull every point to 0.9x the mean centroid distance so the
///   outline reads as a regular loop around the part.
#[must_use]
pub fn enhance_boundary(points: &[Point3], analysis: &CloudAnalysis) -> Vec<Point3> {
    match analysis.class {
        ShapeClass::Elongated => extend_along_primary(points, analysis),
        ShapeClass::Moderate => points.to_vec(),
        ShapeClass::Compact => regularize_radius(points, analysis),
    }
}

fn extend_along_primary(points: &[Point3], analysis: &CloudAnalysis) -> Vec<Point3> {
    let axis = analysis.primary_axis;
    let center = analysis.centroid.component(axis);

    points
        .iter()
        .map(|p| {
            let direction = if p.component(axis) > center { 1.0 } else { -1.0 };
            p.with_component(axis, p.component(axis) + direction * 0.1)
        })
        .collect()
}

fn regularize_radius(points: &[Point3], analysis: &CloudAnalysis) -> Vec<Point3> {
    let center = analysis.centroid;
    let distances: Vec<f64> = points.iter().map(|p| p.distance_to(center)).collect();
    let total: f64 = distances.iter().sum();
    if points.is_empty() || total <= 0.0 {
        return points.to_vec();
    }
    let mean_distance = total / points.len() as f64;

    points
        .iter()
        .zip(&distances)
        .map(|(p, &len)| {
            if len > 0.0 {
                // Slightly inside the mean radius for a tighter fit.
                let factor = mean_distance * 0.9 / len;
                center.add_vec(p.sub_point(center) * factor)
            } else {
                *p
            }
        })
        .collect()
}
