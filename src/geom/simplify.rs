//! Control-point budget driver for fitted outlines.
//!
//! Takes the ordered polygon from the hull stage and pushes its point count
//! toward a target "smoothness" value: too few points get linear
//! interpolation, far too many get Ramer-Douglas-Peucker simplification with
//! an escalating tolerance (stride sampling as a last resort), and every
//! result gets one midpoint inserted between consecutive pairs so the curve
//! builder has enough CVs to stay smooth.

use super::core::{Point3, Tolerance};

/// Options for the simplify/enhance stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnhanceOptions {
    /// Target control-point count (the UI's "smoothness", 8-40).
    pub target_points: usize,
    /// Starting RDP tolerance for over-dense inputs.
    pub initial_tolerance: f64,
    /// Multiplier applied to the tolerance on each retry.
    pub tolerance_growth: f64,
    /// Tolerance ceiling; past this the stride-sampling fallback takes over.
    pub max_tolerance: f64,
}

impl EnhanceOptions {
    #[must_use]
    pub const fn new(target_points: usize) -> Self {
        Self {
            target_points,
            initial_tolerance: 0.05,
            tolerance_growth: 1.5,
            max_tolerance: 1.0,
        }
    }

    /// Minimum acceptable point count: a third of the target, floored at 8.
    #[must_use]
    pub const fn min_points(self) -> usize {
        let third = self.target_points / 3;
        if third > 8 { third } else { 8 }
    }
}

impl Default for EnhanceOptions {
    fn default() -> Self {
        Self::new(20)
    }
}

/// Diagnostics for the simplify/enhance stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnhanceDiagnostics {
    /// Number of input points.
    pub input_point_count: usize,
    /// Point count after the density adjustment, before midpoint insertion.
    pub adjusted_point_count: usize,
    /// Number of output points.
    pub output_point_count: usize,
    /// Final RDP tolerance, 0.0 when simplification was not needed.
    pub tolerance_used: f64,
    /// True when RDP could not reach the budget and stride sampling ran.
    pub stride_fallback: bool,
}

/// Drive an ordered outline toward the configured point budget, then insert
/// midpoints for smoothness.
///
/// Inputs with fewer than 3 points are returned unchanged - there is no
/// outline to enhance.
#[must_use]
pub fn enhance_outline(
    points: &[Point3],
    options: EnhanceOptions,
) -> (Vec<Point3>, EnhanceDiagnostics) {
    let mut diagnostics = EnhanceDiagnostics {
        input_point_count: points.len(),
        ..Default::default()
    };

    if points.len() < 3 {
        diagnostics.adjusted_point_count = points.len();
        diagnostics.output_point_count = points.len();
        return (points.to_vec(), diagnostics);
    }

    let target = options.target_points;
    let min_points = options.min_points();

    let adjusted = if points.len() < min_points {
        interpolate_to_count(points, min_points)
    } else if points.len() > target * 2 {
        let (simplified, tolerance, stride) = simplify_to_budget(points, options);
        diagnostics.tolerance_used = tolerance;
        diagnostics.stride_fallback = stride;
        simplified
    } else {
        points.to_vec()
    };

    diagnostics.adjusted_point_count = adjusted.len();

    let smooth = add_intermediate_points(&adjusted);
    log::debug!(
        "enhanced outline: {} -> {} points (target {})",
        points.len(),
        smooth.len(),
        target
    );

    diagnostics.output_point_count = smooth.len();
    (smooth, diagnostics)
}

/// Grow a sparse polyline toward `target_count` by lerping up to two extra
/// points into each remaining segment.
#[must_use]
pub fn interpolate_to_count(points: &[Point3], target_count: usize) -> Vec<Point3> {
    if points.len() >= target_count || points.len() < 2 {
        return points.to_vec();
    }

    let mut interpolated = vec![points[0]];

    for i in 0..points.len() - 1 {
        let current = points[i];
        let next = points[i + 1];

        if i > 0 {
            interpolated.push(current);
        }

        let remaining_segments = points.len() - 1 - i;
        let remaining_target = target_count.saturating_sub(interpolated.len());

        if remaining_segments > 0 && remaining_target > 1 {
            let intermediate_count = (remaining_target / remaining_segments).min(2);
            for j in 1..=intermediate_count {
                let t = j as f64 / (intermediate_count + 1) as f64;
                interpolated.push(current.lerp(next, t));
            }
        }
    }

    interpolated.push(points[points.len() - 1]);
    interpolated
}

/// Insert one midpoint between every consecutive pair. Always applied as the
/// final smoothing step before curve construction.
#[must_use]
pub fn add_intermediate_points(points: &[Point3]) -> Vec<Point3> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut smooth = Vec::with_capacity(points.len() * 2 - 1);
    for i in 0..points.len() {
        smooth.push(points[i]);
        if i < points.len() - 1 {
            smooth.push(points[i].midpoint(points[i + 1]));
        }
    }
    smooth
}

/// Shape-preserving reduction toward the target: RDP with escalating
/// tolerance, stride sampling when the ceiling is hit.
fn simplify_to_budget(points: &[Point3], options: EnhanceOptions) -> (Vec<Point3>, f64, bool) {
    let target = options.target_points;
    let budget = target + target / 2; // 1.5x target

    let mut tolerance = options.initial_tolerance;
    let mut simplified = douglas_peucker_3d(points, tolerance);

    while simplified.len() > budget && tolerance < options.max_tolerance {
        tolerance *= options.tolerance_growth;
        simplified = douglas_peucker_3d(points, tolerance);
    }

    if simplified.len() > budget {
        let step = (simplified.len() / target).max(1);
        let strided: Vec<Point3> = simplified.iter().step_by(step).copied().collect();
        return (strided, tolerance, true);
    }

    (simplified, tolerance, false)
}

/// Ramer-Douglas-Peucker line simplification for 3D polylines.
///
/// Recursively keeps the point farthest from the segment joining the current
/// subrange's endpoints whenever that distance exceeds `tolerance`, otherwise
/// collapses the subrange to its endpoints.
#[must_use]
pub fn douglas_peucker_3d(points: &[Point3], tolerance: f64) -> Vec<Point3> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut mask = vec![false; points.len()];
    mask[0] = true;
    mask[points.len() - 1] = true;
    rdp_recursive(points, tolerance, 0, points.len() - 1, &mut mask);

    points
        .iter()
        .zip(&mask)
        .filter_map(|(p, keep)| keep.then_some(*p))
        .collect()
}

fn rdp_recursive(points: &[Point3], tolerance: f64, start: usize, end: usize, mask: &mut [bool]) {
    if end <= start + 1 {
        return;
    }

    let mut max_index = start;
    let mut max_distance = -1.0;

    for i in start + 1..end {
        let d = point_segment_distance(points[i], points[start], points[end]);
        if d > max_distance {
            max_distance = d;
            max_index = i;
        }
    }

    if max_distance > tolerance {
        mask[max_index] = true;
        rdp_recursive(points, tolerance, start, max_index, mask);
        rdp_recursive(points, tolerance, max_index, end, mask);
    }
}

/// Distance from `point` to the segment `a`..`b`, with the projection
/// clamped to the segment rather than the infinite line.
#[must_use]
pub fn point_segment_distance(point: Point3, a: Point3, b: Point3) -> f64 {
    let ab = b - a;
    let ap = point - a;
    let ab_len_sq = ab.length_squared();
    if Tolerance::ZERO_LENGTH.is_zero_length(ab_len_sq) {
        return ap.length();
    }
    let t = (ap.dot(ab) / ab_len_sq).clamp(0.0, 1.0);
    let projection = a + ab * t;
    point.distance_to(projection)
}
