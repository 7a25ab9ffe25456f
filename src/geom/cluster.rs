//! Vertex clustering: reduce a dense vertex cloud to a small set of
//! spatially representative boundary points.
//!
//! This is a greedy farthest-point pass, not k-means: points are visited in
//! order of decreasing distance from the centroid (boundary points tend to be
//! farthest) and accepted only when no previously accepted point lies within
//! the cluster radius. Deterministic, single pass, O(n·k) with k ≤ the
//! configured maximum.

use super::core::{BBox, Point3};

/// Options for vertex clustering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterOptions {
    /// Hard cap on the number of accepted representatives.
    pub max_points: usize,
    /// Minimum acceptable cluster count before the unclustered fallback kicks in.
    pub min_points: usize,
    /// Cluster radius as a fraction of the mean bounding-box edge length.
    pub radius_fraction: f64,
    /// Lower clamp for the derived radius, in world units.
    pub radius_min: f64,
    /// Upper clamp for the derived radius, in world units.
    pub radius_max: f64,
}

impl ClusterOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_points: 20,
            min_points: 8,
            radius_fraction: 0.15,
            radius_min: 0.01,
            radius_max: 5.0,
        }
    }
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Diagnostics for a clustering pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterDiagnostics {
    /// Number of input points.
    pub input_point_count: usize,
    /// Number of output points.
    pub output_point_count: usize,
    /// Radius used for the greedy pass, 0.0 when the input was passed through.
    pub radius: f64,
    /// True when too few clusters survived and the farthest-points fallback produced the output.
    pub fallback_used: bool,
}

/// Reduce `points` to at most `options.max_points` spatially representative
/// boundary points.
///
/// Inputs at or below the cap are returned unchanged. If the greedy pass
/// accepts fewer than `options.min_points`, the output falls back to the
/// farthest `max(min_points, n/4)` points, unclustered.
#[must_use]
pub fn cluster_points(
    points: &[Point3],
    options: ClusterOptions,
) -> (Vec<Point3>, ClusterDiagnostics) {
    let mut diagnostics = ClusterDiagnostics {
        input_point_count: points.len(),
        ..Default::default()
    };

    if points.len() <= options.max_points {
        diagnostics.output_point_count = points.len();
        return (points.to_vec(), diagnostics);
    }

    let radius = cluster_radius(points, options);
    diagnostics.radius = radius;

    let centroid = Point3::centroid(points);

    // Farthest first: the boundary is where the interesting points live.
    let mut by_distance: Vec<(f64, usize)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (p.distance_squared_to(centroid), i))
        .collect();
    by_distance.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let radius_squared = radius * radius;
    let mut clustered: Vec<Point3> = Vec::with_capacity(options.max_points);

    for &(_, index) in &by_distance {
        let candidate = points[index];
        let is_new_cluster = clustered
            .iter()
            .all(|accepted| accepted.distance_squared_to(candidate) >= radius_squared);

        if is_new_cluster {
            clustered.push(candidate);
            if clustered.len() >= options.max_points {
                break;
            }
        }
    }

    if clustered.len() < options.min_points {
        // Too aggressive for this cloud; take the farthest points as-is.
        let take = options.min_points.max(points.len() / 4);
        clustered = by_distance
            .iter()
            .take(take)
            .map(|&(_, index)| points[index])
            .collect();
        diagnostics.fallback_used = true;
    }

    log::debug!(
        "clustered {} vertices down to {} representative points (radius {:.4})",
        points.len(),
        clustered.len(),
        radius
    );

    diagnostics.output_point_count = clustered.len();
    (clustered, diagnostics)
}

/// Radius for the greedy pass: a fraction of the mean bounding-box edge
/// length, clamped to keep tiny and huge meshes workable.
#[must_use]
pub fn cluster_radius(points: &[Point3], options: ClusterOptions) -> f64 {
    let Some(bbox) = BBox::from_points(points) else {
        return options.radius_min;
    };
    (bbox.mean_edge() * options.radius_fraction).clamp(options.radius_min, options.radius_max)
}
