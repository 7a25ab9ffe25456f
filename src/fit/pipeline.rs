//! Control-curve fitting pipeline.
//!
//! Chains the geometry stages into one pass from a mesh's world-space vertex
//! cloud to an ordered CV loop: relative points, clustering, planar hull,
//! silhouette enhancement, simplification, then the per-joint transform.
//! Every stage is pure; a stage that would hand fewer than 3 points to the
//! next one aborts the fit instead.

use log::{debug, warn};
use thiserror::Error;

use crate::fit::config::{ControlShape, FitConfig, clamp_smoothness};
use crate::geom::{
    CloudAnalysis, ClusterDiagnostics, ClusterOptions, EnhanceDiagnostics, EnhanceOptions,
    HullDiagnostics, Point3, PrimitiveWire, analyze_cloud, apply_joint_transform, box_wire,
    cluster_points, cylinder_wire, enhance_boundary, enhance_outline, planar_hull,
    scale_about_centroid, sphere_wires, to_relative_points,
};

/// Errors from the fitting pipeline.
#[derive(Debug, Error)]
pub enum FitError {
    #[error("empty vertex cloud, nothing to fit")]
    EmptyCloud,
    /// Too few points survived a stage to form a closed curve.
    #[error("{stage} stage left {points} points, need at least 3")]
    DegenerateStage { stage: &'static str, points: usize },
}

/// One closed control curve ready for the external curve builder.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedCurve {
    /// Ordered CVs. The loop is implicit; the first point is not repeated.
    pub points: Vec<Point3>,
    /// Build as a periodic (closed, smooth) curve.
    pub periodic: bool,
    /// Build as a degree-1 curve to keep hard corners.
    pub sharp: bool,
}

impl FittedCurve {
    fn smooth(points: Vec<Point3>) -> Self {
        Self {
            points,
            periodic: true,
            sharp: false,
        }
    }
}

impl From<PrimitiveWire> for FittedCurve {
    fn from(wire: PrimitiveWire) -> Self {
        Self {
            periodic: !wire.sharp,
            sharp: wire.sharp,
            points: wire.points,
        }
    }
}

/// What each stage did, for host-side status displays and logs.
#[derive(Debug, Clone, Default)]
pub struct FitDiagnostics {
    pub cluster: ClusterDiagnostics,
    pub hull: HullDiagnostics,
    pub enhance: EnhanceDiagnostics,
    /// `None` when the cloud was too small to classify.
    pub analysis: Option<CloudAnalysis>,
}

/// Result of fitting one joint's control.
#[derive(Debug, Clone)]
pub struct FitOutput {
    /// One curve for fitted and most primitive shapes; three for spheres.
    pub curves: Vec<FittedCurve>,
    /// Present only for mesh fits.
    pub diagnostics: Option<FitDiagnostics>,
}

/// Fit a control curve to a mesh vertex cloud.
///
/// `cloud` is the mesh's world-space vertices; `reference` is the driven
/// joint's world position; the output CVs are joint-relative. The stages run
/// in order and any of them dropping below 3 points is an error.
///
/// # Errors
///
/// [`FitError::EmptyCloud`] for an empty input, [`FitError::DegenerateStage`]
/// when clustering, hull projection, or simplification collapse the outline.
pub fn fit_outline(
    cloud: &[Point3],
    reference: Point3,
    config: &FitConfig,
) -> Result<(FittedCurve, FitDiagnostics), FitError> {
    if cloud.is_empty() {
        return Err(FitError::EmptyCloud);
    }

    let relative = to_relative_points(cloud, reference);
    ensure_stage("extract", relative.len())?;

    let (clustered, cluster_diag) = cluster_points(&relative, ClusterOptions::default());
    debug!(
        "cluster: {} -> {} points (radius {:.4})",
        cluster_diag.input_point_count, cluster_diag.output_point_count, cluster_diag.radius
    );
    ensure_stage("cluster", clustered.len())?;

    let (hull, hull_diag) = planar_hull(&clustered);
    debug!(
        "hull: {} -> {} points on {:?}",
        hull_diag.input_point_count, hull_diag.output_point_count, hull_diag.plane
    );
    ensure_stage("hull", hull.len())?;

    // Silhouette-aware tweak before simplification; skipped for clouds too
    // small to classify.
    let analysis = analyze_cloud(&relative);
    let boundary = match &analysis {
        Some(analysis) => enhance_boundary(&hull, analysis),
        None => hull,
    };

    let options = EnhanceOptions::new(clamp_smoothness(config.smoothness));
    let (outline, enhance_diag) = enhance_outline(&boundary, options);
    debug!(
        "enhance: {} -> {} points (tolerance {:.3})",
        enhance_diag.input_point_count, enhance_diag.output_point_count, enhance_diag.tolerance_used
    );
    if enhance_diag.stride_fallback {
        warn!("simplification fell back to stride sampling");
    }
    ensure_stage("enhance", outline.len())?;

    let scaled = scale_about_centroid(&outline, config.control_scale);
    let placed = apply_joint_transform(&scaled, config.offset(), config.rotation());

    let diagnostics = FitDiagnostics {
        cluster: cluster_diag,
        hull: hull_diag,
        enhance: enhance_diag,
        analysis,
    };
    Ok((FittedCurve::smooth(placed), diagnostics))
}

/// Build the control for one joint, honoring the configured shape.
///
/// `ControlShape::Custom` runs the full mesh fit; the primitive shapes size
/// their template from the joint-relative cloud instead. A failed mesh fit is
/// an error, not a silent primitive fallback; callers that want the fallback
/// chain it explicitly.
///
/// # Errors
///
/// See [`fit_outline`]; primitive shapes only fail on an empty cloud.
pub fn fit_control(
    cloud: &[Point3],
    reference: Point3,
    config: &FitConfig,
) -> Result<FitOutput, FitError> {
    if config.control_shape == ControlShape::Custom {
        let (curve, diagnostics) = fit_outline(cloud, reference, config)?;
        return Ok(FitOutput {
            curves: vec![curve],
            diagnostics: Some(diagnostics),
        });
    }

    if cloud.is_empty() {
        return Err(FitError::EmptyCloud);
    }
    let relative = to_relative_points(cloud, reference);

    let wires: Vec<PrimitiveWire> = match config.control_shape {
        ControlShape::Box => vec![box_wire(&relative, config.control_scale)],
        ControlShape::Cylinder => vec![cylinder_wire(&relative, config.control_scale)],
        ControlShape::Sphere => sphere_wires(&relative, config.control_scale),
        ControlShape::Custom => unreachable!(),
    };

    let mut curves: Vec<FittedCurve> = wires.into_iter().map(FittedCurve::from).collect();
    for curve in &mut curves {
        curve.points = apply_joint_transform(&curve.points, config.offset(), config.rotation());
    }

    Ok(FitOutput {
        curves,
        diagnostics: None,
    })
}

const fn ensure_stage(stage: &'static str, points: usize) -> Result<(), FitError> {
    if points < 3 {
        Err(FitError::DegenerateStage { stage, points })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::config::ControlColor;

    /// Vertex ring around the origin, like a simplified receiver cross
    /// section.
    fn ring_cloud(count: usize, radius: f64) -> Vec<Point3> {
        (0..count)
            .map(|i| {
                let angle = std::f64::consts::TAU * i as f64 / count as f64;
                Point3::new(angle.cos() * radius, angle.sin() * radius, 0.0)
            })
            .collect()
    }

    #[test]
    fn test_fit_outline_produces_closed_curve() {
        let cloud = ring_cloud(64, 3.0);
        let config = FitConfig::default();

        let (curve, diagnostics) = fit_outline(&cloud, Point3::ORIGIN, &config).unwrap();

        assert!(curve.periodic);
        assert!(curve.points.len() >= 3);
        assert_eq!(diagnostics.cluster.input_point_count, 64);
        assert!(diagnostics.hull.plane.is_some());
    }

    #[test]
    fn test_fit_outline_respects_reference_point() {
        let reference = Point3::new(10.0, 0.0, 0.0);
        let cloud: Vec<Point3> = ring_cloud(32, 2.0)
            .into_iter()
            .map(|p| Point3::new(p.x + 10.0, p.y, p.z))
            .collect();

        let (curve, _) = fit_outline(&cloud, reference, &FitConfig::default()).unwrap();

        // Output is joint-relative: centered near the origin.
        let centroid = Point3::centroid(&curve.points);
        assert!(centroid.distance_to(Point3::ORIGIN) < 0.5);
    }

    #[test]
    fn test_empty_cloud_is_an_error() {
        let err = fit_outline(&[], Point3::ORIGIN, &FitConfig::default()).unwrap_err();
        assert!(matches!(err, FitError::EmptyCloud));
    }

    #[test]
    fn test_degenerate_cloud_is_an_error() {
        let cloud = [Point3::ORIGIN, Point3::new(1.0, 0.0, 0.0)];
        let err = fit_outline(&cloud, Point3::ORIGIN, &FitConfig::default()).unwrap_err();
        assert!(matches!(err, FitError::DegenerateStage { .. }));
    }

    #[test]
    fn test_input_cloud_is_not_mutated() {
        let cloud = ring_cloud(40, 1.0);
        let before = cloud.clone();
        let _ = fit_outline(&cloud, Point3::ORIGIN, &FitConfig::default());
        assert_eq!(cloud, before);
    }

    #[test]
    fn test_primitive_shape_skips_the_fit() {
        let cloud = ring_cloud(8, 2.0);
        let config = FitConfig::new()
            .with_shape(ControlShape::Box)
            .with_color(ControlColor::Blue);

        let output = fit_control(&cloud, Point3::ORIGIN, &config).unwrap();

        assert_eq!(output.curves.len(), 1);
        assert!(output.curves[0].sharp);
        assert!(output.diagnostics.is_none());
    }

    #[test]
    fn test_sphere_shape_yields_a_triad() {
        let cloud = ring_cloud(8, 2.0);
        let config = FitConfig::new().with_shape(ControlShape::Sphere);

        let output = fit_control(&cloud, Point3::ORIGIN, &config).unwrap();
        assert_eq!(output.curves.len(), 3);
        assert!(output.curves.iter().all(|c| c.periodic));
    }

    #[test]
    fn test_offset_moves_the_fitted_curve() {
        let cloud = ring_cloud(32, 2.0);
        let config = FitConfig::new().with_offset(0.0, 5.0, 0.0);

        let (curve, _) = fit_outline(&cloud, Point3::ORIGIN, &config).unwrap();
        let centroid = Point3::centroid(&curve.points);
        assert!((centroid.y - 5.0).abs() < 0.5);
    }
}
