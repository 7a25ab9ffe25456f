mod analysis;
mod cluster;
mod core;
mod hull;
mod shapes;
mod simplify;
mod transform;

pub use analysis::{
    CloudAnalysis, ShapeClass, analyze_cloud, elongated_viewing_plane, enhance_boundary,
};
pub use cluster::{ClusterDiagnostics, ClusterOptions, cluster_points, cluster_radius};
pub use core::{Axis, BBox, Point3, Tolerance, Vec3};
pub use hull::{HullDiagnostics, ProjectionPlane, cross_2d, graham_scan, planar_hull};
pub use shapes::{PrimitiveWire, box_wire, circle_wire, cylinder_wire, sphere_wires};
pub use simplify::{
    EnhanceDiagnostics, EnhanceOptions, add_intermediate_points, douglas_peucker_3d,
    enhance_outline, interpolate_to_count, point_segment_distance,
};
pub use transform::{apply_joint_transform, scale_about_centroid, to_relative_points};

#[cfg(test)]
mod tests;
