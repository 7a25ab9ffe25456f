use std::fs;
use std::path::PathBuf;

use rigfit_engine::FitSession;
use rigfit_engine::fit::{ControlColor, ControlShape, FitConfig, fit_outline};
use rigfit_engine::geom::Point3;
use rigfit_engine::presets::RetargetPreset;

/// A boxy vertex cloud around the given center, like a magazine mesh.
fn part_cloud(center: Point3, hx: f64, hy: f64, hz: f64, per_edge: usize) -> Vec<Point3> {
    let mut points = Vec::new();
    for i in 0..per_edge {
        for j in 0..per_edge {
            for k in 0..per_edge {
                let t = |n: usize| n as f64 / (per_edge - 1) as f64 * 2.0 - 1.0;
                points.push(Point3::new(
                    center.x + t(i) * hx,
                    center.y + t(j) * hy,
                    center.z + t(k) * hz,
                ));
            }
        }
    }
    points
}

fn temp_master_path(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rigfit-it-{tag}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn full_fit_from_cloud_to_curve() {
    let joint_position = Point3::new(4.0, 12.0, 0.5);
    let cloud = part_cloud(joint_position, 3.0, 1.0, 1.0, 6);

    let config = FitConfig::default();
    let (curve, diagnostics) = fit_outline(&cloud, joint_position, &config).unwrap();

    assert!(curve.periodic);
    // Outline lands within the configured smoothness band after midpoint
    // insertion doubles the adjusted count.
    assert!(curve.points.len() >= 8);
    assert!(curve.points.len() <= config.smoothness * 3);

    // 216 vertices were clustered down to the cap before the hull.
    assert_eq!(diagnostics.cluster.input_point_count, 216);
    assert!(diagnostics.cluster.output_point_count <= 20);
    assert!(diagnostics.hull.plane.is_some());

    // Joint-relative output: centered near the origin despite the offset
    // cloud.
    let centroid = Point3::centroid(&curve.points);
    assert!(centroid.distance_to(Point3::ORIGIN) < 1.0);
}

#[test]
fn saved_settings_drive_the_next_fit() {
    let master = temp_master_path("session");
    let joints = ["AK74_jnt_magazine", "AK74_jnt_root"];
    let meshes = ["SM_wpn_ak74_magazine"];

    let mut session = FitSession::detect(joints, meshes, &master)
        .unwrap()
        .expect("weapon detected");
    assert_eq!(session.weapon_id(), "AK74");
    assert!(
        session
            .weapon_path()
            .unwrap()
            .ends_with("Source/Weapons/ar/ak74")
    );

    // Tweak one joint and persist.
    let config = FitConfig::new()
        .with_offset(0.0, 2.0, 0.0)
        .with_color(ControlColor::Yellow)
        .with_smoothness(12);
    session.set_config("AK74_jnt_magazine", config.clone()).unwrap();

    // A second session for the same weapon sees the tweak.
    let reopened = FitSession::open("AK74", &master).unwrap();
    assert_eq!(reopened.config_for("AK74_jnt_magazine"), config);
    assert_eq!(reopened.config_for("AK74_jnt_root"), FitConfig::default());

    // And the fit honors the stored offset.
    let cloud = part_cloud(Point3::ORIGIN, 2.0, 2.0, 2.0, 4);
    let output = reopened
        .fit_joint("AK74_jnt_magazine", &cloud, Point3::ORIGIN)
        .unwrap();
    let centroid = Point3::centroid(&output.curves[0].points);
    assert!((centroid.y - 2.0).abs() < 0.5);

    let _ = fs::remove_dir_all(&master);
}

#[test]
fn primitive_shape_settings_bypass_the_mesh_fit() {
    let master = temp_master_path("primitive");
    let mut session = FitSession::open("gauss", &master).unwrap();

    session
        .set_config("GAUSS_jnt_core", FitConfig::new().with_shape(ControlShape::Sphere))
        .unwrap();

    let cloud = part_cloud(Point3::ORIGIN, 1.0, 1.0, 1.0, 3);
    let output = session
        .fit_joint("GAUSS_jnt_core", &cloud, Point3::ORIGIN)
        .unwrap();

    assert_eq!(output.curves.len(), 3);
    assert!(output.diagnostics.is_none());

    let _ = fs::remove_dir_all(&master);
}

#[test]
fn namespaced_joints_share_cache_entries() {
    let master = temp_master_path("namespace");
    let mut session = FitSession::open("toz34", &master).unwrap();

    let config = FitConfig::new().with_scale(1.5);
    session.set_config("rig:TOZ34_jnt_barrel", config.clone()).unwrap();

    assert_eq!(session.config_for("TOZ34_jnt_barrel"), config);
    assert_eq!(session.config_for("other:TOZ34_jnt_barrel"), config);

    let _ = fs::remove_dir_all(&master);
}

#[test]
fn retarget_preset_round_trips_through_disk() {
    let master = temp_master_path("preset");
    fs::create_dir_all(&master).unwrap();
    let path = master.join("stalker2_to_rig.json");

    let json = r#"{
        "jnt_root": {"align_position": true},
        "jnt_weapon": {"align_position": false, "rotate": [0.0, -90.0, 0.0]},
        "post_bake_operations": [
            {"type": "translate", "object": "S2_Controls", "values": [0.0, 0.0, 0.0], "relative": true}
        ]
    }"#;
    fs::write(&path, json).unwrap();

    let preset = RetargetPreset::load(&path).unwrap();
    assert_eq!(preset.joints.len(), 2);
    assert!(!preset.settings_for("jnt_weapon").align_position);

    let copy = master.join("copy.json");
    preset.save(&copy).unwrap();
    assert_eq!(RetargetPreset::load(&copy).unwrap(), preset);

    let _ = fs::remove_dir_all(&master);
}
