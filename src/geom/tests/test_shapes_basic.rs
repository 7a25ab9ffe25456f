//! Tests for the primitive control-shape templates.

use crate::geom::{Axis, Point3, Tolerance, box_wire, circle_wire, cylinder_wire, sphere_wires};

#[test]
fn box_wire_traces_a_closed_edge_path() {
    let wire = box_wire(&[], 1.0);

    assert_eq!(wire.points.len(), 16);
    assert!(wire.sharp);

    // Every step moves along exactly one axis (an edge walk, no diagonals).
    for pair in wire.points.windows(2) {
        let d = pair[1] - pair[0];
        let moved = [d.x, d.y, d.z].iter().filter(|c| c.abs() > 1e-12).count();
        assert_eq!(moved, 1, "diagonal step between {:?} and {:?}", pair[0], pair[1]);
    }
}

#[test]
fn box_wire_scales_with_the_cloud() {
    let cloud = vec![Point3::new(-5.0, -1.0, -1.0), Point3::new(5.0, 1.0, 1.0)];
    let wire = box_wire(&cloud, 1.0);

    // 0.6x the 10 x 2 x 2 box size, nothing floored.
    let xs: Vec<f64> = wire.points.iter().map(|p| p.x.abs()).collect();
    let ys: Vec<f64> = wire.points.iter().map(|p| p.y.abs()).collect();
    assert!(xs.iter().all(|&x| (x - 6.0).abs() < 1e-9));
    assert!(ys.iter().all(|&y| (y - 1.2).abs() < 1e-9));
}

#[test]
fn box_wire_floors_tiny_clouds() {
    // A near-degenerate cloud still yields a selectable control.
    let cloud = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.001, 0.001, 0.001),
    ];
    let wire = box_wire(&cloud, 2.0);

    // Floor is 0.3x the control scale.
    for p in &wire.points {
        assert!((p.x.abs() - 0.6).abs() < 1e-9);
        assert!((p.y.abs() - 0.6).abs() < 1e-9);
        assert!((p.z.abs() - 0.6).abs() < 1e-9);
    }
}

#[test]
fn circle_wire_stays_on_radius_and_plane() {
    let wire = circle_wire(2.0, Axis::Y);

    assert_eq!(wire.points.len(), 16);
    assert!(!wire.sharp);
    for p in &wire.points {
        assert!(p.y.abs() < 1e-12);
        assert!((p.distance_to(Point3::ORIGIN) - 2.0).abs() < 1e-9);
    }

    // First CV sits on the +X axis.
    assert!(Tolerance::LOOSE.approx_eq_point3(wire.points[0], Point3::new(2.0, 0.0, 0.0)));
}

#[test]
fn circle_wire_respects_the_normal_axis() {
    for axis in Axis::ALL {
        let wire = circle_wire(1.0, axis);
        for p in &wire.points {
            assert!(p.component(axis).abs() < 1e-12);
        }
    }
}

#[test]
fn cylinder_wire_sizes_from_the_planar_spread() {
    // Widest XZ offset is 4 units; radius is 0.7x that.
    let cloud = vec![
        Point3::new(4.0, 0.0, 0.0),
        Point3::new(-4.0, 0.0, 0.0),
        Point3::new(0.0, 10.0, 0.0),
        Point3::new(0.0, -10.0, 0.0),
    ];
    let wire = cylinder_wire(&cloud, 1.0);

    for p in &wire.points {
        assert!(p.y.abs() < 1e-12);
        assert!((p.distance_to(Point3::ORIGIN) - 2.8).abs() < 1e-9);
    }
}

#[test]
fn cylinder_wire_ignores_height() {
    // Same XZ footprint, taller part: identical ring.
    let squat = vec![Point3::new(2.0, 0.0, 0.0), Point3::new(-2.0, 0.0, 0.0)];
    let tall = vec![Point3::new(2.0, 50.0, 0.0), Point3::new(-2.0, -50.0, 0.0)];

    assert_eq!(cylinder_wire(&squat, 1.0), cylinder_wire(&tall, 1.0));
}

#[test]
fn sphere_wires_form_an_axis_triad() {
    let cloud = vec![Point3::new(5.0, 0.0, 0.0), Point3::new(-5.0, 0.0, 0.0)];
    let wires = sphere_wires(&cloud, 1.0);

    assert_eq!(wires.len(), 3);
    // 0.8x the max centroid distance of 5.
    for wire in &wires {
        for p in &wire.points {
            assert!((p.distance_to(Point3::ORIGIN) - 4.0).abs() < 1e-9);
        }
    }
    // One ring per normal axis.
    assert!(wires[0].points.iter().all(|p| p.y.abs() < 1e-12));
    assert!(wires[1].points.iter().all(|p| p.x.abs() < 1e-12));
    assert!(wires[2].points.iter().all(|p| p.z.abs() < 1e-12));
}

#[test]
fn empty_clouds_fall_back_to_the_control_scale() {
    let wire = cylinder_wire(&[], 1.5);
    for p in &wire.points {
        assert!((p.distance_to(Point3::ORIGIN) - 1.5).abs() < 1e-9);
    }

    let wires = sphere_wires(&[], 2.0);
    for p in &wires[0].points {
        assert!((p.distance_to(Point3::ORIGIN) - 2.0).abs() < 1e-9);
    }
}
