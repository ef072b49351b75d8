use super::*;

fn logo() -> CurveSpec {
    CurveSpec::lemniscate(5.4, 2.4, 1.65, 100)
        .with_bob(0.15)
        .with_phase(0.15)
}

#[test]
fn sample_count_below_three_is_rejected() {
    assert!(generate_curve(CurveSpec::ring(3.0, 2)).is_err());
    assert!(generate_curve(CurveSpec::ring(3.0, 3)).is_ok());
    assert!(generate_curve(CurveSpec::ring(f64::NAN, 8)).is_err());
}

#[test]
fn point_count_matches_closure_flag() {
    let open = generate_curve(logo()).unwrap();
    assert_eq!(open.points().count(), 100);
    assert_eq!(open.points().len(), open.len());

    let closed = generate_curve(logo().closed(true)).unwrap();
    let pts = closed.to_vec();
    assert_eq!(pts.len(), 101);
    assert_eq!(pts[0], pts[100]);
}

#[test]
fn points_are_deterministic_and_restartable() {
    let a = generate_curve(logo()).unwrap();
    let b = generate_curve(logo()).unwrap();
    assert_eq!(a.to_vec(), b.to_vec());

    let iter = a.points();
    let first: Vec<Vec3> = iter.clone().take(5).collect();
    let again: Vec<Vec3> = iter.take(5).collect();
    assert_eq!(first, again);
}

#[test]
fn consecutive_points_are_distinct_and_bounded() {
    for spec in [logo(), CurveSpec::ring(6.4, 32)] {
        let pts = generate_curve(spec).unwrap().to_vec();
        // Parameter step times the largest possible speed.
        let max_speed = spec.width + 2.0 * spec.depth + spec.bob;
        let bound = TAU / (spec.sample_count as f64) * max_speed;
        for w in pts.windows(2) {
            let d = w[0].distance(w[1]);
            assert!(d > 1e-6);
            assert!(d <= bound + 1e-9);
        }
    }
}

#[test]
fn ring_points_follow_the_circle() {
    let ring = generate_curve(CurveSpec::ring(2.0, 4)).unwrap();
    let pts = ring.to_vec();
    assert!((pts[0].x - 2.0).abs() < 1e-12);
    assert!((pts[1].z - 2.0).abs() < 1e-12);
    for p in pts {
        assert_eq!(p.y, 0.0);
        assert!(((p.x * p.x + p.z * p.z).sqrt() - 2.0).abs() < 1e-12);
    }
}

#[test]
fn rotation_faces_the_direction_of_travel() {
    let curve = generate_curve(CurveSpec::lemniscate(5.4, 2.4, 0.0, 32)).unwrap();
    let t: f64 = 0.15;
    let dx = 5.4 * t.cos();
    let dz = 2.4 * 2.0 * (2.0 * t).cos();
    assert_eq!(curve.rotation_at(t), dx.atan2(dz) + FRAC_PI_2);
}

#[test]
fn catmull_rom_passes_through_base_samples() {
    let curve = generate_curve(logo()).unwrap();
    let smooth = curve.catmull_rom(400);
    assert_eq!(smooth.len(), 401);
    assert_eq!(smooth[0], smooth[400]);
    // Every fourth sample lands on a base point.
    let base = curve.to_vec();
    assert!(smooth[4].distance(base[1]) < 1e-9);
}
