use super::*;

fn default_plans() -> Vec<ActorPlan> {
    plan_actors(32, 32, Radii::default(), 35.0).unwrap()
}

#[test]
fn planning_is_deterministic() {
    let a = default_plans();
    let b = default_plans();
    assert_eq!(a.len(), 64);
    assert_eq!(a, b);
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.final_position.x.to_bits(), y.final_position.x.to_bits());
        assert_eq!(x.rotation_at_final.to_bits(), y.rotation_at_final.to_bits());
    }
}

#[test]
fn angles_are_evenly_spaced_per_group() {
    for plan in default_plans() {
        assert_eq!(plan.angle, TAU * (plan.index as f64) / 32.0);
        assert_eq!(plan.rotation_at_circle, -plan.angle - FRAC_PI_2);
    }
}

#[test]
fn outer_actors_hold_their_ring_position() {
    let plans = default_plans();
    for plan in plans.iter().filter(|p| p.group == Group::Outer) {
        assert_eq!(plan.final_position, plan.circle_position);
        assert_eq!(plan.rotation_at_final, plan.rotation_at_circle);
        assert!((plan.circle_position.distance(Vec3::ZERO) - 6.4).abs() < 1e-9);
        assert!((plan.start_position.distance(Vec3::ZERO) - 35.0).abs() < 1e-9);
    }
}

#[test]
fn inner_actors_end_on_the_walk_curve() {
    let cfg = IntroConfig::default();
    let curve = generate_curve(cfg.walk_spec()).unwrap();
    let on_curve = curve.to_vec();
    let plans = default_plans();
    for plan in plans.iter().filter(|p| p.is_inner()) {
        assert!(plan.final_position.distance(on_curve[plan.index]) < 1e-9);
        let t = curve.param_for_index(plan.index);
        assert!((plan.rotation_at_final - curve.rotation_at(t)).abs() < 1e-9);
        // Inner actors enter from inside the outer group's entry ring.
        assert!((plan.start_position.distance(Vec3::ZERO) - 31.0).abs() < 1e-9);
        assert!((plan.circle_position.distance(Vec3::ZERO) - 3.2).abs() < 1e-9);
    }
}

#[test]
fn palette_offsets_differ_between_groups() {
    let plans = default_plans();
    let (outer, inner) = plans.split_at(32);
    for (o, i) in outer.iter().zip(inner) {
        assert_eq!(o.color_index, (o.index + 1) % 6);
        assert_eq!(i.color_index, (i.index + 3) % 6);
        assert_ne!(o.color_index, i.color_index);
    }
}

#[test]
fn ids_follow_list_order() {
    for (pos, plan) in default_plans().iter().enumerate() {
        assert_eq!(plan.id, pos);
        assert!(plan.is_finite());
    }
}

#[test]
fn empty_groups_are_allowed() {
    let plans = plan_actors(0, 4, Radii::default(), 35.0).unwrap();
    assert_eq!(plans.len(), 4);
    assert!(plans.iter().all(ActorPlan::is_inner));
}
