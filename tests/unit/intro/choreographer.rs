use super::*;
use crate::intro::config::{IntroConfig, Radii};
use crate::intro::planner::{Planner, plan_actors};

fn plans() -> Vec<ActorPlan> {
    plan_actors(32, 32, Radii::default(), 35.0).unwrap()
}

fn timeline_for(plan: &ActorPlan) -> ActorTimeline {
    build_actor_timeline(plan, 0.45, DisposeToken::new()).unwrap()
}

#[derive(Default)]
struct CountingSink {
    writes: usize,
}

impl ChannelSink for CountingSink {
    fn write(&mut self, _channel: Channel, _value: f64) {
        self.writes += 1;
    }
}

#[test]
fn pulse_jitter_desynchronizes_neighbours_within_window() {
    let all = plans();
    let inner: Vec<&ActorPlan> = all.iter().filter(|p| p.is_inner()).collect();
    let even = inner[0];
    let odd = inner[1];
    assert_eq!(even.base_delay, 0.15);
    assert_eq!(odd.base_delay, 0.15);
    assert_ne!(pulse_offset(even), pulse_offset(odd));

    for plan in inner {
        let at = pulse_offset(plan);
        assert!((PULSE_AT..PULSE_AT + PULSE_WINDOW).contains(&at), "{at}");
    }
}

#[test]
fn every_inner_actor_pulses_on_its_residue_slot() {
    let all = plans();
    let inner: Vec<&ActorPlan> = all.iter().filter(|p| p.is_inner()).collect();
    assert_eq!(inner.len(), 32);
    let slots = [PULSE_AT, PULSE_AT + 0.1, PULSE_AT + 0.2];
    for plan in &inner {
        let at = pulse_offset(plan);
        assert!(at < PULSE_AT + PULSE_WINDOW, "index {} -> {at}", plan.index);
        // base_delay 0.15 contributes three steps, a whole window.
        let slot = slots[plan.index % 3];
        assert_eq!(at, slot, "index {}", plan.index);
    }
    assert_eq!(pulse_offset(inner[30]), pulse_offset(inner[0]));
    assert_eq!(pulse_offset(inner[31]), pulse_offset(inner[1]));
}

#[test]
fn schedule_starts_after_the_scaled_base_delay() {
    let all = plans();
    let outer = timeline_for(&all[0]);
    let inner = timeline_for(&all[32]);
    assert!((outer.timeline().delay() - 0.1 * 0.45).abs() < 1e-12);
    assert!((inner.timeline().delay() - 0.15 * 0.45).abs() < 1e-12);
    assert_eq!(outer.phase(), Phase::Waiting);
    // Start positions are rendered before the delay elapses.
    assert_eq!(outer.state().position, all[0].start_position);
}

#[test]
fn inner_joint_phases_are_time_ordered() {
    let all = plans();
    let tl = timeline_for(&all[40]);
    let starts: Vec<f64> = tl
        .timeline()
        .segments_for(Channel::LeftShoulder)
        .map(|s| s.tween.start)
        .collect();
    assert_eq!(starts, vec![ARM_RAISE_AT, FLOURISH_AT, SETTLE_AT]);

    let pos: Vec<f64> = tl
        .timeline()
        .segments_for(Channel::PositionX)
        .map(|s| s.tween.start)
        .collect();
    assert_eq!(pos, vec![TRAVEL_AT, INNER_TRAVEL_AT]);
    assert_eq!(tl.timeline().segments_for(Channel::ColorR).count(), 1);
}

#[test]
fn outer_actors_bob_instead_of_travelling_on() {
    let all = plans();
    let tl = timeline_for(&all[3]);
    assert_eq!(tl.timeline().segments_for(Channel::PositionX).count(), 1);
    assert_eq!(tl.timeline().segments_for(Channel::ColorR).count(), 0);

    let bob = tl
        .timeline()
        .segments_for(Channel::PositionY)
        .find(|s| s.tween.start == BOB_AT)
        .unwrap();
    assert_eq!(bob.tween.to, BOB_HEIGHT);
    assert!(bob.tween.yoyo);
    assert_eq!(bob.tween.repeat, 1);
}

#[test]
fn inner_actor_ends_on_the_figure_eight_in_white_and_faded() {
    let all = plans();
    let plan = all[45];
    let mut tl = timeline_for(&plan);
    tl.advance(10.0);
    let s = tl.state();
    assert_eq!(s.position, plan.final_position);
    assert_eq!(s.rotation_y, plan.rotation_at_final);
    assert_eq!(s.color, Rgb::WHITE);
    assert_eq!(s.opacity, 0.0);
    assert_eq!(s.joints, SETTLED);
    assert!(tl.is_finished());
    assert_eq!(tl.phase(), Phase::Done);
}

#[test]
fn outer_actor_returns_to_the_ring_after_bobbing() {
    let all = plans();
    let plan = all[7];
    let mut tl = timeline_for(&plan);
    // Mid-bob: lifted off the floor.
    tl.seek(plan.base_delay * 0.45 + BOB_AT + BOB_DURATION);
    assert!((tl.state().position.y - BOB_HEIGHT).abs() < 1e-9);
    assert_eq!(tl.phase(), Phase::Bob);

    tl.seek(10.0);
    assert_eq!(tl.state().position, plan.circle_position);
    assert_eq!(tl.state().color, plan.color);
    assert_eq!(tl.state().joints, RAISED);
}

#[test]
fn phases_progress_in_order_for_inner_actors() {
    let all = plans();
    let plan = all[33];
    let mut tl = timeline_for(&plan);
    let delay = tl.timeline().delay();
    let expected = [
        (0.3, Phase::TravelIn),
        (0.8, Phase::ArmRaise),
        (1.1, Phase::Flourish),
        (1.5, Phase::InnerTravel),
        (2.3, Phase::Settle),
        (2.8, Phase::Hold),
        (3.2, Phase::FadeOut),
        (4.0, Phase::Done),
    ];
    for (t, phase) in expected {
        tl.seek(delay + t);
        assert_eq!(tl.phase(), phase, "t={t}");
    }
}

#[test]
fn disposing_mid_flight_stops_all_writes() {
    let all = plans();
    let mut tl = timeline_for(&all[40]);
    let mut sink = CountingSink::default();
    tl.advance_into(1.5, &mut sink);
    assert!(sink.writes > 0);

    let frozen = *tl.state();
    assert!(tl.dispose());
    assert!(!tl.dispose());

    let before = sink.writes;
    for _ in 0..10 {
        tl.advance_into(0.25, &mut sink);
    }
    assert_eq!(sink.writes, before);
    assert_eq!(*tl.state(), frozen);
}

#[test]
fn custom_configs_build_for_every_actor() {
    let cfg = IntroConfig {
        outer_count: 5,
        inner_count: 7,
        ..IntroConfig::default()
    };
    let plans = Planner::from_config(&cfg).plan().unwrap();
    for plan in &plans {
        let mut tl = build_actor_timeline(plan, cfg.delay_scale, DisposeToken::new()).unwrap();
        tl.advance(5.0);
        assert_eq!(tl.state().opacity, 0.0);
    }
}
