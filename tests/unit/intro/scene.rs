use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::intro::{master::NoHooks, scroll_lock::NoScrollLock};

#[derive(Clone, Default)]
struct Host {
    events: Rc<RefCell<Vec<&'static str>>>,
}

impl SequenceHooks for Host {
    fn on_phase_start(&mut self) {
        self.events.borrow_mut().push("fade");
    }
    fn on_sequence_complete(&mut self) {
        self.events.borrow_mut().push("complete");
    }
}

impl ScrollLock for Host {
    fn lock(&mut self) {
        self.events.borrow_mut().push("lock");
    }
    fn unlock(&mut self) {
        self.events.borrow_mut().push("unlock");
    }
}

fn mount(host: &Host) -> IntroScene {
    IntroScene::mount(
        &IntroConfig::default(),
        Viewport::new(1440, 900),
        Box::new(host.clone()),
        Box::new(host.clone()),
    )
    .unwrap()
}

#[test]
fn mount_locks_scroll_and_places_everyone_at_the_start() {
    let host = Host::default();
    let scene = mount(&host);
    assert_eq!(*host.events.borrow(), vec!["lock"]);
    assert_eq!(scene.actors().len(), 64);
    assert_eq!(scene.skipped(), 0);

    let frame = scene.snapshot();
    assert_eq!(frame.scale, 1.0);
    assert!(frame.ribbon.is_empty());
    for (actor, timeline) in frame.actors.iter().zip(scene.actors()) {
        assert_eq!(actor.state.position, timeline.plan().start_position);
        assert_eq!(actor.phase, Phase::Waiting);
    }
}

#[test]
fn full_run_fires_callbacks_once_and_unlocks() {
    let host = Host::default();
    let mut scene = mount(&host);
    for _ in 0..(60 * 6) {
        scene.advance(1.0 / 60.0);
    }
    assert!(scene.is_complete());
    assert!(!scene.is_scroll_locked());
    assert_eq!(
        *host.events.borrow(),
        vec!["lock", "fade", "complete", "unlock"]
    );

    let frame = scene.snapshot();
    assert_eq!(frame.ribbon_fraction, 1.0);
    assert!(frame.actors.iter().all(|a| a.state.opacity == 0.0));

    assert!(scene.teardown());
    assert_eq!(host.events.borrow().len(), 4);
}

#[test]
fn teardown_mid_sequence_cancels_everything() {
    let host = Host::default();
    let mut scene = mount(&host);
    scene.advance(1.0);
    let before = scene.snapshot();

    assert!(scene.teardown());
    assert!(!scene.teardown());
    assert_eq!(*host.events.borrow(), vec!["lock", "unlock"]);

    scene.advance(10.0);
    let after = scene.snapshot();
    assert_eq!(before.actors, after.actors);
    assert_eq!(before.camera, after.camera);
    assert_eq!(*host.events.borrow(), vec!["lock", "unlock"]);
    assert!(scene.actors().iter().all(|a| a.is_disposed()));
}

#[test]
fn dropping_the_scene_tears_it_down() {
    let host = Host::default();
    {
        let mut scene = mount(&host);
        scene.advance(0.5);
    }
    assert_eq!(*host.events.borrow(), vec!["lock", "unlock"]);
}

#[test]
fn compact_viewports_shrink_the_scene() {
    let scene = IntroScene::mount(
        &IntroConfig::default(),
        Viewport::new(500, 900),
        Box::new(NoHooks),
        Box::new(NoScrollLock),
    )
    .unwrap();
    let frame = scene.snapshot();
    assert_eq!(frame.scale, 0.5);
    assert_eq!(frame.camera.fov_deg, 55.0);
}

#[test]
fn resize_updates_scale_and_fov() {
    let mut scene = IntroScene::mount(
        &IntroConfig::default(),
        Viewport::new(1200, 800),
        Box::new(NoHooks),
        Box::new(NoScrollLock),
    )
    .unwrap();
    scene.resize(Viewport::new(300, 600));
    let frame = scene.snapshot();
    assert_eq!(frame.scale, 0.40);
    assert_eq!(frame.camera.fov_deg, 55.0);
}

#[test]
fn invalid_config_fails_before_locking() {
    let host = Host::default();
    let cfg = IntroConfig {
        palette: Vec::new(),
        ..IntroConfig::default()
    };
    let err = IntroScene::mount(
        &cfg,
        Viewport::new(1200, 800),
        Box::new(host.clone()),
        Box::new(host.clone()),
    )
    .unwrap_err();
    assert!(err.to_string().contains("palette"));
    assert!(host.events.borrow().is_empty());
}

#[test]
fn hero_scene_shows_the_whole_logo_from_above() {
    let cfg = IntroConfig::default();
    let hero = HeroScene::new(&cfg, Viewport::new(1200, 800)).unwrap();
    let frame = hero.snapshot();
    assert!(frame.actors.is_empty());
    assert_eq!(frame.ribbon_fraction, 1.0);
    assert_eq!(frame.ribbon.len(), cfg.logo.tubular_segments);
    assert_eq!(frame.camera.position, cfg.camera.hero_position);
}
