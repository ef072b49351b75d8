use std::{cell::RefCell, rc::Rc};

use super::*;

#[derive(Clone, Default)]
struct Log(Rc<RefCell<Vec<&'static str>>>);

impl SequenceHooks for Log {
    fn on_phase_start(&mut self) {
        self.0.borrow_mut().push("fade");
    }

    fn on_sequence_complete(&mut self) {
        self.0.borrow_mut().push("complete");
    }
}

fn master(log: &Log) -> MasterTimeline {
    build_master_timeline(
        &IntroConfig::default(),
        Viewport::new(1280, 720),
        Box::new(log.clone()),
        DisposeToken::new(),
    )
    .unwrap()
}

#[test]
fn callbacks_fire_once_in_order() {
    let log = Log::default();
    let mut m = master(&log);
    for _ in 0..600 {
        m.advance(1.0 / 60.0);
    }
    assert_eq!(*log.0.borrow(), vec!["fade", "complete"]);
    assert!(m.is_complete());
}

#[test]
fn fade_precedes_completion_in_time() {
    let log = Log::default();
    let mut m = master(&log);
    m.advance(4.0);
    assert_eq!(*log.0.borrow(), vec!["fade"]);
    assert!(!m.is_complete());
    m.advance(1.0);
    assert_eq!(*log.0.borrow(), vec!["fade", "complete"]);
}

#[test]
fn camera_descends_to_top_down_framing() {
    let log = Log::default();
    let mut m = master(&log);
    assert_eq!(m.camera().position, Vec3::new(0.0, 16.0, 26.0));
    assert_eq!(m.camera().fov_deg, 40.0);

    m.advance(1.0);
    let mid = m.camera().position;
    assert!(mid.y > 16.0 && mid.y < 20.0);
    assert!(mid.z < 26.0 && mid.z > 2.0);

    m.advance(4.0);
    assert_eq!(m.camera().position, Vec3::new(0.0, 22.0, 0.1));
}

#[test]
fn disposing_before_the_cues_silences_them() {
    let log = Log::default();
    let mut m = master(&log);
    m.advance(1.0);
    assert!(m.dispose());
    let camera = *m.camera();
    m.advance(10.0);
    assert!(log.0.borrow().is_empty());
    assert!(!m.is_complete());
    assert_eq!(*m.camera(), camera);
}

#[test]
fn compact_viewports_widen_the_field_of_view() {
    let m = build_master_timeline(
        &IntroConfig::default(),
        Viewport::new(390, 844),
        Box::new(NoHooks),
        DisposeToken::new(),
    )
    .unwrap();
    assert_eq!(m.camera().fov_deg, 55.0);
}
