#![forbid(unsafe_code)]

pub mod animation;
pub mod countdown;
pub mod foundation;
pub mod geometry;
pub mod intro;
pub mod preview;
pub mod viewport;

pub use animation::{
    dispose::DisposeToken,
    ease::Ease,
    timeline::{Channel, ChannelSink, Timeline, TimelineBuilder},
    tween::{Lerp, Tween},
};
pub use countdown::{
    clock::{TimeLeft, days_left, pad, time_left},
    driver::{Countdown, CountdownConfig, CountdownDisplay},
    roll_number::RollNumber,
    roller::{DigitRoller, parse_digit},
};
pub use foundation::core::{Fps, Point, Rgb, Vec2, Vec3};
pub use foundation::error::{ChoreoError, ChoreoResult};
pub use geometry::{
    curve::{ClosedCurve, CurveShape, CurveSpec, generate_curve},
    tube::TubeMesh,
};
pub use intro::{
    choreographer::{ActorState, ActorTimeline, Phase, build_actor_timeline, pulse_offset},
    config::IntroConfig,
    master::{Camera, MasterTimeline, NoHooks, SequenceHooks, build_master_timeline},
    planner::{ActorPlan, Group, Planner, plan_actors},
    scene::{ActorFrame, HeroScene, IntroScene, SceneFrame},
    scroll_lock::{NoScrollLock, ScrollLock, ScrollLockGuard},
};
pub use preview::{PreviewOpts, render_preview, save_png};
pub use viewport::{DeviceClass, ScaleBounds, Viewport, responsive_scale};
