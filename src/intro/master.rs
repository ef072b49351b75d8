use crate::{
    animation::{
        dispose::DisposeToken,
        timeline::{Channel, ChannelSink, Timeline},
    },
    foundation::core::Vec3,
    foundation::error::ChoreoResult,
    intro::config::IntroConfig,
    viewport::Viewport,
};

pub const FADE_START_CUE: &str = "fade-start";
pub const SEQUENCE_COMPLETE_CUE: &str = "sequence-complete";

/// The only coupling between the intro and the surrounding page.
pub trait SequenceHooks {
    /// The fade from the intro to the page has begun.
    fn on_phase_start(&mut self);
    /// The intro is over; the page should become interactive.
    fn on_sequence_complete(&mut self);
}

/// Hooks that ignore both events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl SequenceHooks for NoHooks {
    fn on_phase_start(&mut self) {}
    fn on_sequence_complete(&mut self) {}
}

/// Perspective camera that always looks at `target`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_deg: f64,
}

impl Camera {
    pub fn new(position: Vec3, fov_deg: f64) -> Self {
        Self {
            position,
            target: Vec3::ZERO,
            fov_deg,
        }
    }

    pub fn for_viewport(config: &IntroConfig, position: Vec3, viewport: Viewport) -> Self {
        Self::new(position, Self::fov_for(config, viewport))
    }

    /// Wider field of view on compact screens.
    pub fn fov_for(config: &IntroConfig, viewport: Viewport) -> f64 {
        if viewport.is_compact() {
            config.camera.fov_compact_deg
        } else {
            config.camera.fov_regular_deg
        }
    }
}

impl ChannelSink for Camera {
    fn write(&mut self, channel: Channel, value: f64) {
        match channel {
            Channel::CameraY => self.position.y = value,
            Channel::CameraZ => self.position.z = value,
            _ => {}
        }
    }
}

struct MasterSink<'a> {
    camera: &'a mut Camera,
    hooks: &'a mut dyn SequenceHooks,
    completed: &'a mut bool,
}

impl ChannelSink for MasterSink<'_> {
    fn write(&mut self, channel: Channel, value: f64) {
        self.camera.write(channel, value);
    }

    fn cue(&mut self, label: &str) {
        match label {
            FADE_START_CUE => self.hooks.on_phase_start(),
            SEQUENCE_COMPLETE_CUE => {
                *self.completed = true;
                self.hooks.on_sequence_complete();
            }
            _ => {}
        }
    }
}

/// Camera moves and page callbacks, independent of the actors.
pub struct MasterTimeline {
    timeline: Timeline,
    camera: Camera,
    hooks: Box<dyn SequenceHooks>,
    completed: bool,
}

impl std::fmt::Debug for MasterTimeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterTimeline")
            .field("timeline", &self.timeline)
            .field("camera", &self.camera)
            .field("completed", &self.completed)
            .finish_non_exhaustive()
    }
}

impl MasterTimeline {
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn token(&self) -> &DisposeToken {
        self.timeline.token()
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn advance(&mut self, dt: f64) {
        let mut sink = MasterSink {
            camera: &mut self.camera,
            hooks: self.hooks.as_mut(),
            completed: &mut self.completed,
        };
        self.timeline.advance(dt, &mut sink);
    }

    pub fn resize(&mut self, config: &IntroConfig, viewport: Viewport) {
        self.camera.fov_deg = Camera::fov_for(config, viewport);
    }

    pub fn dispose(&self) -> bool {
        self.timeline.dispose()
    }
}

/// Two-leg camera descent plus the fade-start and completion cues.
pub fn build_master_timeline(
    config: &IntroConfig,
    viewport: Viewport,
    hooks: Box<dyn SequenceHooks>,
    token: DisposeToken,
) -> ChoreoResult<MasterTimeline> {
    let start = config.camera.start;
    let mut b = Timeline::builder();
    b.rest(Channel::CameraY, start.y);
    b.rest(Channel::CameraZ, start.z);
    for leg in &config.camera.legs {
        b.to(Channel::CameraY, leg.y, leg.at, leg.duration, leg.ease)?;
        b.to(Channel::CameraZ, leg.z, leg.at, leg.duration, leg.ease)?;
    }
    b.cue(FADE_START_CUE, config.fade_start_at);
    b.cue(SEQUENCE_COMPLETE_CUE, config.complete_at);

    Ok(MasterTimeline {
        timeline: b.build(token),
        camera: Camera::for_viewport(config, start, viewport),
        hooks,
        completed: false,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/intro/master.rs"]
mod tests;
