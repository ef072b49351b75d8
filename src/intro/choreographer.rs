use std::f64::consts::PI;

use crate::{
    animation::{
        dispose::DisposeToken,
        ease::Ease,
        timeline::{Channel, ChannelSink, Timeline},
    },
    foundation::core::{Rgb, Vec3},
    foundation::error::ChoreoResult,
    intro::planner::{ActorPlan, Group},
};

pub const TRAVEL_AT: f64 = 0.0;
pub const TRAVEL_DURATION: f64 = 1.0;
pub const ARM_RAISE_AT: f64 = 0.6;
pub const ARM_RAISE_DURATION: f64 = 0.3;
pub const FLOURISH_AT: f64 = 1.0;
pub const FLOURISH_DURATION: f64 = 0.2;
pub const INNER_TRAVEL_AT: f64 = 1.2;
pub const INNER_TRAVEL_DURATION: f64 = 1.0;
pub const SETTLE_AT: f64 = 2.2;
pub const SETTLE_DURATION: f64 = 0.3;
pub const PULSE_AT: f64 = 2.3;
pub const PULSE_WINDOW: f64 = 0.3;
pub const PULSE_DURATION: f64 = 0.2;
pub const PULSE_INDEX_STAGGER: f64 = 0.1;
pub const BOB_AT: f64 = 1.2;
pub const BOB_HEIGHT: f64 = 0.3;
pub const BOB_DURATION: f64 = 0.5;
pub const FADE_AT: f64 = 3.0;
pub const FADE_DURATION: f64 = 0.8;

/// Joint angles (left shoulder, right shoulder, left elbow, right elbow), radians about z.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Pose(pub [f64; 4]);

pub const JOINTS: [Channel; 4] = [
    Channel::LeftShoulder,
    Channel::RightShoulder,
    Channel::LeftElbow,
    Channel::RightElbow,
];

pub const HANGING: Pose = Pose([-0.1, 0.1, 0.0, 0.0]);
pub const RAISED: Pose = Pose([-PI / 2.2, PI / 2.2, -0.1, 0.1]);
pub const FLOURISH: Pose = Pose([-0.2, 0.2, -0.4, 0.4]);
pub const SETTLED: Pose = Pose([-PI / 2.0, PI / 2.0, 0.4, -0.4]);

/// Offset of an inner actor's colour pulse.
///
/// The jitter term desynchronizes neighbours: actors sharing a base delay
/// still pulse at different times because their index feeds the jitter.
/// Always lands in `[PULSE_AT, PULSE_AT + PULSE_WINDOW)`.
///
/// The modulo runs on whole stagger steps, so actors in the same residue
/// class pulse at bit-identical times.
pub fn pulse_offset(plan: &ActorPlan) -> f64 {
    let step = |secs: f64| (secs / PULSE_INDEX_STAGGER).round().max(0.0) as u64;
    let steps = step(plan.base_delay * 2.0) + plan.index as u64;
    let window = step(PULSE_WINDOW).max(1);
    PULSE_AT + (steps % window) as f64 * PULSE_INDEX_STAGGER
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Phase {
    Waiting,
    TravelIn,
    ArmRaise,
    Flourish,
    InnerTravel,
    Settle,
    Bob,
    Hold,
    FadeOut,
    Done,
}

/// Current visual state of one actor, written by its timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ActorState {
    pub position: Vec3,
    pub rotation_y: f64,
    pub joints: Pose,
    pub color: Rgb,
    pub opacity: f64,
}

impl ActorState {
    pub fn at_start(plan: &ActorPlan) -> Self {
        Self {
            position: plan.start_position,
            rotation_y: plan.rotation_at_circle,
            joints: HANGING,
            color: plan.color,
            opacity: 1.0,
        }
    }
}

impl ChannelSink for ActorState {
    fn write(&mut self, channel: Channel, value: f64) {
        match channel {
            Channel::PositionX => self.position.x = value,
            Channel::PositionY => self.position.y = value,
            Channel::PositionZ => self.position.z = value,
            Channel::RotationY => self.rotation_y = value,
            Channel::LeftShoulder => self.joints.0[0] = value,
            Channel::RightShoulder => self.joints.0[1] = value,
            Channel::LeftElbow => self.joints.0[2] = value,
            Channel::RightElbow => self.joints.0[3] = value,
            Channel::ColorR => self.color.r = value,
            Channel::ColorG => self.color.g = value,
            Channel::ColorB => self.color.b = value,
            Channel::Opacity => self.opacity = value,
            Channel::CameraY | Channel::CameraZ | Channel::DrawRange => {}
        }
    }
}

/// One actor's schedule plus the state it animates.
#[derive(Debug)]
pub struct ActorTimeline {
    plan: ActorPlan,
    timeline: Timeline,
    state: ActorState,
}

impl ActorTimeline {
    pub fn plan(&self) -> &ActorPlan {
        &self.plan
    }

    pub fn state(&self) -> &ActorState {
        &self.state
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn token(&self) -> &DisposeToken {
        self.timeline.token()
    }

    pub fn advance(&mut self, dt: f64) {
        self.timeline.advance(dt, &mut self.state);
    }

    pub fn seek(&mut self, cursor: f64) {
        self.timeline.seek(cursor, &mut self.state);
    }

    /// Advance and forward every write to `sink` as well.
    pub fn advance_into(&mut self, dt: f64, sink: &mut impl ChannelSink) {
        let mut tee = Tee {
            state: &mut self.state,
            sink,
        };
        self.timeline.advance(dt, &mut tee);
    }

    pub fn dispose(&self) -> bool {
        self.timeline.dispose()
    }

    pub fn is_disposed(&self) -> bool {
        self.timeline.is_disposed()
    }

    pub fn is_finished(&self) -> bool {
        self.timeline.is_finished()
    }

    /// Which phase the actor is in at the current cursor.
    pub fn phase(&self) -> Phase {
        let t = self.timeline.local_time();
        let inner = self.plan.group == Group::Inner;
        let raise_end = if inner { FLOURISH_AT } else { BOB_AT };
        if t < TRAVEL_AT {
            Phase::Waiting
        } else if t < ARM_RAISE_AT {
            Phase::TravelIn
        } else if t < raise_end {
            Phase::ArmRaise
        } else if inner && t < INNER_TRAVEL_AT {
            Phase::Flourish
        } else if inner && t < SETTLE_AT {
            Phase::InnerTravel
        } else if inner && t < SETTLE_AT + SETTLE_DURATION {
            Phase::Settle
        } else if !inner && t < BOB_AT + 2.0 * BOB_DURATION {
            Phase::Bob
        } else if t < FADE_AT {
            Phase::Hold
        } else if t < FADE_AT + FADE_DURATION {
            Phase::FadeOut
        } else {
            Phase::Done
        }
    }
}

struct Tee<'a, S> {
    state: &'a mut ActorState,
    sink: &'a mut S,
}

impl<S: ChannelSink> ChannelSink for Tee<'_, S> {
    fn write(&mut self, channel: Channel, value: f64) {
        self.state.write(channel, value);
        self.sink.write(channel, value);
    }
}

/// Build the schedule for one actor. The whole schedule starts after
/// `plan.base_delay * delay_scale` seconds.
pub fn build_actor_timeline(
    plan: &ActorPlan,
    delay_scale: f64,
    token: DisposeToken,
) -> ChoreoResult<ActorTimeline> {
    let mut b = Timeline::builder().delay(plan.base_delay * delay_scale);
    let state = ActorState::at_start(plan);
    for (channel, value) in Channel::COLOR.iter().zip([state.color.r, state.color.g, state.color.b]) {
        b.rest(*channel, value);
    }
    b.rest(Channel::Opacity, state.opacity);

    // Travel in.
    for (channel, (from, to)) in Channel::POSITION.iter().zip(
        plan.start_position
            .to_array()
            .into_iter()
            .zip(plan.circle_position.to_array()),
    ) {
        b.from_to(*channel, from, to, TRAVEL_AT, TRAVEL_DURATION, Ease::OutCubic);
    }
    b.from_to(
        Channel::RotationY,
        plan.rotation_at_circle,
        plan.rotation_at_circle,
        TRAVEL_AT,
        TRAVEL_DURATION,
        Ease::Linear,
    );

    // Arms up.
    for (i, channel) in JOINTS.iter().enumerate() {
        b.from_to(
            *channel,
            HANGING.0[i],
            RAISED.0[i],
            ARM_RAISE_AT,
            ARM_RAISE_DURATION,
            Ease::OutCubic,
        );
    }

    match plan.group {
        Group::Inner => {
            for (i, channel) in JOINTS.iter().enumerate() {
                b.to(*channel, FLOURISH.0[i], FLOURISH_AT, FLOURISH_DURATION, Ease::InCubic)?;
            }
            for (channel, to) in Channel::POSITION.iter().zip(plan.final_position.to_array()) {
                b.to(
                    *channel,
                    to,
                    INNER_TRAVEL_AT,
                    INNER_TRAVEL_DURATION,
                    Ease::InOutQuart,
                )?;
            }
            b.to(
                Channel::RotationY,
                plan.rotation_at_final,
                INNER_TRAVEL_AT,
                INNER_TRAVEL_DURATION,
                Ease::InOutQuart,
            )?;
            for (i, channel) in JOINTS.iter().enumerate() {
                b.to(*channel, SETTLED.0[i], SETTLE_AT, SETTLE_DURATION, Ease::OutCubic)?;
            }
            let pulse_at = pulse_offset(plan);
            for channel in Channel::COLOR {
                b.to(channel, 1.0, pulse_at, PULSE_DURATION, Ease::OutCubic)?;
            }
        }
        Group::Outer => {
            b.to_repeating(
                Channel::PositionY,
                BOB_HEIGHT,
                BOB_AT,
                BOB_DURATION,
                Ease::InOutSine,
                1,
                true,
            )?;
        }
    }

    b.to(Channel::Opacity, 0.0, FADE_AT, FADE_DURATION, Ease::InOutCubic)?;

    let mut timeline = b.build(token);
    let mut state = state;
    timeline.seek(0.0, &mut state);

    Ok(ActorTimeline {
        plan: *plan,
        timeline,
        state,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/intro/choreographer.rs"]
mod tests;
