//! Timelines: sorted tween segments evaluated against one elapsed-time cursor.
//!
//! A [`Timeline`] owns a list of [`AnimationSegment`]s keyed by [`Channel`] and
//! a list of once-only [`Cue`]s. Advancing the cursor writes the current value
//! of every scheduled channel into a [`ChannelSink`] and fires cues whose
//! offsets were crossed.
//!
//! Evaluation rules:
//!
//! - Offsets are relative to the timeline start, which itself begins after
//!   the timeline-level `delay`.
//! - Per channel, the segment with the latest start not after the cursor wins.
//!   Overlapping segments on one channel therefore resolve to the later one.
//! - Before its first segment starts, a channel is left untouched unless that
//!   segment was scheduled with [`TimelineBuilder::from_to`], which renders its
//!   `from` value immediately.
//! - Once the timeline's [`DisposeToken`] is disposed, nothing is written and
//!   no cue fires, ever again.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::{
    animation::{dispose::DisposeToken, ease::Ease, tween::Tween},
    foundation::error::{ChoreoError, ChoreoResult},
};

/// A scalar property a segment animates.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Channel {
    PositionX,
    PositionY,
    PositionZ,
    RotationY,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    ColorR,
    ColorG,
    ColorB,
    Opacity,
    CameraY,
    CameraZ,
    DrawRange,
}

impl Channel {
    pub const POSITION: [Self; 3] = [Self::PositionX, Self::PositionY, Self::PositionZ];
    pub const COLOR: [Self; 3] = [Self::ColorR, Self::ColorG, Self::ColorB];
}

/// Receiver of evaluated channel values and fired cues.
pub trait ChannelSink {
    fn write(&mut self, channel: Channel, value: f64);

    fn cue(&mut self, _label: &str) {}
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AnimationSegment {
    pub channel: Channel,
    pub tween: Tween<f64>,
    pub immediate: bool, // render `from` before start
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Cue {
    pub label: String,
    pub offset: f64,
}

#[derive(Debug)]
pub struct Timeline {
    delay: f64,
    segments: Vec<AnimationSegment>, // grouped by channel, then sorted by start
    spans: Vec<Range<usize>>,
    cues: Vec<Cue>, // sorted by offset
    next_cue: usize,
    cursor: f64,
    duration: f64,
    token: DisposeToken,
}

impl Timeline {
    pub fn builder() -> TimelineBuilder {
        TimelineBuilder::default()
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    /// Elapsed time since mount, including the delay.
    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    /// Cursor position relative to the first offset.
    pub fn local_time(&self) -> f64 {
        self.cursor - self.delay
    }

    /// Time from the first offset to the last segment end or cue.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn segments(&self) -> &[AnimationSegment] {
        &self.segments
    }

    pub fn segments_for(&self, channel: Channel) -> impl Iterator<Item = &AnimationSegment> {
        self.segments.iter().filter(move |s| s.channel == channel)
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn token(&self) -> &DisposeToken {
        &self.token
    }

    pub fn is_disposed(&self) -> bool {
        self.token.is_disposed()
    }

    pub fn is_finished(&self) -> bool {
        self.local_time() >= self.duration && self.next_cue >= self.cues.len()
    }

    /// Cancel the timeline. Idempotent.
    pub fn dispose(&self) -> bool {
        self.token.dispose()
    }

    /// Move the cursor forward by `dt` seconds and evaluate.
    pub fn advance(&mut self, dt: f64, sink: &mut impl ChannelSink) {
        if self.token.is_disposed() {
            return;
        }
        self.seek(self.cursor + dt.max(0.0), sink);
    }

    /// Place the cursor at `cursor` seconds since mount and evaluate.
    ///
    /// Cues fire at most once; seeking backwards does not re-arm them.
    pub fn seek(&mut self, cursor: f64, sink: &mut impl ChannelSink) {
        if self.token.is_disposed() {
            return;
        }
        self.cursor = cursor.max(0.0);
        self.evaluate(sink);

        let local = self.local_time();
        while let Some(cue) = self.cues.get(self.next_cue) {
            if cue.offset > local {
                break;
            }
            self.next_cue += 1;
            tracing::debug!(label = %cue.label, offset = cue.offset, "cue fired");
            sink.cue(&cue.label);
            // A cue handler may tear down the owner.
            if self.token.is_disposed() {
                return;
            }
        }
    }

    /// Write the value of every scheduled channel at the current cursor.
    pub fn evaluate(&self, sink: &mut impl ChannelSink) {
        if self.token.is_disposed() {
            return;
        }
        let local = self.local_time();
        for span in &self.spans {
            let segs = &self.segments[span.clone()];
            if let Some(v) = value_at(segs, local) {
                sink.write(segs[0].channel, v);
            }
        }
    }

    /// Value of `channel` at local time `local`, if anything has been rendered yet.
    pub fn value_at(&self, channel: Channel, local: f64) -> Option<f64> {
        let span = self
            .spans
            .iter()
            .find(|span| self.segments[span.start].channel == channel)?;
        value_at(&self.segments[span.clone()], local)
    }
}

fn value_at(segs: &[AnimationSegment], local: f64) -> Option<f64> {
    let idx = segs.partition_point(|s| s.tween.start <= local);
    if idx > 0 {
        return Some(segs[idx - 1].tween.sample(local));
    }
    let first = segs.first()?;
    first.immediate.then_some(first.tween.from)
}

/// Records segments and cues at offsets relative to the timeline start.
#[derive(Debug, Default)]
pub struct TimelineBuilder {
    delay: f64,
    segments: Vec<AnimationSegment>,
    cues: Vec<Cue>,
    rest: BTreeMap<Channel, f64>,
}

impl TimelineBuilder {
    /// Delay before offset zero, in seconds.
    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    /// Declare the value a channel holds before anything animates it.
    pub fn rest(&mut self, channel: Channel, value: f64) -> &mut Self {
        self.rest.insert(channel, value);
        self
    }

    /// Tween from an explicit start value; `from` is rendered immediately.
    pub fn from_to(
        &mut self,
        channel: Channel,
        from: f64,
        to: f64,
        at: f64,
        duration: f64,
        ease: Ease,
    ) -> &mut Self {
        self.push(channel, Tween::new(from, to, at, duration, ease), true)
    }

    /// Tween from whatever the channel holds at `at` given what is scheduled so far.
    pub fn to(
        &mut self,
        channel: Channel,
        to: f64,
        at: f64,
        duration: f64,
        ease: Ease,
    ) -> ChoreoResult<&mut Self> {
        let from = self.scheduled_value(channel, at)?;
        Ok(self.push(channel, Tween::new(from, to, at, duration, ease), false))
    }

    /// Like [`TimelineBuilder::to`], played `repeat` more times, mirrored when `yoyo`.
    #[allow(clippy::too_many_arguments)]
    pub fn to_repeating(
        &mut self,
        channel: Channel,
        to: f64,
        at: f64,
        duration: f64,
        ease: Ease,
        repeat: u32,
        yoyo: bool,
    ) -> ChoreoResult<&mut Self> {
        let from = self.scheduled_value(channel, at)?;
        let tween = Tween::new(from, to, at, duration, ease).repeating(repeat, yoyo);
        Ok(self.push(channel, tween, false))
    }

    pub fn push(&mut self, channel: Channel, tween: Tween<f64>, immediate: bool) -> &mut Self {
        self.segments.push(AnimationSegment {
            channel,
            tween,
            immediate,
        });
        self
    }

    pub fn cue(&mut self, label: impl Into<String>, at: f64) -> &mut Self {
        self.cues.push(Cue {
            label: label.into(),
            offset: at.max(0.0),
        });
        self
    }

    fn scheduled_value(&self, channel: Channel, at: f64) -> ChoreoResult<f64> {
        let mut segs: Vec<AnimationSegment> = self
            .segments
            .iter()
            .filter(|s| s.channel == channel)
            .cloned()
            .collect();
        segs.sort_by(|a, b| a.tween.start.total_cmp(&b.tween.start));
        if let Some(v) = value_at(&segs, at) {
            return Ok(v);
        }
        self.rest.get(&channel).copied().ok_or_else(|| {
            ChoreoError::animation(format!(
                "channel {channel:?} has no rest value and nothing scheduled before {at}"
            ))
        })
    }

    pub fn build(self, token: DisposeToken) -> Timeline {
        let Self {
            delay,
            mut segments,
            mut cues,
            rest: _,
        } = self;

        // Stable: equal starts keep insertion order, so the later push wins.
        segments.sort_by(|a, b| {
            a.channel
                .cmp(&b.channel)
                .then(a.tween.start.total_cmp(&b.tween.start))
        });
        cues.sort_by(|a, b| a.offset.total_cmp(&b.offset));

        let mut spans = Vec::new();
        let mut start = 0;
        for i in 1..=segments.len() {
            if i == segments.len() || segments[i].channel != segments[start].channel {
                spans.push(start..i);
                start = i;
            }
        }

        let seg_end = segments
            .iter()
            .map(|s| s.tween.end_time())
            .fold(0.0_f64, f64::max);
        let cue_end = cues.iter().map(|c| c.offset).fold(0.0_f64, f64::max);

        Timeline {
            delay,
            segments,
            spans,
            cues,
            next_cue: 0,
            cursor: 0.0,
            duration: seg_end.max(cue_end),
            token,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
