use crate::{
    animation::ease::Ease,
    foundation::core::{Rgb, Vec3},
};

/// Smallest duration a tween may have; zero durations are clamped to it.
pub const MIN_DURATION: f64 = 1e-9;

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec3 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec3::new(
            a.x + (b.x - a.x) * t,
            a.y + (b.y - a.y) * t,
            a.z + (b.z - a.z) * t,
        )
    }
}

impl Lerp for Rgb {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Rgb::new(
            f64::lerp(&a.r, &b.r, t),
            f64::lerp(&a.g, &b.g, t),
            f64::lerp(&a.b, &b.b, t),
        )
    }
}

/// A timed interpolation of one value, sampled at absolute times.
///
/// Before `start` the tween holds `from`; after its last play it holds
/// [`Tween::end_value`]. With `yoyo`, odd-numbered plays run backwards.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    pub start: f64,
    pub duration: f64,
    pub ease: Ease,
    pub repeat: u32, // extra plays after the first
    pub yoyo: bool,
}

impl<T> Tween<T>
where
    T: Lerp + Copy,
{
    pub fn new(from: T, to: T, start: f64, duration: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            start,
            duration: duration.max(MIN_DURATION),
            ease,
            repeat: 0,
            yoyo: false,
        }
    }

    /// Play `repeat` more times, reversing every other play when `yoyo` is set.
    pub fn repeating(mut self, repeat: u32, yoyo: bool) -> Self {
        self.repeat = repeat;
        self.yoyo = yoyo;
        self
    }

    /// Length of all plays together.
    pub fn total_duration(&self) -> f64 {
        self.duration * f64::from(self.repeat + 1)
    }

    pub fn end_time(&self) -> f64 {
        self.start + self.total_duration()
    }

    pub fn is_complete(&self, time: f64) -> bool {
        time >= self.end_time()
    }

    /// Value held once every play has finished.
    pub fn end_value(&self) -> T {
        if self.yoyo && self.repeat % 2 == 1 {
            self.from
        } else {
            self.to
        }
    }

    /// Eased progress toward `to` at absolute `time`.
    pub fn progress(&self, time: f64) -> f64 {
        let local = time - self.start;
        if local <= 0.0 {
            return 0.0;
        }
        if local >= self.total_duration() {
            return if self.yoyo && self.repeat % 2 == 1 {
                0.0
            } else {
                1.0
            };
        }

        let cycle = (local / self.duration).floor();
        let mut p = (local - cycle * self.duration) / self.duration;
        if self.yoyo && (cycle as u64) % 2 == 1 {
            p = 1.0 - p;
        }
        self.ease.apply(p)
    }

    pub fn sample(&self, time: f64) -> T {
        if time >= self.end_time() {
            return self.end_value();
        }
        T::lerp(&self.from, &self.to, self.progress(time))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
