use time::{OffsetDateTime, macros::datetime};

use crate::{
    animation::{ease::Ease, tween::Tween},
    countdown::{
        clock::{TimeLeft, days_left, pad, time_left},
        roll_number::RollNumber,
        roller::{ROLL_DURATION, ROLL_EASE},
    },
    foundation::error::{ChoreoError, ChoreoResult},
};

/// Timing and target of the festival countdown.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    #[serde(with = "time::serde::rfc3339")]
    pub deadline: OffsetDateTime,
    /// Placeholder the day counter shows until the reveal ramp runs.
    pub ramp_start: u64,
    /// Seconds between `reveal()` and the start of the ramp.
    pub ramp_delay: f64,
    pub ramp_duration: f64,
    pub ramp_ease: Ease,
    pub roll_duration: f64,
    pub roll_ease: Ease,
    pub tick_ms: u64,
    pub day_width: usize,
    pub unit_width: usize,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            deadline: datetime!(2026-04-17 00:00:00 +05:30),
            ramp_start: 999,
            ramp_delay: 0.5,
            ramp_duration: 2.2,
            ramp_ease: Ease::InOutCubic,
            roll_duration: ROLL_DURATION,
            roll_ease: ROLL_EASE,
            tick_ms: 1000,
            day_width: 3,
            unit_width: 2,
        }
    }
}

impl CountdownConfig {
    pub fn from_json_str(s: &str) -> ChoreoResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> ChoreoResult<()> {
        for (name, v) in [
            ("ramp_duration", self.ramp_duration),
            ("roll_duration", self.roll_duration),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(ChoreoError::validation(format!("{name} must be > 0, got {v}")));
            }
        }
        if !(self.ramp_delay.is_finite() && self.ramp_delay >= 0.0) {
            return Err(ChoreoError::validation("ramp_delay must be >= 0"));
        }
        if self.tick_ms == 0 {
            return Err(ChoreoError::validation("tick_ms must be > 0"));
        }
        if self.day_width == 0 || self.unit_width == 0 {
            return Err(ChoreoError::validation("display widths must be >= 1"));
        }
        Ok(())
    }
}

/// What the countdown shows right now.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CountdownDisplay {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    pub day_offsets_em: Vec<f64>,
}

/// Day counter plus hours, minutes and seconds, each a [`RollNumber`].
///
/// Two independent clocks drive it: `tick(now)` with wall-clock time (about
/// once per `tick_ms`) and `frame(dt)` with the frame delta. Either may run
/// any number of times between calls to the other.
#[derive(Clone, Debug)]
pub struct Countdown {
    config: CountdownConfig,
    days: RollNumber,
    hours: RollNumber,
    minutes: RollNumber,
    seconds: RollNumber,
    target_days: u64,
    left: TimeLeft,
    frame_time: f64,
    ramp: Option<Tween<f64>>,
    revealed: bool,
    last_tick: Option<OffsetDateTime>,
}

impl Countdown {
    pub fn new(config: CountdownConfig, now: OffsetDateTime) -> ChoreoResult<Self> {
        config.validate()?;
        let number = |v: u64, width: usize| {
            RollNumber::new(&pad(v, width), config.roll_duration, config.roll_ease)
        };
        let left = time_left(config.deadline, now);
        Ok(Self {
            days: number(config.ramp_start, config.day_width),
            hours: number(left.hours, config.unit_width),
            minutes: number(left.minutes, config.unit_width),
            seconds: number(left.seconds, config.unit_width),
            target_days: days_left(config.deadline, now),
            left,
            frame_time: 0.0,
            ramp: None,
            revealed: false,
            last_tick: Some(now),
            config,
        })
    }

    pub fn config(&self) -> &CountdownConfig {
        &self.config
    }

    /// Whole days left as of the last tick, rounded up.
    pub fn target_days(&self) -> u64 {
        self.target_days
    }

    pub fn time_left(&self) -> TimeLeft {
        self.left
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_ramping(&self) -> bool {
        self.ramp.is_some()
    }

    pub fn days(&self) -> &RollNumber {
        &self.days
    }

    pub fn hours(&self) -> &RollNumber {
        &self.hours
    }

    pub fn minutes(&self) -> &RollNumber {
        &self.minutes
    }

    pub fn seconds(&self) -> &RollNumber {
        &self.seconds
    }

    /// Recompute everything from the wall clock.
    pub fn tick(&mut self, now: OffsetDateTime) -> TimeLeft {
        let deadline = self.config.deadline;
        self.target_days = days_left(deadline, now);
        self.left = time_left(deadline, now);
        let w = self.config.unit_width;
        self.hours.set(&pad(self.left.hours, w));
        self.minutes.set(&pad(self.left.minutes, w));
        self.seconds.set(&pad(self.left.seconds, w));
        if self.revealed && self.ramp.is_none() {
            self.show_days(self.target_days);
        }
        self.last_tick = Some(now);
        self.left
    }

    /// Tick only when `tick_ms` has passed since the last tick.
    pub fn tick_if_due(&mut self, now: OffsetDateTime) -> Option<TimeLeft> {
        let due = self.last_tick.is_none_or(|last| {
            (now - last).whole_milliseconds() >= i128::from(self.config.tick_ms)
        });
        due.then(|| self.tick(now))
    }

    /// Start the day ramp from the placeholder down to the real count.
    ///
    /// Runs once; later calls return `false`.
    pub fn reveal(&mut self) -> bool {
        if self.revealed {
            return false;
        }
        self.revealed = true;
        self.ramp = Some(Tween::new(
            self.config.ramp_start as f64,
            self.target_days as f64,
            self.frame_time + self.config.ramp_delay,
            self.config.ramp_duration,
            self.config.ramp_ease,
        ));
        tracing::debug!(from = self.config.ramp_start, to = self.target_days, "day ramp started");
        true
    }

    /// Advance rolls and the day ramp by `dt` seconds.
    pub fn frame(&mut self, dt: f64) {
        self.frame_time += dt.max(0.0);
        if let Some(ramp) = self.ramp {
            if ramp.is_complete(self.frame_time) {
                self.ramp = None;
                self.show_days(self.target_days);
            } else if self.frame_time >= ramp.start {
                let shown = ramp.sample(self.frame_time).round().max(0.0) as u64;
                self.show_days(shown);
            }
        }
        for n in [
            &mut self.days,
            &mut self.hours,
            &mut self.minutes,
            &mut self.seconds,
        ] {
            n.advance(dt);
        }
    }

    fn show_days(&mut self, days: u64) {
        self.days.set(&pad(days, self.config.day_width));
    }

    pub fn display(&self) -> CountdownDisplay {
        CountdownDisplay {
            days: self.days.value().to_owned(),
            hours: self.hours.value().to_owned(),
            minutes: self.minutes.value().to_owned(),
            seconds: self.seconds.value().to_owned(),
            day_offsets_em: self.days.offsets_em(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/countdown/driver.rs"]
mod tests;
