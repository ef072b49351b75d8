use time::OffsetDateTime;

pub const MS_PER_SECOND: i128 = 1_000;
pub const MS_PER_MINUTE: i128 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i128 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i128 = 24 * MS_PER_HOUR;

fn millis_until(deadline: OffsetDateTime, now: OffsetDateTime) -> i128 {
    (deadline - now).whole_milliseconds()
}

/// Whole days left before `deadline`, rounded up. Zero once it has passed.
///
/// Rounds up while [`time_left`] rounds down, so a deadline 3 days 2 hours
/// away reads as 4 days here but `03:02:00:00` in the breakdown.
pub fn days_left(deadline: OffsetDateTime, now: OffsetDateTime) -> u64 {
    let ms = millis_until(deadline, now);
    if ms <= 0 {
        return 0;
    }
    // ceil for positive values
    ((ms + MS_PER_DAY - 1) / MS_PER_DAY) as u64
}

/// Floor breakdown of the time left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct TimeLeft {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeLeft {
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

pub fn time_left(deadline: OffsetDateTime, now: OffsetDateTime) -> TimeLeft {
    let ms = millis_until(deadline, now).max(0);
    TimeLeft {
        days: (ms / MS_PER_DAY) as u64,
        hours: ((ms % MS_PER_DAY) / MS_PER_HOUR) as u64,
        minutes: ((ms % MS_PER_HOUR) / MS_PER_MINUTE) as u64,
        seconds: ((ms % MS_PER_MINUTE) / MS_PER_SECOND) as u64,
    }
}

/// Zero-pad `n` to at least `width` digits. Wider values are not truncated.
pub fn pad(n: u64, width: usize) -> String {
    format!("{n:0width$}")
}
