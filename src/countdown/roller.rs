use crate::animation::{ease::Ease, tween::Tween};

pub const ROLL_DURATION: f64 = 0.45;
pub const ROLL_EASE: Ease = Ease::OutQuart;

/// Digit value of `c`; anything that is not an ASCII digit reads as 0.
pub fn parse_digit(c: char) -> u8 {
    c.to_digit(10).map_or(0, |d| d as u8)
}

/// Odometer-style column for one displayed digit.
///
/// The column holds the glyphs `0..=9` stacked vertically, one em apart, and
/// is shifted up by `digit` em to show `digit`.
#[derive(Clone, Debug)]
pub struct DigitRoller {
    previous: u8,
    offset_em: f64,
    clock: f64,
    roll: Option<Tween<f64>>,
    duration: f64,
    ease: Ease,
    rolls_started: usize,
}

impl DigitRoller {
    /// A column resting on `digit`, with nothing in flight.
    pub fn new(digit: char) -> Self {
        Self::with_timing(digit, ROLL_DURATION, ROLL_EASE)
    }

    pub fn with_timing(digit: char, duration: f64, ease: Ease) -> Self {
        let previous = parse_digit(digit);
        Self {
            previous,
            offset_em: -f64::from(previous),
            clock: 0.0,
            roll: None,
            duration,
            ease,
            rolls_started: 0,
        }
    }

    /// Last digit this column was asked to show.
    pub fn digit(&self) -> u8 {
        self.previous
    }

    /// Current vertical offset in em units; `-d` shows digit `d`.
    pub fn offset_em(&self) -> f64 {
        self.offset_em
    }

    pub fn is_rolling(&self) -> bool {
        self.roll.is_some()
    }

    /// Number of rolls started since construction.
    pub fn rolls_started(&self) -> usize {
        self.rolls_started
    }

    /// Roll toward `digit`. Returns `false` when it is already the current digit.
    ///
    /// A roll in flight is replaced, restarting from the previous digit's
    /// rest position. The previous digit is updated as the roll starts.
    pub fn on_value_change(&mut self, digit: char) -> bool {
        let next = parse_digit(digit);
        if next == self.previous {
            return false;
        }
        let roll = Tween::new(
            -f64::from(self.previous),
            -f64::from(next),
            self.clock,
            self.duration,
            self.ease,
        );
        self.offset_em = roll.from;
        self.roll = Some(roll);
        self.previous = next;
        self.rolls_started += 1;
        true
    }

    pub fn advance(&mut self, dt: f64) {
        self.clock += dt.max(0.0);
        if let Some(roll) = self.roll {
            self.offset_em = roll.sample(self.clock);
            if roll.is_complete(self.clock) {
                self.roll = None;
            }
        }
    }
}
