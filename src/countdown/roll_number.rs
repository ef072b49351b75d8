use crate::{animation::ease::Ease, countdown::roller::DigitRoller};

/// A row of [`DigitRoller`]s showing one zero-padded number.
///
/// When the string length changes (999 to 1000, say) the columns are rebuilt
/// resting on the new digits instead of rolling.
#[derive(Clone, Debug)]
pub struct RollNumber {
    value: String,
    rollers: Vec<DigitRoller>,
    duration: f64,
    ease: Ease,
}

impl RollNumber {
    pub fn new(value: &str, duration: f64, ease: Ease) -> Self {
        Self {
            value: value.to_owned(),
            rollers: Self::columns(value, duration, ease),
            duration,
            ease,
        }
    }

    fn columns(value: &str, duration: f64, ease: Ease) -> Vec<DigitRoller> {
        value
            .chars()
            .map(|c| DigitRoller::with_timing(c, duration, ease))
            .collect()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn rollers(&self) -> &[DigitRoller] {
        &self.rollers
    }

    pub fn offsets_em(&self) -> Vec<f64> {
        self.rollers.iter().map(DigitRoller::offset_em).collect()
    }

    pub fn is_rolling(&self) -> bool {
        self.rollers.iter().any(DigitRoller::is_rolling)
    }

    /// Show `value`; returns how many columns started rolling.
    pub fn set(&mut self, value: &str) -> usize {
        if value == self.value {
            return 0;
        }
        if value.chars().count() != self.rollers.len() {
            self.rollers = Self::columns(value, self.duration, self.ease);
            self.value = value.to_owned();
            return 0;
        }
        let started = self
            .rollers
            .iter_mut()
            .zip(value.chars())
            .map(|(roller, c)| roller.on_value_change(c))
            .filter(|started| *started)
            .count();
        self.value = value.to_owned();
        started
    }

    pub fn advance(&mut self, dt: f64) {
        for roller in &mut self.rollers {
            roller.advance(dt);
        }
    }
}
