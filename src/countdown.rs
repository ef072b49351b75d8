//! Festival countdown: wall-clock math and the odometer-style digit display.

pub mod clock;
pub mod driver;
pub mod roll_number;
pub mod roller;
