pub mod curve;
pub mod tube;
