pub mod dispose;
pub mod ease;
pub mod timeline;
pub mod tween;
