pub type ChoreoResult<T> = Result<T, ChoreoError>;

/// Everything the library can fail with. The frame loop itself never fails;
/// errors come from building plans, timelines and configs, or from writing
/// previews.
#[derive(thiserror::Error, Debug)]
pub enum ChoreoError {
    /// A curve, palette, frame rate or config value is out of range.
    #[error("validation error: {0}")]
    Validation(String),

    /// A tween or timeline could not be built.
    #[error("animation error: {0}")]
    Animation(String),

    /// Config JSON did not parse.
    #[error("config error: {0}")]
    Config(String),

    #[error("preview io: {0}")]
    Io(#[from] std::io::Error),

    #[error("preview encode: {0}")]
    Image(#[from] image::ImageError),
}

impl ChoreoError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<serde_json::Error> for ChoreoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
