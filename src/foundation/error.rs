/// Convenience result type used across tracereel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by loader, sampler, playback and capture APIs.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Input document failed the shape check.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Playback was requested over a sequence without frames.
    #[error("empty timeline: {0}")]
    EmptyTimeline(String),

    /// Non-positive or otherwise unusable sampling/render configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Playback operation called in a state that does not allow it.
    #[error("playback misuse: {0}")]
    PlaybackMisuse(String),

    /// Failure reported by a capture sink or renderer collaborator.
    #[error("capture error: {0}")]
    Capture(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::MalformedInput`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// Build a [`ReelError::EmptyTimeline`] value.
    pub fn empty_timeline(msg: impl Into<String>) -> Self {
        Self::EmptyTimeline(msg.into())
    }

    /// Build a [`ReelError::InvalidConfiguration`] value.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Build a [`ReelError::PlaybackMisuse`] value.
    pub fn misuse(msg: impl Into<String>) -> Self {
        Self::PlaybackMisuse(msg.into())
    }

    /// Build a [`ReelError::Capture`] value.
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
