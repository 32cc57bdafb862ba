//! Frame timeline model and input document loading.

pub(crate) mod document;
pub(crate) mod frame;

use crate::foundation::error::{ReelError, ReelResult};
use frame::Frame;

/// Ordered sequence of frames. Insertion order is temporal.
///
/// Invariant: frame indices are strictly increasing.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Timeline {
    frames: Vec<Frame>,
}

impl Timeline {
    /// Build a timeline, rejecting non-increasing frame indices.
    pub fn new(frames: Vec<Frame>) -> ReelResult<Self> {
        for pair in frames.windows(2) {
            if pair[1].index <= pair[0].index {
                return Err(ReelError::malformed(format!(
                    "frame indices must be strictly increasing (found {} after {})",
                    pair[1].index, pair[0].index
                )));
            }
        }
        Ok(Self { frames })
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Whether any frame belongs to a model where kinds carry meaning.
    pub fn defines_importance(&self) -> bool {
        self.frames.iter().any(Frame::carries_importance_tags)
    }

    pub fn important_count(&self) -> usize {
        self.frames.iter().filter(|f| f.is_important()).count()
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/timeline.rs"]
mod tests;
