use crate::{
    foundation::core::SamplingConfig,
    foundation::error::ReelResult,
    timeline::Timeline,
    timeline::frame::Frame,
};

/// How frames between stride points are treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingPolicy {
    /// Every `stride`-th frame plus the last one.
    Uniform,
    /// Stride-aligned frames, every important frame, and the last one.
    PreserveImportant,
}

impl SamplingPolicy {
    /// Importance-preserving whenever the timeline model assigns meaning to kinds.
    pub fn for_timeline(timeline: &Timeline) -> Self {
        if timeline.defines_importance() {
            Self::PreserveImportant
        } else {
            Self::Uniform
        }
    }
}

/// Result of sampling a timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SampledTimeline {
    /// Retained frames in original order.
    pub frames: Vec<Frame>,
    /// Integer spacing between stride-aligned frames (>= 1).
    pub stride: usize,
    /// Length of the timeline that was sampled.
    pub source_len: usize,
    pub policy: SamplingPolicy,
}

impl SampledTimeline {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Original timeline indices of the retained frames.
    pub fn original_indices(&self) -> Vec<u64> {
        self.frames.iter().map(|f| f.index).collect()
    }
}

/// Sample `timeline` with the policy its frame model calls for.
///
/// Pure: identical inputs always produce identical output.
pub fn sample(timeline: &Timeline, config: &SamplingConfig) -> ReelResult<SampledTimeline> {
    sample_with_policy(
        timeline.frames(),
        config,
        SamplingPolicy::for_timeline(timeline),
    )
}

#[tracing::instrument(skip(frames), fields(frame_count = frames.len()))]
pub fn sample_with_policy(
    frames: &[Frame],
    config: &SamplingConfig,
    policy: SamplingPolicy,
) -> ReelResult<SampledTimeline> {
    config.validate()?;

    let total = frames.len();
    if total == 0 {
        return Ok(SampledTimeline {
            frames: Vec::new(),
            stride: 1,
            source_len: 0,
            policy,
        });
    }

    let max_frames = config.max_frame_count();
    if total <= max_frames {
        return Ok(SampledTimeline {
            frames: frames.to_vec(),
            stride: 1,
            source_len: total,
            policy,
        });
    }

    let stride = stride_for(total, max_frames);
    let keep: Vec<usize> = match policy {
        SamplingPolicy::Uniform => (0..total).step_by(stride).collect(),
        SamplingPolicy::PreserveImportant => (0..total)
            .filter(|&i| i % stride == 0 || frames[i].is_important())
            .collect(),
    };

    let mut out: Vec<Frame> = keep.iter().map(|&i| frames[i].clone()).collect();
    if keep.last() != Some(&(total - 1)) {
        out.push(frames[total - 1].clone());
    }

    tracing::debug!(
        stride,
        kept = out.len(),
        budget = max_frames,
        "sampled timeline"
    );

    Ok(SampledTimeline {
        frames: out,
        stride,
        source_len: total,
        policy,
    })
}

/// `ceil(total / max_frames)`, never below 1 even for a zero budget.
pub fn stride_for(total: usize, max_frames: usize) -> usize {
    total.div_ceil(max_frames.max(1)).max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/sampling/sampler.rs"]
mod tests;
