use crate::animation::ease::clamp_unit;

/// Slowest allowed speed multiplier.
pub const MIN_SPEED: f64 = 0.25;
/// Fastest allowed speed multiplier.
pub const MAX_SPEED: f64 = 5.0;
/// Per-tick progress increment of the fixed-step mode at 1x.
pub const DEFAULT_BASE_STEP: f64 = 0.15;

/// Clamp a requested speed multiplier into `[MIN_SPEED, MAX_SPEED]`.
///
/// Non-finite requests fall back to the minimum.
pub fn clamp_speed(multiplier: f64) -> f64 {
    if !multiplier.is_finite() {
        MIN_SPEED
    } else {
        multiplier.clamp(MIN_SPEED, MAX_SPEED)
    }
}

/// Lifecycle of a playback driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStatus {
    /// No sequence loaded.
    Idle,
    /// Sequence loaded, not started.
    Ready,
    Running,
    /// Advanced past the last sampled frame.
    Completed,
    /// Halted externally.
    Stopped,
}

/// How much interpolation progress one tick contributes (before the speed multiplier).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TickMode {
    /// Constant increment per tick regardless of elapsed time.
    FixedStep { base_step: f64 },
    /// `elapsed_ms / frame_interval_ms` per tick. Overshoot past a frame carries into the next,
    /// so one tick may cross several frames.
    TimeScaled { frame_interval_ms: f64 },
}

impl Default for TickMode {
    fn default() -> Self {
        Self::FixedStep {
            base_step: DEFAULT_BASE_STEP,
        }
    }
}

impl TickMode {
    /// Progress contributed by a tick that observed `elapsed_ms`.
    pub fn step(self, elapsed_ms: f64) -> f64 {
        match self {
            Self::FixedStep { base_step } => base_step,
            Self::TimeScaled { frame_interval_ms } => {
                if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
                    elapsed_ms / frame_interval_ms
                } else {
                    0.0
                }
            }
        }
    }

    /// Whether progress beyond 1 carries over instead of being dropped.
    pub fn carries_overshoot(self) -> bool {
        matches!(self, Self::TimeScaled { .. })
    }

    pub(crate) fn is_valid(self) -> bool {
        match self {
            Self::FixedStep { base_step } => base_step.is_finite() && base_step > 0.0,
            Self::TimeScaled { frame_interval_ms } => {
                frame_interval_ms.is_finite() && frame_interval_ms > 0.0
            }
        }
    }
}

/// What a single transition did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Still blending between `previous` and `target`.
    Interpolating,
    /// Moved on to a new target frame.
    Advanced,
    /// Moved past the last frame.
    Completed,
}

/// Mutable playback position over a sampled sequence.
///
/// `previous` and `target` index into the sampled sequence.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PlaybackState {
    pub current_index: usize,
    /// Blend factor between `previous` and `target`, in `[0, 1]`.
    pub interpolation_progress: f64,
    pub speed: f64,
    pub previous: usize,
    pub target: usize,
}

impl PlaybackState {
    /// State at the first frame, shown as both endpoints.
    pub fn initial(speed: f64) -> Self {
        Self {
            current_index: 0,
            interpolation_progress: 0.0,
            speed: clamp_speed(speed),
            previous: 0,
            target: 0,
        }
    }

    /// Apply one tick worth `step` progress over a sequence of `len` frames.
    ///
    /// Without `carry` progress clamps to 1 and a tick moves at most one frame. With `carry` the
    /// whole-frame part of the progress advances that many frames and the remainder is kept.
    /// On completion the endpoints keep their final values and progress is 1, so the last frame
    /// stays fully displayed.
    pub fn advance(self, len: usize, step: f64, carry: bool) -> (Self, Advance) {
        let mut next = self;
        let mut progress = self.interpolation_progress + step.max(0.0) * self.speed;
        if !carry {
            progress = clamp_unit(progress);
        }
        if progress < 1.0 {
            next.interpolation_progress = progress;
            return (next, Advance::Interpolating);
        }

        while progress >= 1.0 {
            next.current_index += 1;
            if next.current_index >= len {
                next.interpolation_progress = 1.0;
                return (next, Advance::Completed);
            }
            next.previous = next.target;
            next.target = next.current_index;
            progress = if carry { progress - 1.0 } else { 0.0 };
        }
        next.interpolation_progress = progress;
        (next, Advance::Advanced)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/state.rs"]
mod tests;
