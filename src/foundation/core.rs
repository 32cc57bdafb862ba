use crate::foundation::error::{ReelError, ReelResult};

/// Frame rate used when a dial or scanner document carries no configuration.
pub const DEFAULT_FPS: u32 = 60;
/// Output duration cap used when a dial or scanner document carries no configuration.
pub const DEFAULT_MAX_DURATION_SECS: f64 = 180.0;

/// Frame budget for sampling: `max_frame_count = floor(fps * max_duration_seconds)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SamplingConfig {
    /// Target output frame rate (> 0).
    pub frames_per_second: u32,
    /// Upper bound on output duration in seconds (> 0).
    pub max_duration_seconds: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            frames_per_second: DEFAULT_FPS,
            max_duration_seconds: DEFAULT_MAX_DURATION_SECS,
        }
    }
}

impl SamplingConfig {
    /// Build a validated configuration.
    pub fn new(frames_per_second: u32, max_duration_seconds: f64) -> ReelResult<Self> {
        let cfg = Self {
            frames_per_second,
            max_duration_seconds,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build a configuration from untyped document numbers.
    ///
    /// `fps` must be a positive integer; fractional or non-finite values are rejected rather
    /// than truncated.
    pub fn from_document_values(fps: f64, max_duration_seconds: f64) -> ReelResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(ReelError::invalid_config(format!(
                "framesPerSecond must be > 0, got {fps}"
            )));
        }
        if fps.fract() != 0.0 || fps > f64::from(u32::MAX) {
            return Err(ReelError::invalid_config(format!(
                "framesPerSecond must be a positive integer, got {fps}"
            )));
        }
        Self::new(fps as u32, max_duration_seconds)
    }

    /// Check the invariants sampling relies on.
    pub fn validate(&self) -> ReelResult<()> {
        if self.frames_per_second == 0 {
            return Err(ReelError::invalid_config("framesPerSecond must be > 0"));
        }
        if !self.max_duration_seconds.is_finite() || self.max_duration_seconds <= 0.0 {
            return Err(ReelError::invalid_config(format!(
                "maxDurationSeconds must be a finite number > 0, got {}",
                self.max_duration_seconds
            )));
        }
        Ok(())
    }

    /// Largest number of frames that fit the duration budget. May be 0 for tiny budgets.
    pub fn max_frame_count(&self) -> usize {
        (f64::from(self.frames_per_second) * self.max_duration_seconds)
            .floor()
            .max(0.0) as usize
    }

    /// Wall-clock interval between output frames in milliseconds.
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / f64::from(self.frames_per_second.max(1))
    }
}

/// Output surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// Reference layout size all scene geometry is authored against.
    pub const REFERENCE: Canvas = Canvas {
        width: 1280,
        height: 720,
    };

    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReelError::invalid_config(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Uniform scale mapping reference-layout units onto this canvas.
    pub fn scale(self) -> f64 {
        let sx = f64::from(self.width) / f64::from(Self::REFERENCE.width);
        let sy = f64::from(self.height) / f64::from(Self::REFERENCE.height);
        sx.min(sy)
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: (a.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
