//! tracereel turns recorded puzzle-solving traces into bounded, smoothly interpolated
//! animations.
//!
//! The pipeline is:
//!
//! - Load a [`TraceDocument`] (dial, scanner or generic labeled-track log)
//! - [`sample`] its [`Timeline`] down to a frame budget, keeping important events
//! - Drive a [`PlaybackDriver`] over the sampled frames, handing each [`PlaybackView`] to a
//!   [`FrameRenderer`] and optionally capturing rasters into a [`FrameSink`]
#![forbid(unsafe_code)]

mod animation;
mod foundation;
mod playback;
mod sampling;
mod timeline;

/// Capture sinks.
pub mod encode;
/// Renderer contract and the reference raster renderer.
pub mod render;

pub use crate::foundation::core::{
    Canvas, DEFAULT_FPS, DEFAULT_MAX_DURATION_SECS, Rgba8, SamplingConfig,
};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::animation::ease::{Ease, ease};
pub use crate::animation::interp::{
    DIAL_MODULUS, FieldValues, Interp, Lerp, interpolate, interpolate_frames, numeric_fields,
};
pub use crate::sampling::sampler::{
    SampledTimeline, SamplingPolicy, sample, sample_with_policy, stride_for,
};
pub use crate::timeline::Timeline;
pub use crate::timeline::document::{
    BackgroundStyle, DocumentKind, DocumentMeta, FontStyle, PuzzleInfo, RangeInfo, ThemeHints,
    TraceDocument,
};
pub use crate::timeline::frame::{
    DialState, Direction, Frame, FrameKind, Payload, ScannerState, Track, TrackState, TrackValue,
};

pub use crate::playback::capture::CaptureSession;
pub use crate::playback::driver::{
    PlaybackDriver, PlaybackOptions, PlaybackView, RunSummary, TickOutcome,
};
pub use crate::playback::state::{
    Advance, DEFAULT_BASE_STEP, MAX_SPEED, MIN_SPEED, PlaybackState, PlaybackStatus, TickMode,
    clamp_speed,
};
pub use crate::playback::ticks::{FixedTicks, RealtimeTicks, TickSource};

pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, VideoFormat};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::backend::{FrameRGBA, FrameRenderer};
pub use crate::render::log::LogRenderer;
pub use crate::render::raster::RasterRenderer;
pub use crate::render::theme::{
    DialPalette, SceneTheme, ScannerPalette, TrackPalette, accent_color, parse_hex,
};
