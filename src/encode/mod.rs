//! Capture sinks.
//!
//! Sinks consume rendered frames in playback order. The playback driver opens a sink when
//! playback starts and closes it when playback stops or completes.

/// `ffmpeg`-based sink (WebM/MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
