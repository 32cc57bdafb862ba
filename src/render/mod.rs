//! Presentation collaborators.
//!
//! Playback hands every [`backend::FrameRenderer`] a view of the current instant; renderers that
//! rasterize expose the pixels so capture sinks can record them.

/// Frame buffer type and the renderer trait.
pub mod backend;
/// Renderer that reports frames through `tracing`.
pub mod log;
/// CPU raster renderer.
pub mod raster;
/// Scene palettes and color parsing.
pub mod theme;
