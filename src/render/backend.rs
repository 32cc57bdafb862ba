use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::error::{ReelError, ReelResult},
    playback::driver::PlaybackView,
};

/// A rendered frame as straight-alpha RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Frame with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = (width as usize) * (height as usize);
        Self {
            width,
            height,
            data: rgba.repeat(pixels),
        }
    }

    /// RGBA8 value at `(x, y)`, if inside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Encode as PNG at `path`, creating parent directories as needed.
    pub fn save_png(&self, path: &Path) -> ReelResult<()> {
        crate::encode::ffmpeg::ensure_parent_dir(path)?;
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))
        .map_err(ReelError::from)
    }
}

/// Presentation collaborator driven by playback.
///
/// `render` is called once per tick with the current view. Renderers that rasterize expose the
/// last frame through `raster` so an attached capture sink can record it.
pub trait FrameRenderer {
    fn render(&mut self, view: &PlaybackView) -> ReelResult<()>;

    fn raster(&self) -> Option<&FrameRGBA> {
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
