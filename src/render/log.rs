use crate::{foundation::error::ReelResult, playback::driver::PlaybackView, render::backend::FrameRenderer};

/// Renderer that reports each newly displayed frame through `tracing`.
#[derive(Debug, Default)]
pub struct LogRenderer {
    last_index: Option<u64>,
    frames_shown: u64,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distinct frames reported so far.
    pub fn frames_shown(&self) -> u64 {
        self.frames_shown
    }
}

impl FrameRenderer for LogRenderer {
    fn render(&mut self, view: &PlaybackView) -> ReelResult<()> {
        if self.last_index == Some(view.display.index) {
            return Ok(());
        }
        self.last_index = Some(view.display.index);
        self.frames_shown += 1;
        tracing::info!(
            position = view.position + 1,
            of = view.sequence_len,
            progress = format_args!("{:.0}%", view.progress_fraction * 100.0),
            "{}",
            view.display.caption()
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/log.rs"]
mod tests;
