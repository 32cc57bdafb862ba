use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::ReelResult;
use crate::render::backend::FrameRGBA;

/// Owns a capture sink for the lifetime of one playback run.
///
/// The sink is closed exactly once: on completion, on stop, or when the session is dropped.
pub struct CaptureSession {
    sink: Box<dyn FrameSink>,
    cfg: SinkConfig,
    open: bool,
    pushed: u64,
}

impl CaptureSession {
    pub fn new(sink: Box<dyn FrameSink>, cfg: SinkConfig) -> Self {
        Self {
            sink,
            cfg,
            open: false,
            pushed: 0,
        }
    }

    pub fn config(&self) -> SinkConfig {
        self.cfg
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Frames pushed since the last `open`.
    pub fn frames_pushed(&self) -> u64 {
        self.pushed
    }

    /// Begin the sink. No-op when already open.
    pub fn open(&mut self) -> ReelResult<()> {
        if self.open {
            return Ok(());
        }
        self.pushed = 0;
        self.sink.begin(self.cfg)?;
        self.open = true;
        tracing::debug!(
            width = self.cfg.width,
            height = self.cfg.height,
            fps = self.cfg.fps,
            "capture opened"
        );
        Ok(())
    }

    /// Push one frame. Ignored when the session is not open.
    pub fn push(&mut self, frame: &FrameRGBA) -> ReelResult<()> {
        if !self.open {
            return Ok(());
        }
        self.sink.push_frame(self.pushed, frame)?;
        self.pushed += 1;
        Ok(())
    }

    /// End the sink. No-op when not open; the session counts as closed even if `end` fails.
    pub fn close(&mut self) -> ReelResult<()> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        tracing::debug!(frames = self.pushed, "capture closed");
        self.sink.end()
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(error = %e, "capture sink failed to close");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/capture.rs"]
mod tests;
