use crate::{
    animation::{
        ease::Ease,
        interp::{FieldValues, interpolate_frames},
    },
    encode::sink::{FrameSink, SinkConfig},
    foundation::{
        core::SamplingConfig,
        error::{ReelError, ReelResult},
    },
    playback::{
        capture::CaptureSession,
        state::{Advance, PlaybackState, PlaybackStatus, TickMode, clamp_speed},
        ticks::TickSource,
    },
    render::backend::FrameRenderer,
    timeline::{document::DocumentKind, frame::Frame},
};

/// Tunables for one playback run.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PlaybackOptions {
    /// Initial speed multiplier; clamped on use.
    pub speed: f64,
    pub tick_mode: TickMode,
    /// Easing applied to the blend factor before interpolating.
    pub ease: Ease,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            speed: 1.0,
            tick_mode: TickMode::default(),
            ease: Ease::Linear,
        }
    }
}

impl PlaybackOptions {
    /// Defaults matching how each document kind is meant to be watched.
    ///
    /// Dials step at a fixed rate with eased motion at 2x; scanners and generic tracks scale
    /// progress by elapsed time over the sampling frame interval.
    pub fn for_kind(kind: DocumentKind, config: &SamplingConfig) -> Self {
        match kind {
            DocumentKind::Dial => Self {
                speed: 2.0,
                tick_mode: TickMode::default(),
                ease: Ease::InOutCubic,
            },
            DocumentKind::Scanner | DocumentKind::Tracks => Self {
                speed: 1.0,
                tick_mode: TickMode::TimeScaled {
                    frame_interval_ms: config.frame_interval_ms(),
                },
                ease: Ease::Linear,
            },
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn validate(&self) -> ReelResult<()> {
        if !self.tick_mode.is_valid() {
            return Err(ReelError::invalid_config(format!(
                "tick mode must advance by a positive finite step (got {:?})",
                self.tick_mode
            )));
        }
        Ok(())
    }
}

/// What a renderer needs to draw the current instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlaybackView {
    /// Position of the display frame in the sampled sequence.
    pub position: usize,
    /// Number of frames in the sampled sequence.
    pub sequence_len: usize,
    /// Frame whose discrete fields are shown: the endpoint the blend is nearer to, so discrete
    /// fields never run ahead of `values`.
    pub display: Frame,
    /// Continuous fields blended between the previous and target frames.
    pub values: FieldValues,
    /// Eased blend factor.
    pub interpolation: f64,
    /// Fraction shown by progress bars, in `[0, 1]`.
    pub progress_fraction: f64,
}

impl PlaybackView {
    /// View of a single frame at rest, as if playback had just reached it.
    pub fn still(frames: &[Frame], position: usize) -> ReelResult<Self> {
        let frame = frames.get(position).ok_or_else(|| {
            ReelError::invalid_config(format!(
                "frame position {position} out of range (sequence has {} frames)",
                frames.len()
            ))
        })?;
        Ok(Self::blend(frames.len(), position, frame, position, frame, 1.0))
    }

    fn blend(
        len: usize,
        previous: usize,
        from: &Frame,
        target: usize,
        to: &Frame,
        t: f64,
    ) -> Self {
        let values = interpolate_frames(from, to, t);
        let overall = if len > 1 {
            let at = previous as f64 + (target as f64 - previous as f64) * t;
            at / (len - 1) as f64
        } else {
            t
        };
        let progress_fraction = values
            .get("progress")
            .copied()
            .unwrap_or(overall)
            .clamp(0.0, 1.0);
        let (position, display) = if t < 0.5 { (previous, from) } else { (target, to) };
        Self {
            position,
            sequence_len: len,
            display: display.clone(),
            values,
            interpolation: t,
            progress_fraction,
        }
    }
}

/// Result of a single [`PlaybackDriver::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still blending toward the current target.
    Interpolating,
    /// A new target frame was reached. Time-scaled ticks may cross several; `position` is the
    /// latest.
    Advanced { position: usize },
    /// Playback moved past the last frame.
    Completed,
    /// Playback is completed or stopped; nothing changed.
    Halted,
}

/// Totals of one [`PlaybackDriver::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub frames_rendered: u64,
    pub frames_captured: u64,
    pub completed: bool,
}

/// Steps through a sampled sequence, interpolating between neighbours.
///
/// A driver owns its sequence, its [`PlaybackState`] and an optional capture session.
pub struct PlaybackDriver {
    frames: Vec<Frame>,
    options: PlaybackOptions,
    status: PlaybackStatus,
    state: Option<PlaybackState>,
    capture: Option<CaptureSession>,
}

impl PlaybackDriver {
    pub fn new(options: PlaybackOptions) -> ReelResult<Self> {
        options.validate()?;
        Ok(Self {
            frames: Vec::new(),
            options,
            status: PlaybackStatus::Idle,
            state: None,
            capture: None,
        })
    }

    /// Build a driver with `frames` already loaded.
    pub fn with_frames(frames: Vec<Frame>, options: PlaybackOptions) -> ReelResult<Self> {
        let mut driver = Self::new(options)?;
        driver.load(frames)?;
        Ok(driver)
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn state(&self) -> Option<&PlaybackState> {
        self.state.as_ref()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn options(&self) -> &PlaybackOptions {
        &self.options
    }

    /// Replace the sequence. A running playback is stopped first.
    pub fn load(&mut self, frames: Vec<Frame>) -> ReelResult<()> {
        let released = self.release_capture();
        self.frames = frames;
        self.state = None;
        self.status = if self.frames.is_empty() {
            PlaybackStatus::Idle
        } else {
            PlaybackStatus::Ready
        };
        tracing::debug!(frames = self.frames.len(), "sequence loaded");
        released
    }

    /// Route rendered frames of the next run into `sink`.
    ///
    /// A previously attached session is closed when replaced.
    pub fn attach_capture(&mut self, sink: Box<dyn FrameSink>, cfg: SinkConfig) {
        self.capture = Some(CaptureSession::new(sink, cfg));
    }

    /// Close and detach the capture session, if any.
    pub fn detach_capture(&mut self) -> ReelResult<()> {
        let released = self.release_capture();
        self.capture = None;
        released
    }

    /// Begin (or restart) playback at the first frame.
    ///
    /// A capture session that fails to close or reopen leaves playback `Stopped`, so the next
    /// `run` starts over instead of playing without capture.
    #[tracing::instrument(skip(self), fields(frames = self.frames.len()))]
    pub fn start(&mut self) -> ReelResult<()> {
        if self.frames.is_empty() {
            return Err(ReelError::empty_timeline(
                "cannot start playback without frames",
            ));
        }
        if let Err(e) = self.release_capture() {
            self.status = PlaybackStatus::Stopped;
            return Err(e);
        }

        let state = PlaybackState::initial(self.options.speed);
        self.options.speed = state.speed;
        self.state = Some(state);
        self.status = PlaybackStatus::Running;
        tracing::debug!(speed = state.speed, "playback started");

        if let Some(capture) = self.capture.as_mut()
            && let Err(e) = capture.open()
        {
            self.status = PlaybackStatus::Stopped;
            return Err(e);
        }
        Ok(())
    }

    /// Advance playback by one tick that observed `elapsed_ms`.
    ///
    /// Ticks after completion or stop are no-ops. Reaching the end closes any capture session.
    pub fn tick(&mut self, elapsed_ms: f64) -> ReelResult<TickOutcome> {
        self.tick_inner(elapsed_ms, true)
    }

    fn tick_inner(&mut self, elapsed_ms: f64, release_on_complete: bool) -> ReelResult<TickOutcome> {
        let state = match self.status {
            PlaybackStatus::Idle | PlaybackStatus::Ready => {
                return Err(ReelError::misuse("tick called before start"));
            }
            PlaybackStatus::Completed | PlaybackStatus::Stopped => return Ok(TickOutcome::Halted),
            PlaybackStatus::Running => self
                .state
                .ok_or_else(|| ReelError::misuse("running playback has no state"))?,
        };

        let mode = self.options.tick_mode;
        let (next, advance) =
            state.advance(self.frames.len(), mode.step(elapsed_ms), mode.carries_overshoot());
        self.state = Some(next);

        match advance {
            Advance::Interpolating => Ok(TickOutcome::Interpolating),
            Advance::Advanced => Ok(TickOutcome::Advanced {
                position: next.target,
            }),
            Advance::Completed => {
                self.status = PlaybackStatus::Completed;
                tracing::debug!(frames = self.frames.len(), "playback completed");
                if release_on_complete {
                    self.release_capture()?;
                }
                Ok(TickOutcome::Completed)
            }
        }
    }

    /// Change the speed multiplier, returning the clamped value in effect.
    pub fn set_speed(&mut self, multiplier: f64) -> ReelResult<f64> {
        if matches!(self.status, PlaybackStatus::Idle | PlaybackStatus::Ready) {
            return Err(ReelError::misuse("set_speed called before start"));
        }
        let speed = clamp_speed(multiplier);
        if speed != multiplier {
            tracing::debug!(requested = multiplier, speed, "speed clamped");
        }
        self.options.speed = speed;
        if let Some(state) = self.state.as_mut() {
            state.speed = speed;
        }
        Ok(speed)
    }

    /// Halt playback. Idempotent; closes any open capture session.
    pub fn stop(&mut self) -> ReelResult<()> {
        if self.status != PlaybackStatus::Stopped {
            tracing::debug!(status = ?self.status, "playback stopped");
        }
        self.status = PlaybackStatus::Stopped;
        self.release_capture()
    }

    /// Current display view.
    pub fn view(&self) -> ReelResult<PlaybackView> {
        if matches!(self.status, PlaybackStatus::Idle | PlaybackStatus::Ready) {
            return Err(ReelError::misuse("view requested before start"));
        }
        let state = self
            .state
            .ok_or_else(|| ReelError::misuse("playback has no state"))?;
        let (Some(from), Some(to)) = (self.frames.get(state.previous), self.frames.get(state.target))
        else {
            return Err(ReelError::misuse("playback state points outside the sequence"));
        };
        let t = self.options.ease.apply(state.interpolation_progress);
        Ok(PlaybackView::blend(
            self.frames.len(),
            state.previous,
            from,
            state.target,
            to,
            t,
        ))
    }

    /// Drive playback from `ticks`, rendering every tick and capturing rendered rasters.
    ///
    /// Starts playback if it is not running. Returns when playback completes or the tick
    /// source runs dry. A renderer or capture failure stops playback and is returned.
    #[tracing::instrument(skip_all, fields(frames = self.frames.len()))]
    pub fn run(
        &mut self,
        ticks: &mut dyn TickSource,
        renderer: &mut dyn FrameRenderer,
    ) -> ReelResult<RunSummary> {
        if self.status != PlaybackStatus::Running {
            self.start()?;
        }

        let mut summary = RunSummary::default();
        self.present(renderer, &mut summary)?;

        while let Some(elapsed_ms) = ticks.next_tick() {
            let outcome = match self.tick_inner(elapsed_ms, false) {
                Ok(outcome) => outcome,
                Err(e) => return Err(self.abort(e)),
            };
            summary.ticks += 1;
            if outcome == TickOutcome::Halted {
                break;
            }
            self.present(renderer, &mut summary)?;
            if outcome == TickOutcome::Completed {
                summary.completed = true;
                self.release_capture()?;
                break;
            }
        }

        tracing::info!(
            ticks = summary.ticks,
            rendered = summary.frames_rendered,
            captured = summary.frames_captured,
            completed = summary.completed,
            "playback run finished"
        );
        Ok(summary)
    }

    fn present(
        &mut self,
        renderer: &mut dyn FrameRenderer,
        summary: &mut RunSummary,
    ) -> ReelResult<()> {
        let view = self.view()?;
        if let Err(e) = renderer.render(&view) {
            return Err(self.abort(e));
        }
        summary.frames_rendered += 1;

        let Some(capture) = self.capture.as_mut() else {
            return Ok(());
        };
        if !capture.is_open() {
            return Ok(());
        }
        let Some(raster) = renderer.raster() else {
            return Ok(());
        };
        if let Err(e) = capture.push(raster) {
            return Err(self.abort(e));
        }
        summary.frames_captured += 1;
        Ok(())
    }

    fn abort(&mut self, err: ReelError) -> ReelError {
        if let Err(close_err) = self.stop() {
            tracing::warn!(error = %close_err, "capture close failed after playback error");
        }
        err
    }

    fn release_capture(&mut self) -> ReelResult<()> {
        match self.capture.as_mut() {
            Some(capture) => capture.close(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/driver.rs"]
mod tests;
