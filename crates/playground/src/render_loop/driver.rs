//! The render loop: one simulation step and one draw for every frame the display gives us, for
//! as long as the loop is running.
//!
//! While running there is always exactly one outstanding frame request. Pausing withdraws it,
//! resuming makes a new one. A frame delivered for any other handle is ignored, which is what
//! makes pausing exact: no step ever happens between a pause and the matching resume.

use std::collections::VecDeque;

use super::scheduler::{FrameHandle, Scheduler};
use crate::demos::index::Demo;
use crate::surface::Surface;

/// How many frames are used to average the frame rate.
const FPS_WINDOW: u8 = 30;

/// Whether frames are being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoopState {
    /// A frame is always requested
    Running,
    /// No frame is requested
    Paused,
}

/// `RenderLoop`
pub struct RenderLoop<S: Scheduler> {
    /// What gives us frames
    scheduler: S,
    /// Running or paused
    state: LoopState,
    /// The one frame request we're waiting on
    outstanding: Option<FrameHandle>,
    /// How many frames have been rendered
    frames: u64,
    /// When the previous frame was rendered
    last_frame: Option<std::time::Instant>,
    /// Time between recent frames, in seconds, newest first
    durations: VecDeque<f64>,
    /// Once disposed no more frames are ever requested
    is_disposed: bool,
}

impl<S: Scheduler> RenderLoop<S> {
    /// Instantiate. Starting in the running state requests the first frame straight away.
    pub fn new(scheduler: S, initial: LoopState) -> Self {
        let mut render_loop = Self {
            scheduler,
            state: LoopState::Paused,
            outstanding: None,
            frames: 0,
            last_frame: None,
            durations: VecDeque::with_capacity(usize::from(FPS_WINDOW)),
            is_disposed: false,
        };
        if matches!(initial, LoopState::Running) {
            render_loop.resume();
        }
        render_loop
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> LoopState {
        self.state
    }

    /// Whether frames are being rendered.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running)
    }

    /// How many frames have been rendered.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// The frame request currently being waited on.
    #[must_use]
    pub const fn outstanding(&self) -> Option<FrameHandle> {
        self.outstanding
    }

    /// Access the scheduler, normally to drain due frames.
    pub const fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Flip between running and paused.
    pub fn toggle(&mut self) {
        match self.state {
            LoopState::Running => self.pause(),
            LoopState::Paused => self.resume(),
        }
    }

    /// Stop rendering, cancelling the outstanding frame request.
    pub fn pause(&mut self) {
        if !self.is_running() {
            return;
        }

        if let Some(handle) = self.outstanding.take() {
            self.scheduler.cancel(handle);
        }
        self.state = LoopState::Paused;
        tracing::debug!("Render loop paused after {} frames", self.frames);
    }

    /// Start rendering again.
    pub fn resume(&mut self) {
        if self.is_running() || self.is_disposed {
            return;
        }

        self.state = LoopState::Running;
        self.last_frame = None;
        self.request_frame();
        tracing::debug!("Render loop running");
    }

    /// Ask the scheduler for the next frame.
    fn request_frame(&mut self) {
        self.outstanding = Some(self.scheduler.schedule());
    }

    /// Handle a frame delivered by the scheduler. Returns whether a frame was actually
    /// rendered.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        demo: &mut dyn Demo,
        surface: &mut Surface,
    ) -> bool {
        if !self.is_running() || self.outstanding != Some(handle) {
            tracing::trace!("Ignoring stale frame {handle:?}");
            return false;
        }
        self.outstanding = None;

        if !surface.is_ready() {
            self.request_frame();
            return false;
        }

        self.record_frame_time();
        surface.clear();
        demo.step();
        demo.draw(surface);
        self.frames += 1;
        tracing::trace!(
            "Frame {} rendered, {} bodies",
            self.frames,
            demo.population()
        );

        self.request_frame();
        true
    }

    /// Deliver every frame that is due. Returns how many were rendered.
    pub fn tick(&mut self, demo: &mut dyn Demo, surface: &mut Surface) -> usize {
        let mut rendered = 0;
        for handle in self.scheduler.due() {
            if self.on_frame(handle, demo, surface) {
                rendered += 1;
            }
        }
        rendered
    }

    /// Keep a rolling window of frame times.
    fn record_frame_time(&mut self) {
        let now = std::time::Instant::now();
        if let Some(last) = self.last_frame {
            self.durations
                .push_front(now.duration_since(last).as_secs_f64());
            if self.durations.len() > usize::from(FPS_WINDOW) {
                self.durations.pop_back();
            }
        }
        self.last_frame = Some(now);

        #[expect(
            clippy::integer_division_remainder_used,
            reason = "It's just for occasional logging"
        )]
        let is_report_due = self.frames % u64::from(FPS_WINDOW) == 0;
        if is_report_due {
            if let Some(fps) = self.average_fps() {
                tracing::debug!("FPS: {fps:.3}");
            }
        }
    }

    /// The average frame rate over the last few frames.
    #[must_use]
    pub fn average_fps(&self) -> Option<f64> {
        let total = self.durations.iter().sum::<f64>();
        if self.durations.is_empty() || total <= 0.0 {
            return None;
        }

        #[expect(
            clippy::as_conversions,
            clippy::cast_precision_loss,
            reason = "The window is tiny"
        )]
        let count = self.durations.len() as f64;
        Some(count / total)
    }

    /// Stop for good. No frame is requested after this.
    pub fn dispose(&mut self) {
        if self.is_disposed {
            return;
        }

        self.pause();
        self.is_disposed = true;
        tracing::debug!("Render loop disposed");
    }
}

impl<S: Scheduler> Drop for RenderLoop<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
