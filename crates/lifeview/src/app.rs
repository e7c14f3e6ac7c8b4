//! Per-tick viewer state: frame intake, zoom easing and drawing.

use std::sync::Arc;
use std::time::Instant;

use lifeview_core::FrameMailbox;
use lifeview_networking::{FrameOutcome, FramePipeline};
use lifeview_rendering::{DrawOutcome, GpuBackend, PointRenderer};
use lifeview_shared::TransformSink;
use lifeview_ui::{InputEvent, ViewerAction, ViewerInput, ZoomController};

use crate::config::ViewerConfig;
use crate::error::ViewerResult;
use crate::scheduler::FrameScheduler;

/// What one tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Outcome of the frame taken from the mailbox, if one was waiting.
    pub frame: Option<FrameOutcome>,
    /// True if the zoom controller moved the transform.
    pub zoomed: bool,
    /// Draw result.
    pub draw: DrawOutcome,
}

/// The viewer: everything that runs on the render thread.
#[derive(Debug)]
pub struct Viewer<B: GpuBackend> {
    renderer: PointRenderer<B>,
    pipeline: FramePipeline,
    zoom: ZoomController,
    input: ViewerInput,
    scheduler: FrameScheduler,
    mailbox: Arc<FrameMailbox>,
}

impl<B: GpuBackend> Viewer<B> {
    /// Wires a renderer to the mailbox the transport fills.
    pub fn new(mut renderer: PointRenderer<B>, config: &ViewerConfig, mailbox: Arc<FrameMailbox>) -> Self {
        let zoom = ZoomController::new(config.zoom);
        renderer.set_transform(0.0, 0.0, zoom.current());

        let uniforms = renderer.uniforms();
        let input = ViewerInput::new(uniforms.resolution[0] as u32, uniforms.resolution[1] as u32);

        Self {
            renderer,
            pipeline: FramePipeline::new(config.grid.wire_format, config.grid.side),
            zoom,
            input,
            scheduler: FrameScheduler::new(config.render.target_fps),
            mailbox,
        }
    }

    /// Applies one input event. Returns false when the viewer should exit.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match self.input.map(event) {
            Some(ViewerAction::Zoom(delta)) => {
                self.zoom.zoom(delta);
                true
            }
            Some(ViewerAction::Resize { width, height }) => {
                self.renderer.resize(width, height);
                true
            }
            Some(ViewerAction::Exit) => false,
            None => true,
        }
    }

    /// Runs one animation tick.
    ///
    /// Takes the newest frame if one arrived, eases the zoom, then draws.
    /// Draw happens every tick whether or not new data arrived.
    ///
    /// # Errors
    ///
    /// Returns an error if an upload violates the renderer's capacity
    /// contract or the frame cannot be drawn. Both are fatal.
    pub fn tick(&mut self) -> ViewerResult<TickReport> {
        let frame = match self.mailbox.take() {
            Some(message) => Some(self.pipeline.on_frame(&mut self.renderer, &message)?),
            None => None,
        };

        let zoomed = self.zoom.tick_into(&mut self.renderer);
        let draw = self.renderer.draw()?;

        Ok(TickReport { frame, zoomed, draw })
    }

    /// Runs a tick if the scheduler says one is due at `now`.
    ///
    /// # Errors
    ///
    /// Propagates [`Viewer::tick`] errors.
    pub fn tick_if_due(&mut self, now: Instant) -> ViewerResult<Option<TickReport>> {
        if self.scheduler.poll(now) {
            self.tick().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Sets the pan offset.
    pub fn set_offset(&mut self, x_offset: f32, y_offset: f32) {
        self.zoom.set_offset(x_offset, y_offset);
        TransformSink::set_transform(&mut self.renderer, self.zoom.transform());
    }

    /// Releases GPU resources and stops the scheduler.
    pub fn shutdown(&mut self) {
        self.scheduler.stop();
        self.renderer.destroy();
        let stats = self.mailbox.stats();
        tracing::info!(
            frames = self.pipeline.stats().frames,
            rejected = self.pipeline.stats().dropped,
            stale = stats.dropped,
            draws = self.renderer.stats().draws,
            "viewer stopped"
        );
    }

    /// The renderer.
    #[must_use]
    pub const fn renderer(&self) -> &PointRenderer<B> {
        &self.renderer
    }

    /// The zoom controller.
    #[must_use]
    pub const fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    /// The frame pipeline.
    #[must_use]
    pub const fn pipeline(&self) -> &FramePipeline {
        &self.pipeline
    }

    /// The tick scheduler.
    #[must_use]
    pub const fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// The tick scheduler, mutably.
    pub fn scheduler_mut(&mut self) -> &mut FrameScheduler {
        &mut self.scheduler
    }
}
