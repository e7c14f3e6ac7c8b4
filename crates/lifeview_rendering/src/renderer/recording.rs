//! Headless backend that records every GPU call.
//!
//! Used by unit tests, integration tests and benchmarks. Point data of the
//! most recent write is kept in one reused buffer so long runs do not grow
//! the call log with frame payloads.

use super::backend::{DrawOutcome, GpuBackend};
use super::uniforms::ViewUniforms;
use crate::error::{RenderError, RenderResult};

/// Buffer handle issued by [`RecordingBackend`].
#[derive(Debug, PartialEq, Eq)]
pub struct RecordedBuffer {
    /// Creation order, starting at 0.
    pub id: u64,
    /// Capacity in indices.
    pub capacity: usize,
}

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    /// A vertex buffer was created.
    CreateBuffer {
        /// Buffer id.
        id: u64,
        /// Capacity in indices.
        capacity: usize,
    },
    /// A vertex buffer was released.
    ReleaseBuffer {
        /// Buffer id.
        id: u64,
    },
    /// Points were written to a buffer.
    WritePoints {
        /// Target buffer id.
        id: u64,
        /// Number of indices written.
        len: usize,
    },
    /// Uniforms were written.
    WriteUniforms(ViewUniforms),
    /// The viewport changed.
    SetViewport {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// A frame was drawn.
    Draw {
        /// Bound buffer id, if any.
        buffer: Option<u64>,
        /// Points drawn.
        point_count: u32,
    },
}

/// Records calls instead of talking to a GPU.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
    next_id: u64,
    live_buffers: usize,
    last_points: Vec<f32>,
    last_uniforms: Option<ViewUniforms>,
    record_calls: bool,
    /// Allocation cap; unlimited when `None`.
    max_points: Option<usize>,
}

impl RecordingBackend {
    /// Creates a backend that logs every call.
    #[must_use]
    pub fn new() -> Self {
        Self {
            record_calls: true,
            ..Self::default()
        }
    }

    /// Creates a backend that only tracks state, for long benchmark runs.
    #[must_use]
    pub fn quiet() -> Self {
        Self::default()
    }

    /// Caps buffer allocations at `max_points` indices, like a device limit.
    #[must_use]
    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = Some(max_points);
        self
    }

    /// Recorded calls, oldest first.
    #[must_use]
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Clears the call log.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Buffers created and not yet released.
    #[must_use]
    pub const fn live_buffers(&self) -> usize {
        self.live_buffers
    }

    /// Contents of the most recent point write.
    #[must_use]
    pub fn last_points(&self) -> &[f32] {
        &self.last_points
    }

    /// Most recently written uniforms.
    #[must_use]
    pub const fn last_uniforms(&self) -> Option<ViewUniforms> {
        self.last_uniforms
    }

    fn record(&mut self, call: BackendCall) {
        if self.record_calls {
            self.calls.push(call);
        }
    }
}

impl GpuBackend for RecordingBackend {
    type Buffer = RecordedBuffer;

    fn max_points(&self) -> usize {
        self.max_points.unwrap_or(usize::MAX)
    }

    fn create_point_buffer(&mut self, capacity: usize) -> RenderResult<Self::Buffer> {
        let max = self.max_points();
        if capacity > max {
            return Err(RenderError::BufferTooLarge {
                requested: capacity,
                max,
            });
        }
        let id = self.next_id;
        self.next_id += 1;
        self.live_buffers += 1;
        self.record(BackendCall::CreateBuffer { id, capacity });
        Ok(RecordedBuffer { id, capacity })
    }

    fn release_point_buffer(&mut self, buffer: Self::Buffer) {
        self.live_buffers -= 1;
        self.record(BackendCall::ReleaseBuffer { id: buffer.id });
    }

    fn write_points(&mut self, buffer: &Self::Buffer, points: &[f32]) {
        debug_assert!(
            points.len() <= buffer.capacity,
            "write of {} points into buffer {} of capacity {}",
            points.len(),
            buffer.id,
            buffer.capacity
        );
        self.last_points.clear();
        self.last_points.extend_from_slice(points);
        self.record(BackendCall::WritePoints {
            id: buffer.id,
            len: points.len(),
        });
    }

    fn write_uniforms(&mut self, uniforms: &ViewUniforms) {
        self.last_uniforms = Some(*uniforms);
        self.record(BackendCall::WriteUniforms(*uniforms));
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.record(BackendCall::SetViewport { width, height });
    }

    fn draw(&mut self, buffer: Option<&Self::Buffer>, point_count: u32) -> RenderResult<DrawOutcome> {
        self.record(BackendCall::Draw {
            buffer: buffer.map(|buffer| buffer.id),
            point_count,
        });
        Ok(DrawOutcome::Presented)
    }
}
