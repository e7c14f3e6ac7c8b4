//! The seam between renderer bookkeeping and GPU calls.

use super::uniforms::ViewUniforms;
use crate::error::RenderResult;

/// What happened to a draw request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The frame was rendered and presented.
    Presented,
    /// The frame was skipped (zero-sized or reconfigured surface).
    Skipped,
}

/// GPU operations the point renderer needs.
///
/// Buffers are owned values: the renderer holds at most one live
/// `Self::Buffer` and hands it back through `release_point_buffer`.
pub trait GpuBackend {
    /// Handle to a vertex buffer of `f32` cell indices.
    type Buffer: std::fmt::Debug;

    /// Largest vertex buffer this backend can allocate, in indices.
    fn max_points(&self) -> usize;

    /// Allocates a vertex buffer holding exactly `capacity` indices.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::BufferTooLarge`] if `capacity` exceeds
    /// [`GpuBackend::max_points`].
    ///
    /// [`RenderError::BufferTooLarge`]: crate::RenderError::BufferTooLarge
    fn create_point_buffer(&mut self, capacity: usize) -> RenderResult<Self::Buffer>;

    /// Releases a buffer created by this backend.
    fn release_point_buffer(&mut self, buffer: Self::Buffer);

    /// Writes `points` at offset 0 of `buffer`.
    fn write_points(&mut self, buffer: &Self::Buffer, points: &[f32]);

    /// Writes the view uniforms.
    fn write_uniforms(&mut self, uniforms: &ViewUniforms);

    /// Resizes the render target and viewport.
    fn set_viewport(&mut self, width: u32, height: u32);

    /// Clears to black and draws `point_count` points from `buffer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be acquired and the failure is
    /// not recoverable by skipping it.
    fn draw(&mut self, buffer: Option<&Self::Buffer>, point_count: u32) -> RenderResult<DrawOutcome>;
}
