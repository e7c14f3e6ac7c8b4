//! Capacity-managed point renderer.

use lifeview_shared::{GridDims, TransformSink, ViewTransform};

use super::backend::{DrawOutcome, GpuBackend};
use super::stats::RendererStats;
use super::uniforms::ViewUniforms;
use crate::error::{RenderError, RenderResult};

/// Draws alive cells as point sprites through a [`GpuBackend`].
///
/// Holds the single vertex buffer, its capacity and the current point count,
/// plus the inputs of the view uniforms. Invariant: `point_count <= capacity`.
///
/// # Example
///
/// ```rust
/// use lifeview_rendering::{PointRenderer, RecordingBackend};
///
/// let mut renderer = PointRenderer::new(RecordingBackend::new(), 800, 600);
/// renderer.ensure_capacity(16).unwrap();
/// renderer.upload(&[0.0, 7.0], 2).unwrap();
/// assert_eq!(renderer.point_count(), 2);
/// ```
#[derive(Debug)]
pub struct PointRenderer<B: GpuBackend> {
    backend: B,
    /// Live vertex buffer; `None` until the first non-zero allocation.
    buffer: Option<B::Buffer>,
    capacity: usize,
    point_count: usize,
    grid: GridDims,
    transform: ViewTransform,
    width: u32,
    height: u32,
    /// Uniform inputs changed since the last flush.
    uniforms_dirty: bool,
    stats: RendererStats,
}

impl<B: GpuBackend> PointRenderer<B> {
    /// Creates a renderer with no vertex buffer.
    pub fn new(mut backend: B, width: u32, height: u32) -> Self {
        backend.set_viewport(width, height);
        Self {
            backend,
            buffer: None,
            capacity: 0,
            point_count: 0,
            grid: GridDims::default(),
            transform: ViewTransform::default(),
            width,
            height,
            uniforms_dirty: true,
            stats: RendererStats::default(),
        }
    }

    // =========================================================================
    // BUFFER MANAGEMENT
    // =========================================================================

    /// Grows the vertex buffer to hold `size` indices.
    ///
    /// No-op when `size <= capacity`. Otherwise a buffer of exactly `size`
    /// entries is created first, then the previous one is released. Capacity
    /// never shrinks. Returns true if the buffer was reallocated.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::BufferTooLarge`] if `size` exceeds what the
    /// backend can allocate. The current buffer stays in place.
    pub fn ensure_capacity(&mut self, size: usize) -> RenderResult<bool> {
        if size <= self.capacity {
            return Ok(false);
        }

        let max = self.backend.max_points();
        if size > max {
            return Err(RenderError::BufferTooLarge {
                requested: size,
                max,
            });
        }

        let replacement = self.backend.create_point_buffer(size)?;
        if let Some(previous) = self.buffer.replace(replacement) {
            self.backend.release_point_buffer(previous);
        }

        tracing::debug!(from = self.capacity, to = size, "point buffer grown");
        self.capacity = size;
        self.stats.reallocations += 1;
        Ok(true)
    }

    /// Copies the first `count` indices into the vertex buffer.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::CapacityExceeded`] if `count` is larger than the
    /// buffer and [`RenderError::CountMismatch`] if it is larger than
    /// `indices`. Nothing is written in either case.
    pub fn upload(&mut self, indices: &[f32], count: usize) -> RenderResult<()> {
        if count > self.capacity {
            return Err(RenderError::CapacityExceeded {
                requested: count,
                capacity: self.capacity,
            });
        }
        if count > indices.len() {
            return Err(RenderError::CountMismatch {
                count,
                available: indices.len(),
            });
        }

        if count > 0 {
            if let Some(buffer) = &self.buffer {
                self.backend.write_points(buffer, &indices[..count]);
            }
        }

        self.point_count = count;
        self.stats.uploads += 1;
        self.stats.last_point_count = count;
        Ok(())
    }

    /// Releases the vertex buffer. The renderer can be reused afterwards.
    pub fn destroy(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.backend.release_point_buffer(buffer);
            tracing::debug!(capacity = self.capacity, "point buffer released");
        }
        self.capacity = 0;
        self.point_count = 0;
    }

    // =========================================================================
    // UNIFORM INPUTS
    // =========================================================================

    /// Sets the grid the indices refer to.
    pub fn set_grid(&mut self, grid: GridDims) {
        if grid != self.grid {
            self.grid = grid;
            self.uniforms_dirty = true;
        }
    }

    /// Sets the view transform. `scale` is clamped to the allowed range.
    pub fn set_transform(&mut self, x_offset: f32, y_offset: f32, scale: f32) {
        self.apply_transform(ViewTransform::new(x_offset, y_offset, scale));
    }

    /// Resizes the viewport and resolution uniform.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.backend.set_viewport(width, height);
        self.uniforms_dirty = true;
    }

    fn apply_transform(&mut self, transform: ViewTransform) {
        if transform != self.transform {
            self.transform = transform;
            self.uniforms_dirty = true;
        }
    }

    // =========================================================================
    // DRAW
    // =========================================================================

    /// Clears to black and draws the current points.
    ///
    /// Pending uniform changes are flushed once before the draw. A zero-sized
    /// surface skips the frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot acquire or present the frame.
    pub fn draw(&mut self) -> RenderResult<DrawOutcome> {
        if self.width == 0 || self.height == 0 {
            self.stats.skipped_draws += 1;
            return Ok(DrawOutcome::Skipped);
        }

        if self.uniforms_dirty {
            let uniforms = self.uniforms();
            self.backend.write_uniforms(&uniforms);
            self.uniforms_dirty = false;
            self.stats.uniform_writes += 1;
        }

        let outcome = self
            .backend
            .draw(self.buffer.as_ref(), self.point_count as u32)?;
        match outcome {
            DrawOutcome::Presented => self.stats.draws += 1,
            DrawOutcome::Skipped => self.stats.skipped_draws += 1,
        }
        Ok(outcome)
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Returns the uniforms for the current state.
    #[must_use]
    pub fn uniforms(&self) -> ViewUniforms {
        ViewUniforms {
            dimensions: self.grid.as_uniform(),
            resolution: [self.width as f32, self.height as f32],
            transform: self.transform.as_uniform(),
        }
    }

    /// Returns the vertex buffer capacity in indices.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of points drawn per frame.
    #[inline]
    #[must_use]
    pub const fn point_count(&self) -> usize {
        self.point_count
    }

    /// Returns the grid dimensions.
    #[inline]
    #[must_use]
    pub const fn grid(&self) -> GridDims {
        self.grid
    }

    /// Returns the current view transform.
    #[inline]
    #[must_use]
    pub const fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Returns the renderer counters.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> RendererStats {
        self.stats
    }

    /// Returns the backend.
    #[inline]
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the backend mutably.
    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl<B: GpuBackend> TransformSink for PointRenderer<B> {
    fn set_transform(&mut self, transform: ViewTransform) {
        self.apply_transform(transform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::{BackendCall, RecordingBackend};

    fn renderer() -> PointRenderer<RecordingBackend> {
        PointRenderer::new(RecordingBackend::new(), 800, 600)
    }

    #[test]
    fn test_capacity_never_shrinks() {
        let mut renderer = renderer();

        assert!(renderer.ensure_capacity(100).unwrap());
        assert!(!renderer.ensure_capacity(50).unwrap());
        assert_eq!(renderer.capacity(), 100);
        assert_eq!(renderer.stats().reallocations, 1);
    }

    #[test]
    fn test_exact_size_allocation() {
        let mut renderer = renderer();
        renderer.ensure_capacity(8).unwrap();
        renderer.ensure_capacity(24).unwrap();

        assert_eq!(renderer.capacity(), 24);
        assert_eq!(renderer.backend().live_buffers(), 1);
    }

    #[test]
    fn test_replacement_created_before_release() {
        let mut renderer = renderer();
        renderer.ensure_capacity(8).unwrap();
        renderer.ensure_capacity(16).unwrap();

        let calls: Vec<_> = renderer
            .backend()
            .calls()
            .iter()
            .filter(|call| {
                matches!(
                    call,
                    BackendCall::CreateBuffer { .. } | BackendCall::ReleaseBuffer { .. }
                )
            })
            .cloned()
            .collect();

        assert_eq!(
            calls,
            vec![
                BackendCall::CreateBuffer { id: 0, capacity: 8 },
                BackendCall::CreateBuffer { id: 1, capacity: 16 },
                BackendCall::ReleaseBuffer { id: 0 },
            ]
        );
    }

    #[test]
    fn test_growth_past_backend_limit_rejected() {
        let mut renderer = PointRenderer::new(RecordingBackend::new().with_max_points(64), 800, 600);
        renderer.ensure_capacity(32).unwrap();
        renderer.upload(&[5.0], 1).unwrap();

        let err = renderer.ensure_capacity(65).unwrap_err();
        assert!(matches!(
            err,
            RenderError::BufferTooLarge {
                requested: 65,
                max: 64
            }
        ));

        // The existing buffer and upload are untouched.
        assert_eq!(renderer.capacity(), 32);
        assert_eq!(renderer.point_count(), 1);
        assert_eq!(renderer.backend().live_buffers(), 1);
        assert_eq!(renderer.stats().reallocations, 1);

        assert!(renderer.ensure_capacity(64).unwrap());
    }

    #[test]
    fn test_upload_sets_point_count() {
        let mut renderer = renderer();
        renderer.ensure_capacity(8).unwrap();
        renderer.upload(&[0.0, 7.0, 0.0, 0.0], 2).unwrap();

        assert_eq!(renderer.point_count(), 2);
        assert_eq!(renderer.backend().last_points(), &[0.0, 7.0]);
    }

    #[test]
    fn test_upload_over_capacity_rejected() {
        let mut renderer = renderer();
        renderer.ensure_capacity(2).unwrap();
        renderer.upload(&[1.0], 1).unwrap();

        let err = renderer.upload(&[0.0, 1.0, 2.0], 3).unwrap_err();
        assert!(matches!(
            err,
            RenderError::CapacityExceeded {
                requested: 3,
                capacity: 2
            }
        ));
        // Previous upload stays in effect.
        assert_eq!(renderer.point_count(), 1);
        assert_eq!(renderer.backend().last_points(), &[1.0]);
    }

    #[test]
    fn test_upload_count_mismatch_rejected() {
        let mut renderer = renderer();
        renderer.ensure_capacity(8).unwrap();

        let err = renderer.upload(&[0.0], 4).unwrap_err();
        assert!(matches!(err, RenderError::CountMismatch { count: 4, available: 1 }));
        assert_eq!(renderer.point_count(), 0);
    }

    #[test]
    fn test_empty_upload_without_buffer() {
        let mut renderer = renderer();
        renderer.upload(&[], 0).unwrap();

        assert_eq!(renderer.point_count(), 0);
        assert_eq!(renderer.draw().unwrap(), DrawOutcome::Presented);
        assert!(matches!(
            renderer.backend().calls().last(),
            Some(BackendCall::Draw { buffer: None, point_count: 0 })
        ));
    }

    #[test]
    fn test_uniform_flush_is_batched() {
        let mut renderer = renderer();
        renderer.set_grid(GridDims::new(4));
        renderer.set_transform(1.0, 2.0, 20.0);
        renderer.resize(1024, 768);

        renderer.draw().unwrap();
        renderer.draw().unwrap();

        assert_eq!(renderer.stats().uniform_writes, 1);
        let uniforms = renderer.backend().last_uniforms().unwrap();
        assert_eq!(uniforms.dimensions, [4.0, 4.0]);
        assert_eq!(uniforms.resolution, [1024.0, 768.0]);
        assert_eq!(uniforms.transform, [1.0, 2.0, 20.0, 0.0]);
    }

    #[test]
    fn test_transform_scale_clamped() {
        let mut renderer = renderer();

        renderer.set_transform(0.0, 0.0, 500.0);
        assert!((renderer.transform().scale - 100.0).abs() < f32::EPSILON);

        renderer.set_transform(0.0, 0.0, 0.1);
        assert!((renderer.transform().scale - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_size_surface_skips_draw() {
        let mut renderer = renderer();
        renderer.resize(0, 600);

        assert_eq!(renderer.draw().unwrap(), DrawOutcome::Skipped);
        assert_eq!(renderer.stats().skipped_draws, 1);
        assert!(!renderer
            .backend()
            .calls()
            .iter()
            .any(|call| matches!(call, BackendCall::Draw { .. })));
    }

    #[test]
    fn test_transform_sink() {
        let mut renderer = renderer();
        TransformSink::set_transform(&mut renderer, ViewTransform::new(0.5, -0.5, 12.0));

        assert_eq!(renderer.uniforms().transform, [0.5, -0.5, 12.0, 0.0]);
    }

    #[test]
    fn test_destroy_releases_buffer() {
        let mut renderer = renderer();
        renderer.ensure_capacity(32).unwrap();
        renderer.upload(&[3.0], 1).unwrap();

        renderer.destroy();

        assert_eq!(renderer.capacity(), 0);
        assert_eq!(renderer.point_count(), 0);
        assert_eq!(renderer.backend().live_buffers(), 0);
    }
}
