//! Renderer statistics.

/// Counters kept by [`super::PointRenderer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RendererStats {
    /// Draw calls issued to the backend.
    pub draws: u64,
    /// Draws skipped (zero-sized surface or lost frame).
    pub skipped_draws: u64,
    /// Successful uploads.
    pub uploads: u64,
    /// Vertex buffer reallocations.
    pub reallocations: u64,
    /// Points in the most recent upload.
    pub last_point_count: usize,
    /// Uniform flushes.
    pub uniform_writes: u64,
}

impl RendererStats {
    /// Returns the share of draws that were skipped.
    #[must_use]
    pub fn skip_ratio(&self) -> f32 {
        let total = self.draws + self.skipped_draws;
        if total > 0 {
            self.skipped_draws as f32 / total as f32
        } else {
            0.0
        }
    }
}
