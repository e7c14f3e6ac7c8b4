//! # Frame Pipeline
//!
//! One stable stage for every inbound message:
//!
//! ```text
//! message ─► split_frame ─► decode ─► ensure_capacity ─► set_grid ─► upload
//!              │ malformed                     │ over device limit
//!              └─► dropped (renderer untouched) ◄┘
//! ```
//!
//! The first accepted frame bootstraps the renderer: it sizes the vertex
//! buffer to that frame's worst case and fixes the grid. Later frames reuse
//! the buffer and only grow it when they need more room.

use lifeview_core::FrameDecoder;
use lifeview_rendering::{GpuBackend, PointRenderer, RenderError, RenderResult};
use lifeview_shared::{split_frame, GridDims, ProtocolError, WireFormat, MAX_EXACT_CELLS};

/// Result of feeding one message through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// First frame: buffer allocated and grid fixed.
    Bootstrapped {
        /// Alive cells uploaded.
        points: usize,
        /// Grid in effect.
        grid: GridDims,
    },
    /// A later frame replaced the uploaded points.
    Updated {
        /// Alive cells uploaded.
        points: usize,
    },
    /// The message was rejected before decoding.
    Dropped(ProtocolError),
    /// The frame needs a larger vertex buffer than the device can allocate.
    Oversized {
        /// Worst-case points for the frame.
        requested: usize,
        /// Largest buffer the device allows, in points.
        max: usize,
    },
}

/// Pipeline counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Frames uploaded.
    pub frames: u64,
    /// Messages rejected by the wire check or the buffer size limit.
    pub dropped: u64,
    /// Alive cells in the last uploaded frame.
    pub last_points: usize,
}

/// Decodes inbound messages and feeds them to a [`PointRenderer`].
#[derive(Debug)]
pub struct FramePipeline {
    decoder: FrameDecoder,
    wire: WireFormat,
    /// Side from configuration; headers override it.
    configured_grid: Option<GridDims>,
    bootstrapped: bool,
    precision_warned: bool,
    stats: PipelineStats,
}

impl FramePipeline {
    /// Creates a pipeline for the given framing.
    ///
    /// `grid_side` is used for raw frames. Without it, raw frames are laid out
    /// on the smallest square that covers the frame.
    #[must_use]
    pub fn new(wire: WireFormat, grid_side: Option<u32>) -> Self {
        Self {
            decoder: FrameDecoder::new(),
            wire,
            configured_grid: grid_side.map(GridDims::new),
            bootstrapped: false,
            precision_warned: false,
            stats: PipelineStats::default(),
        }
    }

    /// Feeds one message through the pipeline.
    ///
    /// Malformed messages are logged and reported as
    /// [`FrameOutcome::Dropped`], frames too large for the device as
    /// [`FrameOutcome::Oversized`]. In both cases the renderer keeps its
    /// previous state.
    ///
    /// # Errors
    ///
    /// Returns the renderer's error if the upload violates its contract.
    pub fn on_frame<B: GpuBackend>(
        &mut self,
        renderer: &mut PointRenderer<B>,
        message: &[u8],
    ) -> RenderResult<FrameOutcome> {
        let (header, body) = match split_frame(self.wire, message) {
            Ok(parts) => parts,
            Err(error) => {
                tracing::warn!(%error, len = message.len(), "dropping malformed frame");
                self.stats.dropped += 1;
                return Ok(FrameOutcome::Dropped(error));
            }
        };

        let decoded = self.decoder.decode(body);
        let grid = header
            .map(|header| header.dims())
            .or(self.configured_grid)
            .unwrap_or_else(|| GridDims::covering(decoded.capacity()));

        if decoded.capacity() > MAX_EXACT_CELLS && !self.precision_warned {
            tracing::warn!(
                cells = decoded.capacity(),
                "field exceeds exact f32 index range, far cells may be misplaced"
            );
            self.precision_warned = true;
        }

        match renderer.ensure_capacity(decoded.capacity()) {
            Ok(true) if self.bootstrapped => {
                tracing::debug!(capacity = renderer.capacity(), "frame outgrew point buffer");
            }
            Ok(_) => {}
            Err(RenderError::BufferTooLarge { requested, max }) => {
                tracing::warn!(requested, max, "dropping frame larger than the device buffer limit");
                self.stats.dropped += 1;
                return Ok(FrameOutcome::Oversized { requested, max });
            }
            Err(error) => return Err(error),
        }
        renderer.set_grid(grid);
        renderer.upload(decoded.indices(), decoded.count())?;

        let points = decoded.count();
        self.stats.frames += 1;
        self.stats.last_points = points;

        if self.bootstrapped {
            Ok(FrameOutcome::Updated { points })
        } else {
            self.bootstrapped = true;
            tracing::info!(
                side = grid.side(),
                capacity = renderer.capacity(),
                points,
                "first frame received"
            );
            Ok(FrameOutcome::Bootstrapped { points, grid })
        }
    }

    /// Returns true once a frame has been uploaded.
    #[inline]
    #[must_use]
    pub const fn is_bootstrapped(&self) -> bool {
        self.bootstrapped
    }

    /// Returns the framing in use.
    #[inline]
    #[must_use]
    pub const fn wire_format(&self) -> WireFormat {
        self.wire
    }

    /// Returns the pipeline counters.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> PipelineStats {
        self.stats
    }
}
