//! # LIFEVIEW Shared
//!
//! Types every other crate agrees on: the bit-packed wire format, grid
//! geometry and the view transform.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - `wgpu`
//! - `winit`
//! - Any GPU or window-related crate
//!
//! If you need graphics types, put them in `lifeview_rendering`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod bits;
pub mod constants;
pub mod error;
pub mod grid;
pub mod protocol;
pub mod view;

pub use bits::{pack_cells, pack_indices, popcount};
pub use constants::{
    CELLS_PER_BYTE, DEFAULT_SCALE, DEFAULT_SERVER_URL, MAX_EXACT_CELLS, MAX_SCALE, MIN_SCALE,
    TARGET_FPS,
};
pub use error::{ProtocolError, ProtocolResult};
pub use grid::GridDims;
pub use protocol::{FrameHeader, WireFormat, split_frame};
pub use view::{TransformSink, ViewTransform};
