//! # Viewer Constants
//!
//! Defaults baked into the client. Everything here can be overridden by the
//! viewer config file except the wire-level constants.

// =============================================================================
// WIRE FORMAT
// =============================================================================

/// Cells encoded by one byte of a frame body.
pub const CELLS_PER_BYTE: usize = 8;

/// Largest cell count whose indices are exactly representable as `f32`
/// vertex data (2^24, a 4096 x 4096 field).
pub const MAX_EXACT_CELLS: usize = 1 << 24;

// =============================================================================
// NETWORK CONFIGURATION
// =============================================================================

/// Simulation server endpoint used when no config overrides it.
pub const DEFAULT_SERVER_URL: &str = "ws://localhost:80";

// =============================================================================
// VIEW CONFIGURATION
// =============================================================================

/// Smallest allowed zoom scale (one pixel per cell).
pub const MIN_SCALE: f32 = 1.0;

/// Largest allowed zoom scale.
pub const MAX_SCALE: f32 = 100.0;

/// Scale the viewer starts at.
pub const DEFAULT_SCALE: f32 = 10.0;

/// Animation ticks per second.
pub const TARGET_FPS: u32 = 60;
