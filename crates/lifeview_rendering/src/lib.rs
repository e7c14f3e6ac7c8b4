//! # LIFEVIEW Rendering
//!
//! Draws the alive cells of a square grid as one point sprite per cell.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       POINT RENDERER                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  decoded indices ──upload──► vertex buffer (capacity N)       │
//! │                                    │                          │
//! │  grid / resolution / transform ──► ViewUniforms (dirty flag)  │
//! │                                    │                          │
//! │                         GpuBackend::draw (instanced quads)    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! `PointRenderer` owns the capacity and upload rules. The GPU work sits
//! behind [`GpuBackend`]: [`WgpuBackend`] for the window, [`RecordingBackend`]
//! for headless runs.
//!
//! ## Rules
//!
//! - The vertex buffer is reallocated only when a frame needs more room
//! - A replacement buffer is created before the old one is released
//! - Uploads past capacity are rejected, never truncated

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod renderer;

pub use error::{RenderError, RenderResult};
pub use renderer::{
    BackendCall, DrawOutcome, GpuBackend, PointRenderer, RecordedBuffer, RecordingBackend,
    RendererStats, ViewUniforms, WgpuBackend, POINT_SHADER,
};
