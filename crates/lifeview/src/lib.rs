//! # LIFEVIEW
//!
//! Real-time viewer for a remotely simulated cellular-automaton field.
//!
//! ## Per-tick flow
//!
//! ```text
//! FrameScheduler due?
//!     │
//!     ▼
//! FrameMailbox::take ──► FramePipeline::on_frame (if a new frame arrived)
//!     │
//!     ▼
//! ZoomController::tick_into(renderer)
//!     │
//!     ▼
//! PointRenderer::draw (every tick, new data or not)
//! ```
//!
//! The binary owns the window and the transport; [`Viewer`] owns everything
//! that runs per tick and is generic over the GPU backend.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod app;
pub mod config;
pub mod error;
pub mod scheduler;

pub use app::{TickReport, Viewer};
pub use config::{GridConfig, RenderConfig, ViewerConfig, WindowConfig, CONFIG_ENV};
pub use error::{ConfigError, ViewerError, ViewerResult};
pub use scheduler::FrameScheduler;
