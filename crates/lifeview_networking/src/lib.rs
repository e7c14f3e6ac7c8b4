//! # LIFEVIEW Networking
//!
//! Everything between the socket and the vertex buffer.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────── transport thread ─────────────────────────┐
//! │  tokio runtime ── WebSocket ── binary message ──► FrameMailbox     │
//! │        ▲                                              (newest wins) │
//! │        └── reconnect with backoff                                   │
//! └──────────────────────────────────────────────────────┼──────────────┘
//!                                                        │ take()
//! ┌───────────────────────── render thread ──────────────▼──────────────┐
//! │  FramePipeline: header check → decode → ensure_capacity → upload    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The transport never touches GPU state and the render thread never waits
//! on the socket.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod pipeline;
pub mod transport;

pub use error::{TransportError, TransportResult};
pub use pipeline::{FrameOutcome, FramePipeline, PipelineStats};
pub use transport::{
    Backoff, ClientState, FrameTransport, TransportConfig, TransportEvent, TransportHandle,
    TransportStats,
};
