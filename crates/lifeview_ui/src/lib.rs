//! # LIFEVIEW UI
//!
//! View controls for the point-cloud viewer.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                    CONTROL PATH                         │
//! ├────────────────────────────────────────────────────────┤
//! │  InputEvent → ViewerInput → ViewerAction               │
//! │                                 ↓                       │
//! │                 ZoomController::zoom (desired scale)   │
//! │                                 ↓                       │
//! │   every tick:   ZoomController::tick → TransformSink   │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here knows about windows or GPUs. The binary translates window
//! events into [`InputEvent`] and hands the renderer in as a
//! [`lifeview_shared::TransformSink`].

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod input;
pub mod zoom;

pub use input::{InputEvent, ViewerAction, ViewerInput};
pub use zoom::{ZoomConfig, ZoomController};
