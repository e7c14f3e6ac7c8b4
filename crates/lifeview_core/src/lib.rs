//! # LIFEVIEW Core
//!
//! The per-frame hot path, free of GPU and network concerns:
//! - Decoding a bit-packed frame into renderable cell indices
//! - Handing frames from the network thread to the render thread
//!
//! ## Architecture Rules
//!
//! 1. **No per-bit allocation** - the decoder reuses one worst-case buffer
//! 2. **O(L) decode** - one pass over the frame, work proportional to set bits
//! 3. **Draw never waits** - the mailbox keeps only the newest frame
//!
//! ## Example
//!
//! ```rust
//! use lifeview_core::FrameDecoder;
//!
//! let mut decoder = FrameDecoder::new();
//! let frame = decoder.decode(&[0b1000_0001]);
//! assert_eq!(frame.indices(), &[0.0, 7.0]);
//! assert_eq!(frame.count(), 2);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod decode;
pub mod sync;

pub use decode::{decode, DecodedFrame, FrameDecoder};
pub use sync::{FrameMailbox, MailboxStats};
