//! # Protocol Error Types
//!
//! Errors raised while splitting a transport message into header and body.
//! Decoding the body itself cannot fail.

use thiserror::Error;

/// Errors that can occur when validating an inbound frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Message shorter than the fixed frame header.
    #[error("frame truncated: need {needed} header bytes, got {actual}")]
    Truncated {
        /// Bytes required.
        needed: usize,
        /// Bytes received.
        actual: usize,
    },

    /// Header does not start with the frame magic.
    #[error("bad frame magic: {0:02x?}")]
    BadMagic([u8; 2]),

    /// Header version this client does not speak.
    #[error("unsupported frame version {0}")]
    UnsupportedVersion(u8),

    /// Header advertises an empty grid.
    #[error("frame header advertises a zero-sized grid")]
    EmptyGrid,

    /// Body length disagrees with the advertised grid side.
    #[error("frame body is {actual} bytes, side {side} needs {expected}")]
    BodyLength {
        /// Side from the header.
        side: u32,
        /// Bytes the side requires.
        expected: usize,
        /// Bytes received.
        actual: usize,
    },
}

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
