//! # Frame Wire Format
//!
//! A frame body is a bit-packed snapshot of the whole field:
//!
//! ```text
//! byte b:   bit 7   bit 6   ...   bit 0
//! cell:     b*8+0   b*8+1   ...   b*8+7
//! ```
//!
//! Bit `j` (LSB = 0) of byte `b` set means cell `b*8 + (7-j)` is alive.
//!
//! Two framings exist:
//!
//! - [`WireFormat::Raw`]: the message is the body, nothing else.
//! - [`WireFormat::Headered`]: an 8-byte [`FrameHeader`] carrying the grid
//!   side precedes the body, so the renderer never has to guess dimensions.
//!
//! ```text
//! ┌──────┬─────────┬──────────┬──────────────┬─────────────────────┐
//! │ "LV" │ version │ reserved │ side (u32 LE)│ body: ceil(side²/8) │
//! │  2B  │   1B    │    1B    │      4B      │                     │
//! └──────┴─────────┴──────────┴──────────────┴─────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, ProtocolResult};
use crate::grid::GridDims;

/// How inbound messages are framed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    /// Bare bit-packed body.
    #[default]
    Raw,
    /// [`FrameHeader`] followed by the body.
    Headered,
}

/// Fixed header prepended to headered frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHeader {
    /// Grid side length in cells.
    pub side: u32,
}

impl FrameHeader {
    /// Header magic.
    pub const MAGIC: [u8; 2] = *b"LV";
    /// Header version this client speaks.
    pub const VERSION: u8 = 1;
    /// Encoded header size in bytes.
    pub const SIZE: usize = 8;

    /// Creates a header for a `side x side` field.
    #[must_use]
    pub const fn new(side: u32) -> Self {
        Self { side }
    }

    /// Grid dimensions advertised by this header.
    #[must_use]
    pub const fn dims(&self) -> GridDims {
        GridDims::new(self.side)
    }

    /// Encodes the header.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let side = self.side.to_le_bytes();
        [
            Self::MAGIC[0],
            Self::MAGIC[1],
            Self::VERSION,
            0,
            side[0],
            side[1],
            side[2],
            side[3],
        ]
    }

    /// Parses a header and validates the body length that follows it.
    ///
    /// # Errors
    ///
    /// Returns a [`ProtocolError`] if the message is truncated, carries the
    /// wrong magic or version, advertises an empty grid, or its body length
    /// does not match the advertised side.
    pub fn parse(message: &[u8]) -> ProtocolResult<(Self, &[u8])> {
        if message.len() < Self::SIZE {
            return Err(ProtocolError::Truncated {
                needed: Self::SIZE,
                actual: message.len(),
            });
        }

        let (head, body) = message.split_at(Self::SIZE);
        if head[..2] != Self::MAGIC {
            return Err(ProtocolError::BadMagic([head[0], head[1]]));
        }
        if head[2] != Self::VERSION {
            return Err(ProtocolError::UnsupportedVersion(head[2]));
        }

        let side = u32::from_le_bytes([head[4], head[5], head[6], head[7]]);
        if side == 0 {
            return Err(ProtocolError::EmptyGrid);
        }

        let expected = GridDims::new(side).body_len();
        if body.len() != expected {
            return Err(ProtocolError::BodyLength {
                side,
                expected,
                actual: body.len(),
            });
        }

        Ok((Self { side }, body))
    }
}

/// Splits a transport message into optional header and frame body.
///
/// # Errors
///
/// Propagates [`FrameHeader::parse`] failures for headered messages. Raw
/// messages are always accepted.
pub fn split_frame(format: WireFormat, message: &[u8]) -> ProtocolResult<(Option<FrameHeader>, &[u8])> {
    match format {
        WireFormat::Raw => Ok((None, message)),
        WireFormat::Headered => {
            let (header, body) = FrameHeader::parse(message)?;
            Ok((Some(header), body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headered(side: u32, body: &[u8]) -> Vec<u8> {
        let mut message = FrameHeader::new(side).to_bytes().to_vec();
        message.extend_from_slice(body);
        message
    }

    #[test]
    fn test_header_parse_matches_encode() {
        let message = headered(8, &[0xAA; 8]);
        let (header, body) = FrameHeader::parse(&message).unwrap();

        assert_eq!(header.side, 8);
        assert_eq!(body, &[0xAA; 8]);
    }

    #[test]
    fn test_header_non_square_side() {
        // 3x3 = 9 cells -> 2 bytes
        let message = headered(3, &[0x80, 0x80]);
        let (header, body) = FrameHeader::parse(&message).unwrap();

        assert_eq!(header.dims().cell_count(), 9);
        assert_eq!(body.len(), 2);
    }

    #[test]
    fn test_header_rejects_truncated() {
        let err = FrameHeader::parse(&[b'L', b'V', 1]).unwrap_err();
        assert_eq!(err, ProtocolError::Truncated { needed: 8, actual: 3 });
    }

    #[test]
    fn test_header_rejects_bad_magic() {
        let mut message = headered(8, &[0; 8]);
        message[0] = b'X';

        assert_eq!(FrameHeader::parse(&message).unwrap_err(), ProtocolError::BadMagic([b'X', b'V']));
    }

    #[test]
    fn test_header_rejects_version() {
        let mut message = headered(8, &[0; 8]);
        message[2] = 9;

        assert_eq!(FrameHeader::parse(&message).unwrap_err(), ProtocolError::UnsupportedVersion(9));
    }

    #[test]
    fn test_header_rejects_empty_grid() {
        let message = headered(0, &[]);
        assert_eq!(FrameHeader::parse(&message).unwrap_err(), ProtocolError::EmptyGrid);
    }

    #[test]
    fn test_header_rejects_body_length() {
        let message = headered(8, &[0; 7]);
        assert_eq!(
            FrameHeader::parse(&message).unwrap_err(),
            ProtocolError::BodyLength { side: 8, expected: 8, actual: 7 }
        );
    }

    #[test]
    fn test_split_raw_passes_through() {
        let (header, body) = split_frame(WireFormat::Raw, &[1, 2, 3]).unwrap();
        assert!(header.is_none());
        assert_eq!(body, &[1, 2, 3]);
    }

    #[test]
    fn test_wire_format_from_toml() {
        #[derive(Deserialize)]
        struct Section {
            format: WireFormat,
        }

        let section: Section = toml::from_str("format = \"headered\"").unwrap();
        assert_eq!(section.format, WireFormat::Headered);
    }
}
