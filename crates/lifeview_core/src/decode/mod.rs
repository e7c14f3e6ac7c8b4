//! # Frame Decoder
//!
//! Turns a bit-packed frame body into the ascending list of alive-cell
//! indices the renderer uploads as vertex data.
//!
//! ```text
//! byte 0 = 0b1000_0001   ->  cells 0 and 7 alive
//! byte 1 = 0b0100_0000   ->  cell 9 alive
//!
//! indices: [0.0, 7.0, 9.0]   count: 3
//! ```
//!
//! Indices are `f32` because that is the vertex format. Every index below
//! [`lifeview_shared::MAX_EXACT_CELLS`] is represented exactly.

use lifeview_shared::CELLS_PER_BYTE;

/// Reusable frame decoder.
///
/// Owns a point buffer sized for the worst case seen so far (every bit of the
/// largest frame alive). The buffer only grows, so a stream of similar frames
/// decodes without allocating.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// Worst-case point storage, reused across frames.
    points: Vec<f32>,
    /// Frames decoded so far.
    frames_decoded: u64,
}

/// Result of decoding one frame.
///
/// Borrows the decoder's buffer; it is valid until the next `decode` call.
#[derive(Debug, Clone, Copy)]
pub struct DecodedFrame<'a> {
    indices: &'a [f32],
    capacity: usize,
}

impl<'a> DecodedFrame<'a> {
    /// Alive-cell indices in ascending order.
    #[inline]
    #[must_use]
    pub const fn indices(&self) -> &'a [f32] {
        self.indices
    }

    /// Number of alive cells.
    #[inline]
    #[must_use]
    pub const fn count(&self) -> usize {
        self.indices.len()
    }

    /// Cells the frame can describe (`8 x byte_count`).
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if no cell is alive.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl FrameDecoder {
    /// Creates a decoder with an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            points: Vec::new(),
            frames_decoded: 0,
        }
    }

    /// Creates a decoder pre-sized for frames of `frame_len` bytes.
    #[must_use]
    pub fn with_frame_len(frame_len: usize) -> Self {
        Self {
            points: vec![0.0; frame_len * CELLS_PER_BYTE],
            frames_decoded: 0,
        }
    }

    /// Decodes one frame.
    ///
    /// Bit `j` (LSB = 0) of byte `b` set emits index `b*8 + (7-j)`. Work is
    /// one pass over the bytes plus one step per set bit; zero bytes are
    /// skipped outright.
    pub fn decode(&mut self, frame: &[u8]) -> DecodedFrame<'_> {
        let capacity = frame.len() * CELLS_PER_BYTE;
        if self.points.len() < capacity {
            self.points.resize(capacity, 0.0);
        }

        let mut count = 0;
        for (byte_index, &byte) in frame.iter().enumerate() {
            let base = byte_index * CELLS_PER_BYTE;
            let mut bits = byte;
            while bits != 0 {
                // Distance from the MSB is the cell offset inside the group.
                let offset = bits.leading_zeros() as usize;
                self.points[count] = (base + offset) as f32;
                count += 1;
                bits &= !(0x80 >> offset);
            }
        }

        self.frames_decoded += 1;
        DecodedFrame {
            indices: &self.points[..count],
            capacity,
        }
    }

    /// Size of the reusable point buffer.
    #[inline]
    #[must_use]
    pub fn buffer_len(&self) -> usize {
        self.points.len()
    }

    /// Frames decoded since creation.
    #[inline]
    #[must_use]
    pub const fn frames_decoded(&self) -> u64 {
        self.frames_decoded
    }
}

/// Decodes a frame into an owned index list.
///
/// Convenience wrapper for one-off decoding; the hot path should keep a
/// [`FrameDecoder`] around instead.
#[must_use]
pub fn decode(frame: &[u8]) -> (Vec<f32>, usize) {
    let mut decoder = FrameDecoder::new();
    let decoded = decoder.decode(frame);
    let count = decoded.count();
    (decoded.indices().to_vec(), count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeview_shared::{pack_indices, popcount};

    #[test]
    fn test_first_and_last_bit() {
        let (indices, count) = decode(&[0b1000_0001]);
        assert_eq!(indices, vec![0.0, 7.0]);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_all_dead() {
        let (indices, count) = decode(&[0x00, 0x00]);
        assert!(indices.is_empty());
        assert_eq!(count, 0);
    }

    #[test]
    fn test_all_alive() {
        let (indices, count) = decode(&[0xFF]);
        assert_eq!(indices, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(count, 8);
    }

    #[test]
    fn test_empty_frame() {
        let mut decoder = FrameDecoder::new();
        let frame = decoder.decode(&[]);

        assert!(frame.is_empty());
        assert_eq!(frame.capacity(), 0);
    }

    #[test]
    fn test_byte_offsets() {
        let (indices, _) = decode(&[0x00, 0b0100_0000, 0b0000_0001]);
        assert_eq!(indices, vec![9.0, 23.0]);
    }

    #[test]
    fn test_buffer_is_reused() {
        let mut decoder = FrameDecoder::new();
        decoder.decode(&[0xFF; 16]);
        let len = decoder.buffer_len();

        let frame = decoder.decode(&[0x01; 4]);
        assert_eq!(frame.count(), 4);
        assert_eq!(frame.capacity(), 32);
        assert_eq!(decoder.buffer_len(), len);
        assert_eq!(decoder.frames_decoded(), 2);
    }

    #[test]
    fn test_stale_points_do_not_leak() {
        let mut decoder = FrameDecoder::new();
        decoder.decode(&[0xFF, 0xFF]);

        let frame = decoder.decode(&[0x80, 0x00]);
        assert_eq!(frame.indices(), &[0.0]);
    }

    #[test]
    fn test_count_matches_popcount() {
        let mut decoder = FrameDecoder::new();
        let mut seed = 0x2545_F491_u32;

        for len in [1usize, 7, 64, 513] {
            let body: Vec<u8> = (0..len)
                .map(|_| {
                    seed ^= seed << 13;
                    seed ^= seed >> 17;
                    seed ^= seed << 5;
                    seed as u8
                })
                .collect();

            let frame = decoder.decode(&body);
            assert_eq!(frame.count(), popcount(&body));
        }
    }

    #[test]
    fn test_indices_strictly_increasing() {
        let body: Vec<u8> = (0..=255u8).collect();
        let (indices, _) = decode(&body);

        assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_reencode_reproduces_frame() {
        let body: Vec<u8> = (0..=255u8).rev().collect();
        let (indices, _) = decode(&body);

        let reencoded = pack_indices(indices.iter().map(|&index| index as usize), body.len());
        assert_eq!(reencoded, body);
    }
}
