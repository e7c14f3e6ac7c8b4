//! # Bit Packing
//!
//! The encoder side of the wire format. The viewer never sends frames; these
//! helpers exist for tools, tests and benchmarks that need to produce them.
//!
//! Packing is MSB-first: the first cell of each group of eight lands in bit 7.

use crate::constants::CELLS_PER_BYTE;

/// Packs one-byte-per-cell liveness (`0` dead, anything else alive) into a
/// frame body.
///
/// A trailing partial group is padded with dead cells.
#[must_use]
pub fn pack_cells(cells: &[u8]) -> Vec<u8> {
    cells
        .chunks(CELLS_PER_BYTE)
        .map(|group| {
            group
                .iter()
                .enumerate()
                .fold(0u8, |byte, (offset, &cell)| byte | (u8::from(cell != 0) << (7 - offset)))
        })
        .collect()
}

/// Packs a set of alive cell indices into a frame body of `body_len` bytes.
///
/// Indices beyond the body are ignored.
#[must_use]
pub fn pack_indices<I>(indices: I, body_len: usize) -> Vec<u8>
where
    I: IntoIterator<Item = usize>,
{
    let mut body = vec![0u8; body_len];
    for index in indices {
        if let Some(byte) = body.get_mut(index / CELLS_PER_BYTE) {
            *byte |= 0x80 >> (index % CELLS_PER_BYTE);
        }
    }
    body
}

/// Total set bits across a frame body, i.e. the alive-cell count.
#[must_use]
pub fn popcount(body: &[u8]) -> usize {
    body.iter().map(|byte| byte.count_ones() as usize).sum()
}
