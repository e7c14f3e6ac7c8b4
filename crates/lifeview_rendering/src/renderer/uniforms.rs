//! GPU-side view uniforms.

use bytemuck::{Pod, Zeroable};

/// Uniform block read by the point shader.
///
/// Layout matches the WGSL `ViewUniforms` struct: two `vec2<f32>` followed
/// by one `vec4<f32>`, 32 bytes total.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ViewUniforms {
    /// Grid dimensions in cells (`[side, side]`).
    pub dimensions: [f32; 2],
    /// Render target size in pixels.
    pub resolution: [f32; 2],
    /// `[x_offset, y_offset, scale, 0]`.
    pub transform: [f32; 4],
}

impl ViewUniforms {
    /// Size in bytes.
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    /// Returns the uniforms as bytes for GPU upload.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
