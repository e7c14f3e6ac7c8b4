//! View transform shared by the zoom controller and the renderer.

use crate::constants::{DEFAULT_SCALE, MAX_SCALE, MIN_SCALE};

/// Pan offset and zoom scale applied in the vertex shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Horizontal offset in normalized field units.
    pub x_offset: f32,
    /// Vertical offset in normalized field units.
    pub y_offset: f32,
    /// Zoom scale, also the point size in pixels.
    pub scale: f32,
}

impl ViewTransform {
    /// Creates a transform, clamping `scale` into `[MIN_SCALE, MAX_SCALE]`.
    #[must_use]
    pub fn new(x_offset: f32, y_offset: f32, scale: f32) -> Self {
        Self {
            x_offset,
            y_offset,
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
        }
    }

    /// Transform centered on the origin at `scale`.
    #[must_use]
    pub fn centered(scale: f32) -> Self {
        Self::new(0.0, 0.0, scale)
    }

    /// Transform as the `vec4<f32>` the vertex shader expects.
    #[inline]
    #[must_use]
    pub const fn as_uniform(&self) -> [f32; 4] {
        [self.x_offset, self.y_offset, self.scale, 0.0]
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::centered(DEFAULT_SCALE)
    }
}

/// Anything that consumes view transform updates.
///
/// Implemented by the point renderer; the zoom controller pushes into it
/// without knowing about the GPU.
pub trait TransformSink {
    /// Applies a new view transform.
    fn set_transform(&mut self, transform: ViewTransform);
}

impl TransformSink for Option<ViewTransform> {
    fn set_transform(&mut self, transform: ViewTransform) {
        *self = Some(transform);
    }
}
