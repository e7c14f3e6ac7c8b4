//! Rendering errors.

use thiserror::Error;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised by the point renderer and its backends.
#[derive(Error, Debug)]
pub enum RenderError {
    /// More points were uploaded than the vertex buffer holds.
    #[error("upload of {requested} points exceeds buffer capacity {capacity}")]
    CapacityExceeded {
        /// Points in the upload.
        requested: usize,
        /// Current buffer capacity.
        capacity: usize,
    },

    /// The upload count is larger than the slice it claims to describe.
    #[error("upload count {count} exceeds the {available} indices provided")]
    CountMismatch {
        /// Requested count.
        count: usize,
        /// Indices actually provided.
        available: usize,
    },

    /// A vertex buffer larger than the device allows was requested.
    #[error("point buffer of {requested} indices exceeds the device limit of {max}")]
    BufferTooLarge {
        /// Indices requested.
        requested: usize,
        /// Largest buffer the backend can allocate, in indices.
        max: usize,
    },

    /// Shader module or render pipeline failed validation.
    #[error("shader compilation failed: {log}")]
    ShaderCompilation {
        /// Validation log from the driver.
        log: String,
    },

    /// Surface creation failed.
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    /// No adapter is compatible with the surface.
    #[error("no compatible GPU adapter found")]
    AdapterUnavailable,

    /// Device request failed.
    #[error("failed to create device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    /// The surface reports no usable texture format.
    #[error("surface exposes no texture formats")]
    NoSurfaceFormat,

    /// The GPU ran out of memory while acquiring a frame.
    #[error("GPU out of memory")]
    OutOfMemory,
}
