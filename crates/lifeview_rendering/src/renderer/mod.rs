//! Point renderer and its GPU backends.

mod backend;
mod point_renderer;
mod recording;
mod shaders;
mod stats;
mod uniforms;
mod wgpu_backend;

pub use backend::{DrawOutcome, GpuBackend};
pub use point_renderer::PointRenderer;
pub use recording::{BackendCall, RecordedBuffer, RecordingBackend};
pub use shaders::POINT_SHADER;
pub use stats::RendererStats;
pub use uniforms::ViewUniforms;
pub use wgpu_backend::WgpuBackend;
