//! Viewer errors.

use std::path::PathBuf;

use lifeview_networking::TransportError;
use lifeview_rendering::RenderError;
use thiserror::Error;

/// Result type for viewer operations.
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::ViewerConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be written as TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors that stop the viewer.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// Configuration problem.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// GPU setup or rendering failure.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Transport could not start.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The event loop failed.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// The window could not be created.
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
}
