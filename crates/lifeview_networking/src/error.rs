//! Transport errors.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors raised while starting or running the transport.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The server URL is not a `ws://` or `wss://` URL.
    #[error("invalid server url '{0}': expected ws:// or wss://")]
    InvalidUrl(String),

    /// The async runtime or transport thread could not be started.
    #[error("failed to start transport: {0}")]
    Startup(#[from] std::io::Error),

    /// WebSocket handshake or stream failure.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// The connection attempt exceeded the configured timeout.
    #[error("connection timed out after {0} ms")]
    ConnectTimeout(u64),
}
