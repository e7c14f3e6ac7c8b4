//! The transport task: connect, receive, reconnect.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use lifeview_core::FrameMailbox;
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::Message;

use super::{ClientState, Reporter, TransportConfig};
use crate::error::TransportError;

/// How a connected session ended.
enum SessionEnd {
    /// Shutdown was requested.
    Shutdown,
    /// The server closed the stream or it failed.
    Closed,
}

type Socket = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

/// Runs until shutdown, or until the first disconnect when reconnect is off.
pub(super) async fn run(
    config: TransportConfig,
    mailbox: Arc<FrameMailbox>,
    reporter: Reporter,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut backoff = config.backoff();
    let connect_timeout = Duration::from_millis(config.connect_timeout_ms);

    loop {
        reporter.set_state(ClientState::Connecting);

        let attempt = tokio::select! {
            _ = shutdown.changed() => break,
            attempt = connect(&config.url, connect_timeout) => attempt,
        };

        match attempt {
            Ok(socket) => {
                backoff.reset();
                reporter.stats(|stats| stats.connections += 1);
                reporter.set_state(ClientState::Connected);
                tracing::info!(url = %config.url, "connected");

                if let SessionEnd::Shutdown = receive(socket, &mailbox, &reporter, &mut shutdown).await {
                    break;
                }
                tracing::warn!("connection closed");
            }
            Err(error) => {
                reporter.stats(|stats| stats.connect_failures += 1);
                tracing::warn!(%error, url = %config.url, "connection failed");
                reporter.error(error.to_string());
            }
        }

        if !config.reconnect {
            break;
        }

        reporter.set_state(ClientState::Reconnecting);
        let delay = backoff.next_delay();
        tracing::debug!(?delay, attempt = backoff.attempts(), "reconnecting");

        tokio::select! {
            _ = shutdown.changed() => break,
            () = tokio::time::sleep(delay) => {}
        }
    }

    reporter.set_state(ClientState::Disconnected);
}

async fn connect(url: &str, timeout: Duration) -> Result<Socket, TransportError> {
    match tokio::time::timeout(timeout, tokio_tungstenite::connect_async(url)).await {
        Ok(Ok((socket, _response))) => Ok(socket),
        Ok(Err(error)) => Err(error.into()),
        Err(_elapsed) => Err(TransportError::ConnectTimeout(timeout.as_millis() as u64)),
    }
}

async fn receive(
    mut socket: Socket,
    mailbox: &FrameMailbox,
    reporter: &Reporter,
    shutdown: &mut watch::Receiver<bool>,
) -> SessionEnd {
    loop {
        let message = tokio::select! {
            _ = shutdown.changed() => {
                let _ = socket.close(None).await;
                return SessionEnd::Shutdown;
            }
            message = socket.next() => message,
        };

        match message {
            Some(Ok(Message::Binary(data))) => {
                reporter.stats(|stats| {
                    stats.frames_received += 1;
                    stats.bytes_received += data.len() as u64;
                });
                if mailbox.post(data.to_vec()) {
                    tracing::trace!("replaced unconsumed frame");
                }
            }
            Some(Ok(Message::Text(text))) => {
                reporter.stats(|stats| stats.text_ignored += 1);
                tracing::debug!(len = text.len(), "ignoring text message");
            }
            Some(Ok(Message::Close(_))) | None => return SessionEnd::Closed,
            Some(Ok(_)) => {}
            Some(Err(error)) => {
                tracing::warn!(%error, "receive failed");
                reporter.error(error.to_string());
                return SessionEnd::Closed;
            }
        }
    }
}
