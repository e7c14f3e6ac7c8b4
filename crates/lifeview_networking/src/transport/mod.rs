//! # Transport Layer
//!
//! WebSocket client running on its own thread with a single-threaded tokio
//! runtime.
//!
//! ## Design
//!
//! - Binary messages are frames, posted to a shared [`FrameMailbox`]
//! - Text messages are ignored
//! - Close or error triggers reconnect with [`Backoff`]
//! - State changes and errors go out on a crossbeam channel
//! - Shutdown is a tokio watch signal; the thread is joined on drop
//!
//! [`FrameMailbox`]: lifeview_core::FrameMailbox

mod backoff;
mod session;

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use lifeview_core::FrameMailbox;
use lifeview_shared::DEFAULT_SERVER_URL;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::{TransportError, TransportResult};

pub use backoff::Backoff;

/// Connection state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClientState {
    /// Not connected.
    #[default]
    Disconnected,
    /// Handshake in progress.
    Connecting,
    /// Connected and receiving frames.
    Connected,
    /// Connection lost, waiting to retry.
    Reconnecting,
}

/// Transport configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Server URL (`ws://` or `wss://`).
    pub url: String,
    /// Reconnect after the connection drops.
    pub reconnect: bool,
    /// First reconnect delay in milliseconds.
    pub initial_backoff_ms: u64,
    /// Reconnect delay ceiling in milliseconds.
    pub max_backoff_ms: u64,
    /// Handshake timeout in milliseconds.
    pub connect_timeout_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVER_URL.to_string(),
            reconnect: true,
            initial_backoff_ms: 250,
            max_backoff_ms: 10_000,
            connect_timeout_ms: 5_000,
        }
    }
}

impl TransportConfig {
    /// Checks the URL scheme.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidUrl`] for anything but `ws://` or
    /// `wss://`.
    pub fn validate(&self) -> TransportResult<()> {
        if self.url.starts_with("ws://") || self.url.starts_with("wss://") {
            Ok(())
        } else {
            Err(TransportError::InvalidUrl(self.url.clone()))
        }
    }

    fn backoff(&self) -> Backoff {
        Backoff::new(
            Duration::from_millis(self.initial_backoff_ms),
            Duration::from_millis(self.max_backoff_ms),
        )
    }
}

/// Something the transport wants the viewer to know.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportEvent {
    /// The connection state changed.
    StateChanged(ClientState),
    /// A connection attempt or session failed.
    Error(String),
}

/// Transport statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransportStats {
    /// Binary frames received.
    pub frames_received: u64,
    /// Bytes of binary frames received.
    pub bytes_received: u64,
    /// Text messages ignored.
    pub text_ignored: u64,
    /// Successful connections.
    pub connections: u64,
    /// Failed connection attempts.
    pub connect_failures: u64,
}

/// State shared between the transport thread and its handle.
#[derive(Debug, Default)]
struct Shared {
    state: Mutex<ClientState>,
    stats: Mutex<TransportStats>,
}

/// Sender side used inside the transport task.
#[derive(Debug, Clone)]
struct Reporter {
    shared: Arc<Shared>,
    events: Sender<TransportEvent>,
}

impl Reporter {
    fn set_state(&self, state: ClientState) {
        let changed = {
            let mut current = self.shared.state.lock();
            let changed = *current != state;
            *current = state;
            changed
        };
        if changed {
            tracing::debug!(?state, "transport state");
            // The viewer may have stopped listening; state is still readable.
            let _ = self.events.send(TransportEvent::StateChanged(state));
        }
    }

    fn error(&self, message: String) {
        let _ = self.events.send(TransportEvent::Error(message));
    }

    fn stats(&self, update: impl FnOnce(&mut TransportStats)) {
        update(&mut *self.shared.stats.lock());
    }
}

/// Entry point for starting the transport.
#[derive(Debug)]
pub struct FrameTransport;

impl FrameTransport {
    /// Starts the transport thread.
    ///
    /// Frames land in `mailbox`; the returned handle exposes state, stats,
    /// events and shutdown.
    ///
    /// # Errors
    ///
    /// Fails if the URL is invalid or the runtime or thread cannot start.
    pub fn spawn(config: TransportConfig, mailbox: Arc<FrameMailbox>) -> TransportResult<TransportHandle> {
        config.validate()?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (events_tx, events_rx) = crossbeam_channel::unbounded();
        let shared = Arc::new(Shared::default());
        let reporter = Reporter {
            shared: Arc::clone(&shared),
            events: events_tx,
        };

        tracing::info!(url = %config.url, "starting transport");
        let thread = std::thread::Builder::new()
            .name("lifeview-transport".to_string())
            .spawn(move || {
                runtime.block_on(session::run(config, mailbox, reporter, shutdown_rx));
            })?;

        Ok(TransportHandle {
            shared,
            events: events_rx,
            shutdown: shutdown_tx,
            thread: Some(thread),
        })
    }
}

/// Handle to a running transport. Dropping it shuts the transport down.
#[derive(Debug)]
pub struct TransportHandle {
    shared: Arc<Shared>,
    events: Receiver<TransportEvent>,
    shutdown: watch::Sender<bool>,
    thread: Option<JoinHandle<()>>,
}

impl TransportHandle {
    /// Current connection state.
    #[must_use]
    pub fn state(&self) -> ClientState {
        *self.shared.state.lock()
    }

    /// Transport counters.
    #[must_use]
    pub fn stats(&self) -> TransportStats {
        *self.shared.stats.lock()
    }

    /// Drains pending events without blocking.
    pub fn poll_events(&self) -> impl Iterator<Item = TransportEvent> + '_ {
        self.events.try_iter()
    }

    /// Event receiver, for callers that want to block or select.
    #[must_use]
    pub const fn events(&self) -> &Receiver<TransportEvent> {
        &self.events
    }

    /// Returns true while the transport thread is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.thread
            .as_ref()
            .is_some_and(|thread| !thread.is_finished())
    }

    /// Stops the transport and joins its thread.
    pub fn shutdown(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };
        let _ = self.shutdown.send(true);
        if thread.join().is_err() {
            tracing::error!("transport thread panicked");
        }
        tracing::info!("transport stopped");
    }
}

impl Drop for TransportHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
