//! Single-slot, newest-wins frame mailbox.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// Newest-wins slot for raw frame messages.
///
/// Shared between the transport task (producer) and the render loop
/// (consumer), typically behind an `Arc`. The lock is held only for a pointer
/// swap, never across decode or upload.
#[derive(Debug, Default)]
pub struct FrameMailbox {
    /// Latest unconsumed frame.
    slot: Mutex<Option<Vec<u8>>>,
    /// Frames posted.
    posted: AtomicU64,
    /// Frames overwritten before being taken.
    dropped: AtomicU64,
    /// Frames taken.
    taken: AtomicU64,
}

/// Mailbox counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MailboxStats {
    /// Frames posted by the producer.
    pub posted: u64,
    /// Frames replaced before the consumer saw them.
    pub dropped: u64,
    /// Frames handed to the consumer.
    pub taken: u64,
}

impl FrameMailbox {
    /// Creates an empty mailbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts a frame, replacing any frame not yet taken.
    ///
    /// Returns true if an older frame was dropped.
    pub fn post(&self, frame: Vec<u8>) -> bool {
        let previous = self.slot.lock().replace(frame);
        self.posted.fetch_add(1, Ordering::Relaxed);

        let dropped = previous.is_some();
        if dropped {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
        dropped
    }

    /// Takes the newest frame, if one arrived since the last call.
    pub fn take(&self) -> Option<Vec<u8>> {
        let frame = self.slot.lock().take();
        if frame.is_some() {
            self.taken.fetch_add(1, Ordering::Relaxed);
        }
        frame
    }

    /// Returns true if a frame is waiting.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Returns the mailbox counters.
    #[must_use]
    pub fn stats(&self) -> MailboxStats {
        MailboxStats {
            posted: self.posted.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            taken: self.taken.load(Ordering::Relaxed),
        }
    }
}
