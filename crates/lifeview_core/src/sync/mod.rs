//! # Frame Hand-off Between Threads
//!
//! ## The Problem
//!
//! ```text
//! Thread 1 (Network):  frames arrive at the server's tick rate
//! Thread 2 (Render):   draws at the display's refresh rate
//!
//! Queue every frame:   render falls behind -> unbounded backlog
//! Block on the socket: draw waits on the network -> stutter
//! ```
//!
//! ## The Solution: A Single-Slot Mailbox
//!
//! ```text
//! post(N)   -> slot = N
//! post(N+1) -> slot = N+1   (N dropped, counted)
//! take()    -> N+1
//! take()    -> None         (render keeps drawing its last upload)
//! ```
//!
//! Frame drops are acceptable; draws never wait on decode.

mod mailbox;

pub use mailbox::{FrameMailbox, MailboxStats};
