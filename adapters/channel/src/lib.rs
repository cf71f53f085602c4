#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bidirectional message transport between the client core and the server.
//!
//! The channel carries no business logic: outbound [`ClientMessage`] values
//! are transmitted best-effort with no delivery acknowledgment, and inbound
//! frames are drained by polling, decoded, and handed to the caller in
//! receipt order. While disconnected, `send` is a silent no-op rather than
//! an error, and the core continues operating in a degraded, local-only
//! mode until the server re-pushes an authoritative snapshot after
//! reconnection.

pub mod codec;

mod loopback;

pub use loopback::{LoopbackChannel, LoopbackPair, LoopbackServer};

use square_arena_core::{ClientMessage, ServerMessage};

/// Client-side handle to the duplex sync channel.
pub trait SyncChannel {
    /// Transmits one message, best-effort.
    ///
    /// No delivery acknowledgment exists; when the channel is disconnected
    /// the message is dropped silently.
    fn send(&mut self, message: &ClientMessage);

    /// Drains every message received since the previous call into `out`.
    ///
    /// Frames are decoded and delivered in receipt order, so messages of the
    /// same kind arrive in transmission order. Malformed frames are dropped
    /// with a warning and never reach the caller.
    fn poll(&mut self, out: &mut Vec<ServerMessage>);

    /// Reports whether the link to the server is currently up.
    fn is_connected(&self) -> bool;
}

/// Errors surfaced by channel connection management.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The operation requires a live connection.
    #[error("channel is not connected")]
    NotConnected,
    /// The channel is already connected.
    #[error("channel is already connected")]
    AlreadyConnected,
}
