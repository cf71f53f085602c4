//! In-memory transport that keeps client and server in the same process.
//!
//! The pair shares two byte-frame queues and a connected flag. The client
//! half implements [`SyncChannel`]; the server half is the test and demo
//! surface, able to push frames (including deliberately malformed ones),
//! drain the client's reports, and force the disconnect/reconnect cycle the
//! registry's snapshot recovery is built around.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use log::warn;
use square_arena_core::{ClientMessage, ServerMessage};

use crate::{codec, ChannelError, SyncChannel};

#[derive(Debug, Default)]
struct SharedState {
    connected: AtomicBool,
    client_to_server: Mutex<VecDeque<Vec<u8>>>,
    server_to_client: Mutex<VecDeque<Vec<u8>>>,
}

impl SharedState {
    fn push_frame(queue: &Mutex<VecDeque<Vec<u8>>>, frame: Vec<u8>) {
        if let Ok(mut frames) = queue.lock() {
            frames.push_back(frame);
        }
    }

    fn drain_frames(queue: &Mutex<VecDeque<Vec<u8>>>) -> VecDeque<Vec<u8>> {
        queue
            .lock()
            .map(|mut frames| std::mem::take(&mut *frames))
            .unwrap_or_default()
    }
}

/// A connected pair of loopback channel halves.
#[derive(Debug)]
pub struct LoopbackPair {
    /// Client half handed to the game session.
    pub client: LoopbackChannel,
    /// Server half driven by tests and the demo binary.
    pub server: LoopbackServer,
}

impl LoopbackPair {
    /// Creates a new pair whose link starts connected.
    #[must_use]
    pub fn new() -> Self {
        let state = Arc::new(SharedState {
            connected: AtomicBool::new(true),
            ..SharedState::default()
        });
        Self {
            client: LoopbackChannel {
                state: Arc::clone(&state),
            },
            server: LoopbackServer { state },
        }
    }
}

impl Default for LoopbackPair {
    fn default() -> Self {
        Self::new()
    }
}

/// Client half of the loopback transport.
#[derive(Debug)]
pub struct LoopbackChannel {
    state: Arc<SharedState>,
}

impl SyncChannel for LoopbackChannel {
    fn send(&mut self, message: &ClientMessage) {
        if !self.is_connected() {
            log::debug!("dropping outbound report while disconnected");
            return;
        }
        SharedState::push_frame(&self.state.client_to_server, codec::encode_client(message));
    }

    fn poll(&mut self, out: &mut Vec<ServerMessage>) {
        for frame in SharedState::drain_frames(&self.state.server_to_client) {
            match codec::decode_server(&frame) {
                Ok(message) => out.push(message),
                Err(error) => warn!("dropping inbound frame: {error}"),
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.state.connected.load(Ordering::SeqCst)
    }
}

/// Server half of the loopback transport.
#[derive(Debug)]
pub struct LoopbackServer {
    state: Arc<SharedState>,
}

impl LoopbackServer {
    /// Queues one server message for the client's next poll.
    pub fn push(&mut self, message: &ServerMessage) -> Result<(), ChannelError> {
        self.push_raw(codec::encode_server(message))
    }

    /// Queues raw bytes for the client's next poll.
    ///
    /// Exists so tests can exercise the malformed-frame path.
    pub fn push_raw(&mut self, frame: Vec<u8>) -> Result<(), ChannelError> {
        if !self.is_connected() {
            return Err(ChannelError::NotConnected);
        }
        SharedState::push_frame(&self.state.server_to_client, frame);
        Ok(())
    }

    /// Drains and decodes every report the client has sent so far.
    ///
    /// Reports encoded by the client half always decode; a frame that does
    /// not is dropped with a warning.
    pub fn drain_reports(&mut self) -> Vec<ClientMessage> {
        let mut reports = Vec::new();
        for frame in SharedState::drain_frames(&self.state.client_to_server) {
            match codec::decode_client(&frame) {
                Ok(message) => reports.push(message),
                Err(error) => warn!("dropping client report: {error}"),
            }
        }
        reports
    }

    /// Severs the link, simulating a transport fault.
    pub fn disconnect(&mut self) -> Result<(), ChannelError> {
        if self
            .state
            .connected
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ChannelError::NotConnected);
        }
        Ok(())
    }

    /// Restores the link after a fault.
    ///
    /// The server is expected to follow up with a full `square-list`
    /// snapshot, which the registry treats as authoritative.
    pub fn reconnect(&mut self) -> Result<(), ChannelError> {
        if self
            .state
            .connected
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ChannelError::AlreadyConnected);
        }
        Ok(())
    }

    /// Reports whether the link is currently up.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state.connected.load(Ordering::SeqCst)
    }
}
