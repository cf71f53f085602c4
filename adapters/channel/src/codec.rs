//! JSON wire codec for the tagged message enums.
//!
//! Every frame is one JSON document of the shape `{"kind": ..., "payload":
//! ...}`. Encoding a closed enum of serializable fields cannot fail;
//! decoding untrusted bytes can, and the error carries the underlying JSON
//! diagnostics so drops can be logged usefully.

use square_arena_core::{ClientMessage, ServerMessage};

/// Reason a received frame could not be turned into a message.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The frame was not a well-formed message of the expected shape.
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Encodes one outbound client message as a JSON frame.
#[must_use]
pub fn encode_client(message: &ClientMessage) -> Vec<u8> {
    serde_json::to_vec(message).expect("client message serialization never fails")
}

/// Encodes one server message as a JSON frame.
#[must_use]
pub fn encode_server(message: &ServerMessage) -> Vec<u8> {
    serde_json::to_vec(message).expect("server message serialization never fails")
}

/// Decodes one inbound frame into a server message.
pub fn decode_server(bytes: &[u8]) -> Result<ServerMessage, CodecError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Decodes one client report frame.
pub fn decode_client(bytes: &[u8]) -> Result<ClientMessage, CodecError> {
    Ok(serde_json::from_slice(bytes)?)
}
