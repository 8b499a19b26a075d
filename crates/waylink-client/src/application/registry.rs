//! Round-trip use case: one framed request, one raw reply.
//!
//! [`round_trip`] is the collaborator interface this crate exposes upward:
//! give it a target object id, an opcode, and pre-encoded argument bytes,
//! and it returns the compositor's raw reply.  [`request_registry`] is the
//! fixed `wl_display::get_registry` instance of that template, the first
//! exchange of every session.  Parsing the reply's contents is a
//! collaborator's responsibility, not this layer's.

use thiserror::Error;
use tracing::{debug, info};

use waylink_core::{encode_message, Message, ObjectIdAllocator, WireError};

use crate::infrastructure::socket::{ConnectError, SocketConfig};
use crate::infrastructure::transport::{Reply, Transport, TransportError};

/// Errors surfaced by a round trip, wrapping each stage's own error so the
/// caller can tell resolution, connect, framing, and transport failures
/// apart.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Socket resolution or connection failed.
    #[error("connection error: {0}")]
    Connect(#[from] ConnectError),

    /// The request could not be framed.
    #[error("wire format error: {0}")]
    Wire(#[from] WireError),

    /// Sending or receiving on the connected stream failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The compositor closed the connection instead of replying.
    #[error("compositor closed the connection before replying")]
    ConnectionClosed,
}

/// Performs one request/reply exchange: connect, send, block for the reply,
/// close.
///
/// This is the generalised form of [`request_registry`]: the caller supplies
/// the target object id, the opcode, and pre-encoded argument bytes, and
/// gets the raw reply bytes back verbatim.
///
/// # Errors
///
/// Any [`ClientError`] stage failure.  The connection is closed on every
/// path, error branches included: the transport owns the stream and drops it
/// when this function returns.
pub fn round_trip(
    config: &SocketConfig,
    object_id: u32,
    opcode: u16,
    payload: &[u8],
) -> Result<Vec<u8>, ClientError> {
    exchange(config, &Message::new(object_id, opcode, payload.to_vec()))
}

/// Issues `wl_display::get_registry` and returns the compositor's raw reply.
///
/// Connects, proposes a fresh client id (2 on a fresh session) for the
/// registry object, sends the 12-byte request, and blocks for whatever the
/// compositor writes back.
///
/// # Errors
///
/// Any [`ClientError`] stage failure; an orderly close before any reply
/// bytes is [`ClientError::ConnectionClosed`].
pub fn request_registry(config: &SocketConfig) -> Result<Vec<u8>, ClientError> {
    let ids = ObjectIdAllocator::new();
    let registry_id = ids.next()?;
    info!("requesting registry as object {registry_id}");
    exchange(config, &Message::get_registry(registry_id))
}

fn exchange(config: &SocketConfig, message: &Message) -> Result<Vec<u8>, ClientError> {
    // Frame before connecting: an unencodable request must not open a socket.
    let encoded = encode_message(message)?;

    let mut transport = Transport::new(config.connect()?);
    transport.send(&encoded)?;

    match transport.receive()? {
        Reply::Data(reply) => {
            debug!(
                "round trip to object {} opcode {} returned {} bytes",
                message.object_id,
                message.opcode,
                reply.len()
            );
            Ok(reply.as_bytes().to_vec())
        }
        Reply::Closed => Err(ClientError::ConnectionClosed),
    }
    // `transport` drops here on every branch, closing the stream exactly once.
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn unconnectable_config() -> SocketConfig {
        SocketConfig {
            name: Some("wayland-0".to_owned()),
            wayland_display: None,
            runtime_dir: None, // resolution must fail before any socket exists
            read_timeout: None,
        }
    }

    #[test]
    fn test_round_trip_surfaces_resolution_failure_as_connect_error() {
        let result = round_trip(&unconnectable_config(), 1, 1, &[0, 0, 0, 0]);

        assert!(matches!(
            result,
            Err(ClientError::Connect(ConnectError::BadRuntimeDir { .. }))
        ));
    }

    #[test]
    fn test_oversized_request_fails_before_connecting() {
        // The config is unconnectable, but framing fails first: the error
        // must be the wire error, proving no connect was attempted.
        let payload = vec![0u8; 70_000];

        let result = round_trip(&unconnectable_config(), 1, 0, &payload);

        assert!(matches!(
            result,
            Err(ClientError::Wire(WireError::MessageTooLarge { .. }))
        ));
    }

    #[test]
    fn test_client_error_display_names_the_stage() {
        let err = ClientError::ConnectionClosed;
        assert_eq!(
            err.to_string(),
            "compositor closed the connection before replying"
        );

        let err = ClientError::Wire(WireError::Truncated {
            needed: 8,
            available: 2,
        });
        assert!(err.to_string().starts_with("wire format error:"));
    }
}
