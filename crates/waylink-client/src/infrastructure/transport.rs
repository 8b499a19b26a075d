//! Blocking request/reply transport over a connected stream.
//!
//! A [`Transport`] exclusively owns one connected [`UnixStream`] for its
//! lifetime.  Writes and reads happen in strict program order with exactly
//! one request in flight; the stream is closed exactly once when the
//! transport drops, which covers every error path as well as normal
//! completion.

use std::fmt;
use std::io::{ErrorKind, Read, Write};
use std::os::unix::net::UnixStream;

use thiserror::Error;
use tracing::{debug, trace};

/// Capacity of the fixed inbound reply buffer.
///
/// One blocking read per [`Transport::receive`] call, at most this many
/// bytes: enough for the reply batches compositors send to a single request
/// in practice.  Streaming larger replies across multiple reads is a
/// documented limitation of this layer.
pub const REPLY_CAPACITY: usize = 4096;

/// Errors raised while sending a request or receiving a reply.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The peer stopped accepting bytes mid-message.  A partially sent
    /// request is never reported as success.
    #[error("connection closed after sending {sent} of {total} request bytes")]
    PartialSend { sent: usize, total: usize },

    /// An I/O error occurred while writing the request.
    #[error("failed to send request: {0}")]
    Send(#[source] std::io::Error),

    /// An I/O error occurred while reading the reply.
    #[error("failed to receive reply: {0}")]
    Receive(#[source] std::io::Error),
}

/// A bounded inbound buffer: [`REPLY_CAPACITY`] bytes of storage plus the
/// count of bytes actually filled by the last read.
#[derive(Clone)]
pub struct ReplyBuffer {
    bytes: [u8; REPLY_CAPACITY],
    len: usize,
}

impl ReplyBuffer {
    fn new() -> Self {
        Self {
            bytes: [0; REPLY_CAPACITY],
            len: 0,
        }
    }

    /// The bytes the compositor actually wrote, never the unfilled tail.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Number of bytes received.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the last read returned no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Debug for ReplyBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplyBuffer")
            .field("len", &self.len)
            .field("capacity", &REPLY_CAPACITY)
            .finish()
    }
}

/// Outcome of one receive call.
///
/// An orderly close is reported as its own variant rather than an empty
/// buffer, so callers can tell "the compositor hung up" apart from a
/// populated reply.
#[derive(Debug)]
pub enum Reply {
    /// The compositor wrote at least one byte.
    Data(ReplyBuffer),
    /// The compositor closed its end of the connection.
    Closed,
}

/// Owns a connected stream and performs blocking, strictly ordered
/// request/reply exchanges on it.
pub struct Transport {
    stream: UnixStream,
}

impl Transport {
    /// Takes exclusive ownership of a freshly connected stream.
    pub fn new(stream: UnixStream) -> Self {
        Self { stream }
    }

    /// Writes the entire encoded message, looping until every byte is out.
    ///
    /// # Errors
    ///
    /// - [`TransportError::PartialSend`] if the peer stops accepting bytes
    ///   before the message is complete.
    /// - [`TransportError::Send`] on any other write failure.
    pub fn send(&mut self, message: &[u8]) -> Result<(), TransportError> {
        let mut sent = 0;
        while sent < message.len() {
            match self.stream.write(&message[sent..]) {
                Ok(0) => {
                    return Err(TransportError::PartialSend {
                        sent,
                        total: message.len(),
                    })
                }
                Ok(n) => sent += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(TransportError::Send(e)),
            }
        }
        trace!("sent {} request bytes", message.len());
        Ok(())
    }

    /// Blocks for one inbound read into a fresh [`ReplyBuffer`].
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Receive`] on read failure.  A zero-byte
    /// read is not an error: it is reported as [`Reply::Closed`].
    pub fn receive(&mut self) -> Result<Reply, TransportError> {
        let mut buffer = ReplyBuffer::new();
        let n = loop {
            match self.stream.read(&mut buffer.bytes) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(TransportError::Receive(e)),
            }
        };

        if n == 0 {
            debug!("compositor closed the connection");
            return Ok(Reply::Closed);
        }

        buffer.len = n;
        trace!("received {n} reply bytes");
        Ok(Reply::Data(buffer))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
