//! Wayland wire-format constants and message types.
//!
//! Wire format:
//! ```text
//! [object_id:4][opcode:2][size:2][payload:N, zero-padded to 4]
//! ```
//! Total header size: 8 bytes.  All multi-byte integers are little-endian,
//! matching host order on the platforms the reference protocol targets; the
//! opcode and size share one 32-bit word, opcode in the low 16 bits and size
//! in the high 16 bits.  `size` is the total message length in bytes,
//! header included.

// ── Protocol constants ────────────────────────────────────────────────────────

/// Total size of the message header in bytes.
pub const HEADER_SIZE: usize = 8;

/// Maximum total message size in bytes.  The size field is 16 bits, so a
/// message can never exceed this without corrupting the header word.
pub const MAX_MESSAGE_SIZE: usize = u16::MAX as usize;

/// Argument payloads are padded with zero bytes to this boundary.
pub const WORD_SIZE: usize = 4;

/// Well-known id of the `wl_display` object, present on every connection.
pub const DISPLAY_OBJECT_ID: u32 = 1;

/// Opcode of `wl_display::get_registry(new_id)`.
pub const GET_REGISTRY_OPCODE: u16 = 1;

// ── Header and message types ──────────────────────────────────────────────────

/// Decoded form of the 8-byte header prepended to every message on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    /// Id of the protocol object this message is addressed to.
    pub object_id: u32,
    /// Selects the operation invoked on the target object.
    pub opcode: u16,
    /// Total message length in bytes, header plus padded payload.
    pub size: u16,
}

impl MessageHeader {
    /// Length of the padded payload that follows this header.
    ///
    /// The codec rejects headers whose declared size is smaller than
    /// [`HEADER_SIZE`], so this cannot underflow for decoded headers.
    pub fn payload_size(&self) -> usize {
        (self.size as usize).saturating_sub(HEADER_SIZE)
    }
}

/// A transient outgoing request: constructed, encoded, sent, and discarded.
///
/// The size field is deliberately absent.  It is always computed from the
/// payload length at encode time, never stored, so it can never drift out of
/// sync when the payload changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Id of the protocol object this request targets.
    pub object_id: u32,
    /// Operation selector on the target object.
    pub opcode: u16,
    /// Opcode-specific argument bytes, pre-encoded by the caller.
    pub payload: Vec<u8>,
}

impl Message {
    /// Creates a request addressed to `object_id` invoking `opcode` with the
    /// given pre-encoded argument bytes.
    pub fn new(object_id: u32, opcode: u16, payload: Vec<u8>) -> Self {
        Self {
            object_id,
            opcode,
            payload,
        }
    }

    /// Builds the `wl_display::get_registry` request, proposing `new_id` as
    /// the id of the registry object the compositor will create.
    ///
    /// This is the first request of every session: object 1, opcode 1, and a
    /// single 4-byte new-id argument.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waylink_core::{encode_message, Message};
    ///
    /// let bytes = encode_message(&Message::get_registry(2)).unwrap();
    /// assert_eq!(
    ///     bytes,
    ///     [0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x0C, 0x00, 0x02, 0x00, 0x00, 0x00]
    /// );
    /// ```
    pub fn get_registry(new_id: u32) -> Self {
        Self {
            object_id: DISPLAY_OBJECT_ID,
            opcode: GET_REGISTRY_OPCODE,
            payload: new_id.to_le_bytes().to_vec(),
        }
    }
}
