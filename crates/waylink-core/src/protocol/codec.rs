//! Binary codec for encoding and decoding Wayland wire messages.
//!
//! Wire format:
//! ```text
//! [object_id:4][opcode:2][size:2][payload:N, zero-padded to 4]
//! ```
//! All multi-byte integers are little-endian.  The opcode and size fields
//! share one 32-bit word: `word = (size << 16) | opcode`.  This layout must
//! match the reference protocol bit-for-bit; compliant compositors will drop
//! the connection (or silently misbehave) on a malformed header.

use thiserror::Error;

use crate::protocol::wire::{Message, MessageHeader, HEADER_SIZE, MAX_MESSAGE_SIZE, WORD_SIZE};

/// Errors that can occur during message encoding or decoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    /// The encoded message would not fit in the 16-bit size field.
    #[error("message is {size} bytes; the 16-bit size field caps messages at 65535")]
    MessageTooLarge { size: usize },

    /// The buffer ends before the message it declares is complete.  A short
    /// read is never treated as a valid shorter message.
    #[error("truncated message: need {needed} bytes, got {available}")]
    Truncated { needed: usize, available: usize },

    /// The header declares a total size smaller than the header itself.
    #[error("header declares impossible size {size} (minimum is the 8-byte header)")]
    InvalidSize { size: u16 },

    /// The client-side object-id space is exhausted.
    #[error("client object ids exhausted; cannot propose a new id")]
    ObjectIdsExhausted,
}

// ── Encoding ──────────────────────────────────────────────────────────────────

/// Encodes a [`Message`] into its exact wire layout, ready to send.
///
/// The payload is zero-padded to a [`WORD_SIZE`] boundary and the size field
/// is computed as header plus padded payload.  Callers never supply a size.
///
/// # Errors
///
/// Returns [`WireError::MessageTooLarge`] if the total encoded length would
/// exceed [`MAX_MESSAGE_SIZE`]; the size field is never allowed to wrap.
///
/// # Examples
///
/// ```rust
/// use waylink_core::{decode_header, encode_message, Message};
///
/// let msg = Message::new(1, 1, vec![0x02, 0x00, 0x00, 0x00]);
/// let bytes = encode_message(&msg).unwrap();
/// let header = decode_header(&bytes).unwrap();
/// assert_eq!(header.object_id, 1);
/// assert_eq!(header.size as usize, bytes.len());
/// ```
pub fn encode_message(msg: &Message) -> Result<Vec<u8>, WireError> {
    let padded_len = pad_to_word(msg.payload.len());
    let total = HEADER_SIZE + padded_len;
    if total > MAX_MESSAGE_SIZE {
        return Err(WireError::MessageTooLarge { size: total });
    }

    let mut buf = Vec::with_capacity(total);
    buf.extend_from_slice(&msg.object_id.to_le_bytes());

    // Opcode in the low 16 bits, total size in the high 16 bits.
    let word = ((total as u32) << 16) | u32::from(msg.opcode);
    buf.extend_from_slice(&word.to_le_bytes());

    buf.extend_from_slice(&msg.payload);
    // Zero-pad the payload to the 4-byte alignment rule.
    buf.resize(total, 0x00);
    Ok(buf)
}

// ── Decoding ──────────────────────────────────────────────────────────────────

/// Decodes the header of the message at the beginning of `bytes`.
///
/// The full message must be present: the declared size is checked against the
/// bytes actually available, so a short read surfaces as an error instead of
/// a parsed-but-wrong message.
///
/// # Errors
///
/// - [`WireError::Truncated`] if fewer than [`HEADER_SIZE`] bytes are
///   available, or if the buffer ends before the declared size.
/// - [`WireError::InvalidSize`] if the header declares a size smaller than
///   the header itself.
pub fn decode_header(bytes: &[u8]) -> Result<MessageHeader, WireError> {
    if bytes.len() < HEADER_SIZE {
        return Err(WireError::Truncated {
            needed: HEADER_SIZE,
            available: bytes.len(),
        });
    }

    let object_id = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let word = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let opcode = (word & 0xFFFF) as u16;
    let size = (word >> 16) as u16;

    if (size as usize) < HEADER_SIZE {
        return Err(WireError::InvalidSize { size });
    }
    if bytes.len() < size as usize {
        return Err(WireError::Truncated {
            needed: size as usize,
            available: bytes.len(),
        });
    }

    Ok(MessageHeader {
        object_id,
        opcode,
        size,
    })
}

/// Decodes one complete message from the beginning of `bytes`.
///
/// Returns the header, a borrowed slice of the padded payload, and the total
/// number of bytes consumed, so a caller can walk a buffer holding several
/// batched events by advancing its cursor.
///
/// # Errors
///
/// Same conditions as [`decode_header`].
pub fn decode_message(bytes: &[u8]) -> Result<(MessageHeader, &[u8], usize), WireError> {
    let header = decode_header(bytes)?;
    let consumed = header.size as usize;
    let payload = &bytes[HEADER_SIZE..consumed];
    Ok((header, payload, consumed))
}

/// Rounds `len` up to the next [`WORD_SIZE`] boundary.
fn pad_to_word(len: usize) -> usize {
    len.div_ceil(WORD_SIZE) * WORD_SIZE
}

// ── Tests ─────────────────────────────────────────────────────────────────────
