//! # waylink-core
//!
//! Shared library for Waylink containing the Wayland wire-protocol message
//! types, the binary codec, and client-side object-id allocation.
//!
//! This crate is used by the client application and by anything that needs to
//! frame or parse Wayland messages.  It has zero dependencies on OS APIs or
//! sockets.
//!
//! # Architecture overview
//!
//! A Wayland client talks to the compositor over a connected Unix-domain
//! stream socket.  Every request and event on that socket is a *wire
//! message*: an 8-byte header naming the target protocol object and the
//! operation, followed by an opcode-specific argument payload padded to a
//! 4-byte boundary.
//!
//! This crate defines:
//!
//! - **`protocol::wire`** – The wire-format constants and the typed header
//!   and message structs.  The display object (id 1) and its `get_registry`
//!   request are the well-known starting point of every session.
//!
//! - **`protocol::codec`** – Encoding messages into their exact byte layout
//!   and decoding received buffers back into headers and payload slices.
//!   A single misplaced bit here produces a compositor that silently
//!   misbehaves, so the layout is locked down by byte-exact tests.
//!
//! - **`protocol::object_id`** – The client-side numbering authority for new
//!   object ids.  The client proposes ids for objects the compositor is about
//!   to create; ids must never be reused while live.

pub mod protocol;

// Re-export the most-used items at the crate root so callers can write
// `waylink_core::encode_message` instead of the full module path.
pub use protocol::codec::{decode_header, decode_message, encode_message, WireError};
pub use protocol::object_id::ObjectIdAllocator;
pub use protocol::wire::{
    Message, MessageHeader, DISPLAY_OBJECT_ID, GET_REGISTRY_OPCODE, HEADER_SIZE, MAX_MESSAGE_SIZE,
};
