//! Protocol module containing the wire message types, the binary codec, and
//! client-side object-id allocation.

pub mod codec;
pub mod object_id;
pub mod wire;

pub use codec::{decode_header, decode_message, encode_message, WireError};
pub use object_id::ObjectIdAllocator;
pub use wire::*;
