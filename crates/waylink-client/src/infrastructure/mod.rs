//! Infrastructure layer: OS-facing adapters.
//!
//! - **`socket`** – Resolves the compositor's socket path from the
//!   environment and opens the connected stream.
//! - **`transport`** – Owns the connected stream and performs the blocking
//!   send/receive round trip with a bounded reply buffer.

pub mod socket;
pub mod transport;
