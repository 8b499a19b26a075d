//! Application layer use cases.
//!
//! - **`registry`** – The round-trip use case: connect, send one encoded
//!   request, block for the raw reply, close.  Its `request_registry`
//!   entry point is the canonical first exchange of a Wayland session and
//!   the template for any single-request/single-reply call.

pub mod registry;
