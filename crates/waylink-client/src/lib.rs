//! waylink-client library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/` and
//! the binary entry point in `main.rs` share the same module tree.
//!
//! # What does waylink-client do?
//!
//! A Wayland client finds the compositor's listening Unix-domain socket,
//! connects to it, and exchanges binary wire messages with it.  This crate
//! is the transport half of that conversation:
//!
//! 1. Resolve the socket path from an explicit name, `WAYLAND_DISPLAY`, or
//!    the default `wayland-0`, rooted at `XDG_RUNTIME_DIR`.
//! 2. Connect a blocking stream socket to it.
//! 3. Encode a request with `waylink-core`, send it, and block for the raw
//!    reply bytes.
//!
//! Parsing the reply's contents (registry globals, events) belongs to a
//! higher layer that consumes the raw bytes this crate hands back.
//!
//! **Dependency rule**: `application` may depend on `waylink_core`;
//! `infrastructure` may depend on both; neither reaches into the other's
//! socket or buffer internals.

/// Application layer: the round-trip use case and its error type.
pub mod application;

/// Infrastructure layer: socket discovery/connection and the blocking
/// transport.
pub mod infrastructure;
