//! Waylink CLI entry point.
//!
//! Connects to the compositor, issues `wl_display::get_registry`, and dumps
//! the raw reply bytes as hex.  The reply is the compositor's initial burst
//! of `wl_registry::global` events; decoding them is left to higher layers.
//!
//! Usage:
//! ```text
//! waylink-client [SOCKET_NAME]
//! ```
//! `SOCKET_NAME` is an explicit display name or absolute socket path; when
//! omitted, `WAYLAND_DISPLAY` and then `wayland-0` apply.
//!
//! The decision to terminate the process on failure lives here, at the
//! outermost caller; the library only ever returns typed errors.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use waylink_client::application::registry::request_registry;
use waylink_client::infrastructure::socket::SocketConfig;

fn main() -> anyhow::Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let name = std::env::args().nth(1);
    let config = SocketConfig::from_env(name.as_deref());

    let reply = request_registry(&config).context("get_registry round trip failed")?;
    info!("received {} reply bytes", reply.len());

    println!("{}", hex_dump(&reply));
    Ok(())
}

/// Formats bytes as offset-prefixed hex lines, 16 bytes per line.
fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (i, chunk) in bytes.chunks(16).enumerate() {
        out.push_str(&format!("{:08x} ", i * 16));
        for byte in chunk {
            out.push_str(&format!(" {byte:02x}"));
        }
        out.push('\n');
    }
    out
}
