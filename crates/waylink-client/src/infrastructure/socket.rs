//! Socket discovery and connection.
//!
//! The compositor listens on a Unix-domain socket at
//! `<XDG_RUNTIME_DIR>/<name>`, where `<name>` comes from (first match wins)
//! an explicit caller-supplied name, the `WAYLAND_DISPLAY` environment
//! variable, or the literal default `wayland-0`.  A name that is already an
//! absolute path is used verbatim.
//!
//! Resolution is a pure function over a [`SocketConfig`] snapshot: the
//! environment is read once per [`SocketConfig::from_env`] call and never
//! cached in module state, so a later call with a changed environment
//! observes the change and tests can inject arbitrary values.

use std::env;
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

/// Maximum socket path length: `sockaddr_un.sun_path` is 108 bytes on Linux,
/// including the trailing NUL.  A longer path would be truncated by the OS
/// and connect to the wrong socket or none, so it must fail loudly instead.
pub const SUN_PATH_MAX: usize = 108;

/// Socket name used when neither an explicit name nor `WAYLAND_DISPLAY` is
/// given.
pub const DEFAULT_DISPLAY_NAME: &str = "wayland-0";

/// Errors raised while resolving or connecting the compositor socket.
///
/// Each variant names the stage that failed (resolution vs. connect) so a
/// failed attempt is diagnosable from the error alone.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// `XDG_RUNTIME_DIR` is unset or not an absolute path.  A relative
    /// runtime dir is a fatal configuration error, never silently defaulted.
    #[error("XDG_RUNTIME_DIR is missing or not an absolute path (got {runtime_dir:?})")]
    BadRuntimeDir { runtime_dir: Option<String> },

    /// The resolved path does not fit in `sockaddr_un.sun_path`.
    #[error("socket path {path:?} needs {len} bytes; the platform limit is {max}")]
    PathTooLong {
        path: PathBuf,
        len: usize,
        max: usize,
    },

    /// Creating or connecting the socket failed at the OS level (socket
    /// missing, permission denied, ...).
    #[error("failed to connect to compositor socket {path:?}: {source}")]
    Connect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Applying the configured read timeout to the fresh connection failed.
    #[error("failed to set read timeout on {path:?}: {source}")]
    SetTimeout {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Connection configuration: an explicit name override plus a snapshot of
/// the relevant environment values.
#[derive(Debug, Clone, Default)]
pub struct SocketConfig {
    /// Explicit socket name or absolute path; takes precedence over the
    /// environment.
    pub name: Option<String>,
    /// Value of `WAYLAND_DISPLAY` at snapshot time.
    pub wayland_display: Option<String>,
    /// Value of `XDG_RUNTIME_DIR` at snapshot time.
    pub runtime_dir: Option<String>,
    /// Optional socket read timeout.  The protocol core never bounds waits
    /// itself; a hung compositor blocks the caller unless this is set.
    pub read_timeout: Option<Duration>,
}

impl SocketConfig {
    /// Snapshots `WAYLAND_DISPLAY` and `XDG_RUNTIME_DIR` at call time,
    /// with an optional explicit name taking precedence over both.
    pub fn from_env(name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_owned),
            wayland_display: env::var("WAYLAND_DISPLAY").ok(),
            runtime_dir: env::var("XDG_RUNTIME_DIR").ok(),
            read_timeout: None,
        }
    }

    /// Resolves the filesystem path of the compositor socket.
    ///
    /// Pure: no socket is created and nothing is read from the process
    /// environment here.
    ///
    /// # Errors
    ///
    /// - [`ConnectError::BadRuntimeDir`] if a relative name needs
    ///   `XDG_RUNTIME_DIR` and it is unset or not absolute.
    /// - [`ConnectError::PathTooLong`] if the path would not fit in
    ///   `sockaddr_un.sun_path`.
    pub fn resolve_path(&self) -> Result<PathBuf, ConnectError> {
        let name = self
            .name
            .as_deref()
            .or(self.wayland_display.as_deref())
            .unwrap_or(DEFAULT_DISPLAY_NAME);

        let path = if name.starts_with('/') {
            PathBuf::from(name)
        } else {
            let runtime_dir = match self.runtime_dir.as_deref() {
                Some(dir) if dir.starts_with('/') => dir,
                other => {
                    return Err(ConnectError::BadRuntimeDir {
                        runtime_dir: other.map(str::to_owned),
                    })
                }
            };
            Path::new(runtime_dir).join(name)
        };

        // +1 for the NUL terminator the OS stores in sun_path.
        let len = path.as_os_str().len() + 1;
        if len > SUN_PATH_MAX {
            return Err(ConnectError::PathTooLong {
                path,
                len,
                max: SUN_PATH_MAX,
            });
        }

        Ok(path)
    }

    /// Resolves the socket path and connects a blocking stream to it.
    ///
    /// # Errors
    ///
    /// Everything [`resolve_path`](Self::resolve_path) raises, plus
    /// [`ConnectError::Connect`] on OS-level socket failure and
    /// [`ConnectError::SetTimeout`] if a configured read timeout cannot be
    /// applied.  Resolution errors never leave a socket behind.
    pub fn connect(&self) -> Result<UnixStream, ConnectError> {
        let path = self.resolve_path()?;
        debug!("connecting to compositor socket at {}", path.display());

        let stream = UnixStream::connect(&path).map_err(|source| ConnectError::Connect {
            path: path.clone(),
            source,
        })?;

        if let Some(timeout) = self.read_timeout {
            stream
                .set_read_timeout(Some(timeout))
                .map_err(|source| ConnectError::SetTimeout {
                    path: path.clone(),
                    source,
                })?;
        }

        info!("connected to compositor at {}", path.display());
        Ok(stream)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// A config with every environment value injected, so resolution tests
    /// never touch the real process environment.
    fn config(
        name: Option<&str>,
        wayland_display: Option<&str>,
        runtime_dir: Option<&str>,
    ) -> SocketConfig {
        SocketConfig {
            name: name.map(str::to_owned),
            wayland_display: wayland_display.map(str::to_owned),
            runtime_dir: runtime_dir.map(str::to_owned),
            read_timeout: None,
        }
    }

    #[test]
    fn test_explicit_name_takes_precedence_over_wayland_display() {
        let cfg = config(Some("foo"), Some("bar"), Some("/run/user/1000"));

        let path = cfg.resolve_path().expect("resolution failed");

        assert_eq!(path, PathBuf::from("/run/user/1000/foo"));
    }

    #[test]
    fn test_wayland_display_is_used_when_no_explicit_name() {
        let cfg = config(None, Some("wayland-7"), Some("/run/user/1000"));

        let path = cfg.resolve_path().expect("resolution failed");

        assert_eq!(path, PathBuf::from("/run/user/1000/wayland-7"));
    }

    #[test]
    fn test_resolution_defaults_to_wayland_0() {
        let cfg = config(None, None, Some("/run/user/1000"));

        let path = cfg.resolve_path().expect("resolution failed");

        assert_eq!(path, PathBuf::from("/run/user/1000/wayland-0"));
    }

    #[test]
    fn test_absolute_name_is_used_verbatim() {
        // XDG_RUNTIME_DIR must not matter, even when relative.
        let cfg = config(Some("/tmp/mysock"), Some("bar"), Some("not-absolute"));

        let path = cfg.resolve_path().expect("resolution failed");

        assert_eq!(path, PathBuf::from("/tmp/mysock"));
    }

    #[test]
    fn test_missing_runtime_dir_is_a_config_error() {
        let cfg = config(Some("wayland-0"), None, None);

        let result = cfg.resolve_path();

        assert!(matches!(
            result,
            Err(ConnectError::BadRuntimeDir { runtime_dir: None })
        ));
    }

    #[test]
    fn test_relative_runtime_dir_is_a_config_error() {
        let cfg = config(None, None, Some("run/user/1000"));

        let result = cfg.resolve_path();

        assert!(matches!(result, Err(ConnectError::BadRuntimeDir { .. })));
    }

    #[test]
    fn test_path_exceeding_sun_path_fails_loudly() {
        let long_name = "w".repeat(200);
        let cfg = config(Some(&long_name), None, Some("/run/user/1000"));

        let result = cfg.resolve_path();

        assert!(matches!(
            result,
            Err(ConnectError::PathTooLong { max: SUN_PATH_MAX, .. })
        ));
    }

    #[test]
    fn test_longest_fitting_path_is_accepted() {
        // "/run/" (5) + 102-byte name + NUL = 108 exactly.
        let name = "s".repeat(102);
        let cfg = config(Some(&name), None, Some("/run"));

        let path = cfg.resolve_path().expect("a path of exactly 108 bytes must fit");
        assert_eq!(path.as_os_str().len() + 1, SUN_PATH_MAX);
    }

    #[test]
    fn test_absolute_override_is_also_length_checked() {
        let long_path = format!("/{}", "x".repeat(200));
        let cfg = config(Some(&long_path), None, None);

        assert!(matches!(
            cfg.resolve_path(),
            Err(ConnectError::PathTooLong { .. })
        ));
    }

    #[test]
    fn test_connect_to_missing_socket_reports_the_path() {
        let cfg = config(Some("/tmp/waylink-definitely-missing.sock"), None, None);

        let result = cfg.connect();

        match result {
            Err(ConnectError::Connect { path, .. }) => {
                assert_eq!(path, PathBuf::from("/tmp/waylink-definitely-missing.sock"));
            }
            other => panic!("expected Connect error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_env_carries_the_explicit_name() {
        let cfg = SocketConfig::from_env(Some("custom-display"));
        assert_eq!(cfg.name.as_deref(), Some("custom-display"));
    }
}
