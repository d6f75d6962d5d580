//! Global configuration model for the podhelm console.

use serde::{Deserialize, Serialize};

/// Root configuration for the podhelm console.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodhelmConfig {
    /// Varlink address of the container daemon.
    pub daemon_address: String,
    /// Interval between listing/statistics refreshes, in milliseconds.
    pub refresh_interval_ms: u64,
    /// Start with the running-only filter enabled.
    pub only_show_running: bool,
}

impl Default for PodhelmConfig {
    fn default() -> Self {
        Self {
            daemon_address: crate::constants::DAEMON_ADDRESS.to_string(),
            refresh_interval_ms: crate::constants::DEFAULT_REFRESH_INTERVAL_MS,
            only_show_running: false,
        }
    }
}

impl PodhelmConfig {
    /// Returns the filesystem path of the daemon socket.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is not a `unix:` URI.
    pub fn socket_path(&self) -> crate::error::Result<&str> {
        self.daemon_address.strip_prefix("unix:").ok_or_else(|| {
            crate::error::PodhelmError::Config {
                message: format!("unsupported daemon address: {}", self.daemon_address),
            }
        })
    }
}
