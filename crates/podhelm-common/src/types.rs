//! Domain primitive types used across the podhelm workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status string the daemon reports for a running container.
///
/// This value gates which lifecycle actions are offered and which delete
/// path is taken.
pub const STATUS_RUNNING: &str = "running";

/// Unique identifier for a container instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(String);

impl ContainerId {
    /// Creates a new container ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A container record as reported by the daemon's `ListContainers` reply.
///
/// Field names follow the daemon's lowercase varlink convention so the
/// record deserializes straight off the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    /// Unique identifier assigned by the daemon.
    pub id: ContainerId,
    /// Display name; also the RPC-addressable name for lifecycle calls.
    pub names: String,
    /// Image reference the container was created from.
    pub image: String,
    /// Command argument vector (displayed joined and quoted).
    #[serde(default)]
    pub command: Vec<String>,
    /// Free-form runtime state string. `"running"` is load-bearing.
    pub status: String,
    /// Daemon-supplied creation timestamp, display-only.
    #[serde(rename = "createdat", default)]
    pub created_at: String,
}

impl Container {
    /// Whether the daemon currently reports this container as running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == STATUS_RUNNING
    }
}

/// Resource usage snapshot for a single container.
///
/// Keyed by container id in the stats map; absence of an entry for a
/// given id is valid (stats not yet collected).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerStats {
    /// Fractional CPU utilization in 0..1, rendered ×100.
    #[serde(default)]
    pub cpu: f64,
    /// Memory usage in bytes.
    #[serde(default)]
    pub mem_usage: u64,
    /// Memory limit in bytes.
    #[serde(default)]
    pub mem_limit: u64,
}
