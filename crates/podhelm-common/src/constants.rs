//! System-wide constants and daemon endpoint defaults.

/// Default varlink address of the container daemon.
pub const DAEMON_ADDRESS: &str = "unix:/run/podman/io.podman";

/// Method: list all containers known to the daemon.
pub const METHOD_LIST_CONTAINERS: &str = "io.podman.ListContainers";

/// Method: fetch a resource-usage snapshot for one container.
pub const METHOD_GET_CONTAINER_STATS: &str = "io.podman.GetContainerStats";

/// Method: start a created or stopped container.
pub const METHOD_START_CONTAINER: &str = "io.podman.StartContainer";

/// Method: stop a running container (optional timeout).
pub const METHOD_STOP_CONTAINER: &str = "io.podman.StopContainer";

/// Method: restart a container (optional timeout).
pub const METHOD_RESTART_CONTAINER: &str = "io.podman.RestartContainer";

/// Method: remove a container (optional force).
pub const METHOD_REMOVE_CONTAINER: &str = "io.podman.RemoveContainer";

/// Method: commit a container to a new image.
pub const METHOD_COMMIT: &str = "io.podman.Commit";

/// Default interval between listing/statistics refreshes, in milliseconds.
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 1000;

/// Binary name for the console.
pub const BIN_NAME: &str = "podhelm";
