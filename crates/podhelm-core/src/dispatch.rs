//! Mapping of lifecycle actions onto daemon RPC methods.
//!
//! The dispatcher holds no state between calls; its only side effect is the
//! RPC itself. Every daemon or transport failure is normalized into an
//! [`ActionOutcome`] — nothing propagates past this boundary.

use podhelm_common::constants::{
    METHOD_COMMIT, METHOD_REMOVE_CONTAINER, METHOD_RESTART_CONTAINER, METHOD_START_CONTAINER,
    METHOD_STOP_CONTAINER,
};
use podhelm_common::types::{Container, ContainerId};
use podhelm_rpc::RpcClient;
use serde_json::{Value, json};

/// Fixed conflict reason produced by the client-side running guard.
pub const REASON_CONTAINER_RUNNING: &str = "container is running";

/// A lifecycle action the user can request on a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleAction {
    /// Start a created or stopped container.
    Start,
    /// Stop a running container.
    Stop,
    /// Restart a container.
    Restart,
    /// Remove a container without force.
    Delete,
    /// Remove a container with the force directive set.
    ForceDelete,
    /// Commit the container to a new image.
    Commit(CommitOptions),
}

/// Options for committing a container to an image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitOptions {
    /// Name (and optional tag) of the image to create.
    pub image_name: String,
    /// Author recorded in the image metadata.
    pub author: String,
    /// Commit message recorded in the image metadata.
    pub message: String,
    /// Whether to pause the container while committing.
    pub pause: bool,
    /// Image change directives (`CMD=...`, `ENV=...`, ...).
    pub changes: Vec<String>,
}

/// A user-requested lifecycle action on a specific container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    /// The action to perform.
    pub action: LifecycleAction,
    /// Container the action targets.
    pub target: ContainerId,
    /// On Stop/Restart: request an immediate signal (zero timeout)
    /// instead of the daemon-default graceful timeout.
    pub force: bool,
}

impl ActionRequest {
    /// Builds a request with `force` unset.
    #[must_use]
    pub fn new(action: LifecycleAction, target: ContainerId) -> Self {
        Self {
            action,
            target,
            force: false,
        }
    }

    /// Builds a forced variant of the given action.
    #[must_use]
    pub fn forced(action: LifecycleAction, target: ContainerId) -> Self {
        Self {
            action,
            target,
            force: true,
        }
    }
}

/// Uniform outcome of a dispatched action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The daemon accepted and performed the action.
    Success,
    /// The action is illegal in the container's current state and may be
    /// retried with escalation (force).
    Conflict {
        /// Daemon- or guard-supplied reason, surfaced verbatim.
        reason: String,
    },
    /// Any other daemon or transport error; recoverable by user retry.
    Failure {
        /// Optional daemon-supplied reason. Absence degrades to an
        /// undecorated failure message.
        reason: Option<String>,
    },
}

/// Maps lifecycle requests onto daemon methods and normalizes replies.
#[derive(Debug)]
pub struct Dispatcher<C> {
    client: C,
}

impl<C: RpcClient> Dispatcher<C> {
    /// Creates a dispatcher over the given RPC client.
    #[must_use]
    pub const fn new(client: C) -> Self {
        Self { client }
    }

    /// Performs the requested action and returns its normalized outcome.
    ///
    /// `container` is the locally-known record for `request.target`; its
    /// `names` field addresses the daemon and its `status` feeds the
    /// client-side delete guard. This never returns an error: conflicts and
    /// failures are values, not `Err`.
    pub async fn dispatch(&self, container: &Container, request: &ActionRequest) -> ActionOutcome {
        tracing::debug!(
            container = %container.names,
            action = ?request.action,
            force = request.force,
            "dispatching lifecycle action"
        );
        match &request.action {
            LifecycleAction::Start => {
                self.call(METHOD_START_CONTAINER, name_args(container)).await
            }
            LifecycleAction::Stop => {
                self.call(METHOD_STOP_CONTAINER, timed_args(container, request.force))
                    .await
            }
            LifecycleAction::Restart => {
                self.call(METHOD_RESTART_CONTAINER, timed_args(container, request.force))
                    .await
            }
            LifecycleAction::Delete => {
                // The guard keeps the state machine deterministic under
                // status/race skew: a normal-delete RPC never reaches a
                // container we believe is running.
                if container.is_running() {
                    return ActionOutcome::Conflict {
                        reason: REASON_CONTAINER_RUNNING.to_string(),
                    };
                }
                self.call(METHOD_REMOVE_CONTAINER, name_args(container)).await
            }
            LifecycleAction::ForceDelete => {
                let mut args = name_args(container);
                args["force"] = Value::Bool(true);
                self.call(METHOD_REMOVE_CONTAINER, args).await
            }
            LifecycleAction::Commit(options) => {
                self.call(METHOD_COMMIT, commit_args(container, options)).await
            }
        }
    }

    async fn call(&self, method: &str, args: Value) -> ActionOutcome {
        match self.client.call(method, args).await {
            Ok(_) => ActionOutcome::Success,
            Err(err) => {
                tracing::warn!(method, error = %err, "daemon call failed");
                ActionOutcome::Failure {
                    reason: err.reason().map(ToOwned::to_owned),
                }
            }
        }
    }
}

fn name_args(container: &Container) -> Value {
    json!({ "name": container.names })
}

/// Stop/restart arguments: `force` maps to a zero timeout (immediate
/// signal); otherwise the timeout key is omitted so the daemon applies its
/// default graceful timeout.
fn timed_args(container: &Container, force: bool) -> Value {
    let mut args = name_args(container);
    if force {
        args["timeout"] = Value::from(0);
    }
    args
}

fn commit_args(container: &Container, options: &CommitOptions) -> Value {
    json!({
        "name": container.names,
        "image_name": options.image_name,
        "author": options.author,
        "message": options.message,
        "pause": options.pause,
        "changes": options.changes,
    })
}
