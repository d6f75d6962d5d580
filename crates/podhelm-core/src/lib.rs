//! # podhelm-core
//!
//! The lifecycle action orchestrator.
//!
//! Turns a user intent ("delete this container") into RPC calls against the
//! daemon, normalizes the daemon's structured success/error replies, and
//! drives the delete confirmation/escalation state machine:
//! - [`dispatch`]: maps lifecycle actions to daemon methods and normalizes
//!   replies into a uniform [`ActionOutcome`](dispatch::ActionOutcome).
//! - [`delete_flow`]: the confirm/escalate/retry machine for delete paths.
//! - [`listing`]: filters containers and pairs them with their latest
//!   statistics snapshot.

pub mod delete_flow;
pub mod dispatch;
pub mod listing;

pub use delete_flow::{DeleteFlow, DeleteFlowState};
pub use dispatch::{
    ActionOutcome, ActionRequest, CommitOptions, Dispatcher, LifecycleAction,
    REASON_CONTAINER_RUNNING,
};
pub use listing::{EmptyReason, ListingRow, select};
