//! The delete confirmation/escalation state machine.
//!
//! One instance exists per listing view. It owns the single piece of
//! mutable state that survives across asynchronous round-trips: which
//! container (if any) is pending deletion and how far the escalation has
//! progressed. The machine never performs RPC itself — [`DeleteFlow::confirm`]
//! hands back the request to dispatch, and the caller later feeds the
//! observed outcome through [`DeleteFlow::apply_outcome`], which validates
//! that the outcome still applies to the pending target before mutating
//! anything. That ignore-if-stale rule substitutes for call cancellation.

use podhelm_common::types::{Container, ContainerId};

use crate::dispatch::{ActionOutcome, ActionRequest, LifecycleAction, REASON_CONTAINER_RUNNING};

/// Where the delete flow currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteFlowState {
    /// No delete pending. Initial and resting state.
    Idle,
    /// Waiting for the user to confirm a normal (non-forced) delete.
    ConfirmNormalDelete {
        /// Container pending deletion.
        container: Container,
    },
    /// Waiting for the user to confirm a force delete, after a conflict or
    /// failure on the normal path.
    ConfirmForceDelete {
        /// Container pending deletion.
        container: Container,
        /// Last seen error detail, shown in the escalation prompt.
        /// `None` renders as an undecorated prompt.
        reason: Option<String>,
    },
}

/// Drives the multi-step delete/force-delete confirmation sequence.
#[derive(Debug, Default)]
pub struct DeleteFlow {
    state: DeleteFlowState,
    last_outcome: Option<ActionOutcome>,
}

impl Default for DeleteFlowState {
    fn default() -> Self {
        Self::Idle
    }
}

impl DeleteFlow {
    /// Creates a new flow in the `Idle` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state, for rendering the confirmation prompts.
    #[must_use]
    pub const fn state(&self) -> &DeleteFlowState {
        &self.state
    }

    /// The container a confirmation is currently pending for, if any.
    #[must_use]
    pub const fn pending_container(&self) -> Option<&Container> {
        match &self.state {
            DeleteFlowState::Idle => None,
            DeleteFlowState::ConfirmNormalDelete { container }
            | DeleteFlowState::ConfirmForceDelete { container, .. } => Some(container),
        }
    }

    /// Outcome applied by the most recent transition, for banner display.
    #[must_use]
    pub const fn last_outcome(&self) -> Option<&ActionOutcome> {
        self.last_outcome.as_ref()
    }

    /// Begins a delete flow for `container`.
    ///
    /// A container the daemon reports as running goes straight to the
    /// force-delete prompt, matching the dispatcher's client-side guard; a
    /// normal-delete RPC must never reach a running container. Initiating a
    /// new request while another container's confirmation is open replaces
    /// the pending state (last-writer-wins, single-modal semantics); no RPC
    /// was made for it, so there is nothing to roll back.
    pub fn request_delete(&mut self, container: Container) {
        self.last_outcome = None;
        self.state = if container.is_running() {
            DeleteFlowState::ConfirmForceDelete {
                container,
                reason: Some(REASON_CONTAINER_RUNNING.to_string()),
            }
        } else {
            DeleteFlowState::ConfirmNormalDelete { container }
        };
    }

    /// Cancels whatever confirmation is open and clears the last seen
    /// error detail. No RPC side effect.
    pub fn cancel(&mut self) {
        self.state = DeleteFlowState::Idle;
        self.last_outcome = None;
    }

    /// Confirms the open prompt and returns the request to dispatch, or
    /// `None` when no confirmation is pending.
    ///
    /// The caller dispatches the request and later feeds the observed
    /// outcome back through [`apply_outcome`](Self::apply_outcome).
    #[must_use]
    pub fn confirm(&self) -> Option<ActionRequest> {
        match &self.state {
            DeleteFlowState::Idle => None,
            DeleteFlowState::ConfirmNormalDelete { container } => Some(ActionRequest::new(
                LifecycleAction::Delete,
                container.id.clone(),
            )),
            DeleteFlowState::ConfirmForceDelete { container, .. } => Some(ActionRequest::forced(
                LifecycleAction::ForceDelete,
                container.id.clone(),
            )),
        }
    }

    /// Applies a dispatch outcome for `target`.
    ///
    /// Outcomes for a container that is no longer the pending target (the
    /// flow was cancelled or re-targeted while the call was in flight) are
    /// dropped without mutating state.
    pub fn apply_outcome(&mut self, target: &ContainerId, outcome: ActionOutcome) {
        let Some(pending) = self.pending_container() else {
            tracing::debug!(target = %target, "dropping outcome: no delete pending");
            return;
        };
        if pending.id != *target {
            tracing::debug!(
                target = %target,
                pending = %pending.id,
                "dropping stale outcome for abandoned delete"
            );
            return;
        }

        self.state = match (std::mem::take(&mut self.state), &outcome) {
            (_, ActionOutcome::Success) => DeleteFlowState::Idle,
            (
                DeleteFlowState::ConfirmNormalDelete { container }
                | DeleteFlowState::ConfirmForceDelete { container, .. },
                ActionOutcome::Conflict { reason },
            ) => DeleteFlowState::ConfirmForceDelete {
                container,
                reason: Some(reason.clone()),
            },
            (
                DeleteFlowState::ConfirmNormalDelete { container }
                | DeleteFlowState::ConfirmForceDelete { container, .. },
                ActionOutcome::Failure { reason },
            ) => DeleteFlowState::ConfirmForceDelete {
                container,
                reason: reason.clone(),
            },
            // Unreachable: pending_container() returned Some above.
            (DeleteFlowState::Idle, _) => DeleteFlowState::Idle,
        };
        self.last_outcome = Some(outcome);
    }
}
