//! End-to-end tests for the delete orchestration loop:
//! request → confirm → dispatch → observe outcome → apply.
//!
//! Exercises the dispatcher and the state machine together through a
//! scripted RPC client, the way the app task drives them.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::Mutex;

use podhelm_common::types::{Container, ContainerId};
use podhelm_core::{
    ActionOutcome, DeleteFlow, DeleteFlowState, Dispatcher, REASON_CONTAINER_RUNNING,
};
use podhelm_rpc::{RpcClient, RpcError};
use serde_json::{Value, json};

struct ScriptedClient {
    calls: Mutex<Vec<(String, Value)>>,
    replies: Mutex<VecDeque<Result<Value, RpcError>>>,
}

impl ScriptedClient {
    fn new(replies: Vec<Result<Value, RpcError>>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            replies: Mutex::new(replies.into()),
        }
    }

    fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

impl RpcClient for ScriptedClient {
    async fn call(&self, method: &str, parameters: Value) -> Result<Value, RpcError> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), parameters));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(json!({})))
    }
}

fn container(id: &str, status: &str) -> Container {
    Container {
        id: ContainerId::new(id),
        names: format!("{id}-name"),
        image: "docker.io/library/alpine:latest".into(),
        command: vec!["sleep".into(), "infinity".into()],
        status: status.into(),
        created_at: String::new(),
    }
}

fn daemon_refusal(reason: &str) -> RpcError {
    RpcError::Call {
        method: "io.podman.RemoveContainer".into(),
        error: "io.podman.ErrorOccurred".into(),
        reason: Some(reason.into()),
    }
}

/// Drives one confirm round: dispatch the confirmed request and apply the
/// outcome back, exactly as the app task does.
async fn confirm_round(
    flow: &mut DeleteFlow,
    dispatcher: &Dispatcher<&ScriptedClient>,
    target: &Container,
) {
    let request = flow.confirm().expect("confirmation pending");
    let outcome = dispatcher.dispatch(target, &request).await;
    flow.apply_outcome(&request.target, outcome);
}

#[tokio::test]
async fn stopped_container_deletes_in_one_confirmed_round() {
    let client = ScriptedClient::new(vec![]);
    let dispatcher = Dispatcher::new(&client);
    let mut flow = DeleteFlow::new();
    let target = container("c1", "exited");

    flow.request_delete(target.clone());
    assert!(matches!(
        flow.state(),
        DeleteFlowState::ConfirmNormalDelete { .. }
    ));

    confirm_round(&mut flow, &dispatcher, &target).await;
    assert_eq!(*flow.state(), DeleteFlowState::Idle);
    assert_eq!(
        client.calls(),
        vec![(
            "io.podman.RemoveContainer".to_string(),
            json!({ "name": "c1-name" })
        )]
    );
}

#[tokio::test]
async fn running_container_never_sees_a_normal_delete_rpc() {
    let client = ScriptedClient::new(vec![]);
    let dispatcher = Dispatcher::new(&client);
    let mut flow = DeleteFlow::new();
    let target = container("c1", "running");

    flow.request_delete(target.clone());
    assert_eq!(
        *flow.state(),
        DeleteFlowState::ConfirmForceDelete {
            container: target.clone(),
            reason: Some(REASON_CONTAINER_RUNNING.to_string()),
        }
    );

    // Confirming the escalation goes straight to a forced remove.
    confirm_round(&mut flow, &dispatcher, &target).await;
    assert_eq!(*flow.state(), DeleteFlowState::Idle);
    assert_eq!(
        client.calls(),
        vec![(
            "io.podman.RemoveContainer".to_string(),
            json!({ "name": "c1-name", "force": true })
        )]
    );
}

#[tokio::test]
async fn daemon_refusal_escalates_then_force_delete_succeeds() {
    // Status skew: we believe the container is stopped, the daemon knows
    // better and refuses the first remove.
    let client = ScriptedClient::new(vec![
        Err(daemon_refusal("container is running")),
        Ok(json!({})),
    ]);
    let dispatcher = Dispatcher::new(&client);
    let mut flow = DeleteFlow::new();
    let target = container("c1", "exited");

    flow.request_delete(target.clone());
    confirm_round(&mut flow, &dispatcher, &target).await;
    assert_eq!(
        *flow.state(),
        DeleteFlowState::ConfirmForceDelete {
            container: target.clone(),
            reason: Some("container is running".to_string()),
        }
    );

    confirm_round(&mut flow, &dispatcher, &target).await;
    assert_eq!(*flow.state(), DeleteFlowState::Idle);

    let calls = client.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].1.get("force").is_none());
    assert_eq!(calls[1].1["force"], true);
}

#[tokio::test]
async fn transient_force_delete_failures_allow_retry_until_success() {
    let client = ScriptedClient::new(vec![
        Err(daemon_refusal("daemon busy")),
        Err(daemon_refusal("daemon busy")),
        Ok(json!({})),
    ]);
    let dispatcher = Dispatcher::new(&client);
    let mut flow = DeleteFlow::new();
    let target = container("c1", "running");

    flow.request_delete(target.clone());
    for _ in 0..2 {
        confirm_round(&mut flow, &dispatcher, &target).await;
        assert_eq!(
            *flow.state(),
            DeleteFlowState::ConfirmForceDelete {
                container: target.clone(),
                reason: Some("daemon busy".to_string()),
            }
        );
    }

    confirm_round(&mut flow, &dispatcher, &target).await;
    assert_eq!(*flow.state(), DeleteFlowState::Idle);
    assert_eq!(client.calls().len(), 3);
}

#[tokio::test]
async fn outcome_from_an_abandoned_flow_is_ignored() {
    let client = ScriptedClient::new(vec![Ok(json!({}))]);
    let dispatcher = Dispatcher::new(&client);
    let mut flow = DeleteFlow::new();

    let abandoned = container("c1", "exited");
    flow.request_delete(abandoned.clone());
    let in_flight = flow.confirm().expect("confirmation pending");

    // The user re-targets the flow before the first call resolves.
    let current = container("c2", "exited");
    flow.request_delete(current.clone());

    let late_outcome = dispatcher.dispatch(&abandoned, &in_flight).await;
    flow.apply_outcome(&in_flight.target, late_outcome);

    // c2's confirmation must be untouched by c1's completion.
    assert_eq!(
        *flow.state(),
        DeleteFlowState::ConfirmNormalDelete {
            container: current
        }
    );
}

#[tokio::test]
async fn cancelling_the_escalation_prompt_issues_no_rpc() {
    let client = ScriptedClient::new(vec![]);
    let mut flow = DeleteFlow::new();
    flow.request_delete(container("c1", "running"));
    flow.cancel();
    assert_eq!(*flow.state(), DeleteFlowState::Idle);
    assert!(flow.confirm().is_none());
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn failure_outcome_is_recorded_for_the_banner() {
    let client = ScriptedClient::new(vec![Err(daemon_refusal("no such container"))]);
    let dispatcher = Dispatcher::new(&client);
    let mut flow = DeleteFlow::new();
    let target = container("c1", "exited");

    flow.request_delete(target.clone());
    confirm_round(&mut flow, &dispatcher, &target).await;
    assert_eq!(
        flow.last_outcome(),
        Some(&ActionOutcome::Failure {
            reason: Some("no such container".to_string())
        })
    );
}
