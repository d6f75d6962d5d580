//! Snapshot polling of the container listing and statistics.
//!
//! Refreshes on a fixed interval: one `ListContainers` call, then a
//! `GetContainerStats` call per running container. A per-container stats
//! failure leaves that entry absent; a failed listing keeps the previous
//! snapshot.

use std::collections::HashMap;
use std::time::Duration;

use podhelm_common::constants::{METHOD_GET_CONTAINER_STATS, METHOD_LIST_CONTAINERS};
use podhelm_common::types::{Container, ContainerId, ContainerStats};
use podhelm_rpc::{RpcClient, RpcError};
use serde_json::{Value, json};
use tokio::sync::mpsc;

/// One refresh of the container/statistics view.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Containers in the order the daemon returned them.
    pub containers: Vec<Container>,
    /// Latest statistics, keyed by container id. Entries may be absent.
    pub stats: HashMap<ContainerId, ContainerStats>,
}

/// Runs the refresh loop until the receiving side goes away.
pub async fn run<C: RpcClient>(client: C, interval: Duration, tx: mpsc::Sender<Snapshot>) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        let _ = ticker.tick().await;
        match fetch_snapshot(&client).await {
            Ok(snapshot) => {
                if tx.send(snapshot).await.is_err() {
                    break;
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "listing refresh failed, keeping previous snapshot");
            }
        }
    }
}

/// Fetches one snapshot: the listing plus stats for running containers.
async fn fetch_snapshot<C: RpcClient>(client: &C) -> Result<Snapshot, RpcError> {
    let reply = client.call(METHOD_LIST_CONTAINERS, json!({})).await?;
    let containers: Vec<Container> = serde_json::from_value(
        reply
            .get("containers")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new())),
    )
    .map_err(|e| RpcError::Protocol {
        detail: format!("bad ListContainers reply: {e}"),
    })?;

    let mut stats = HashMap::new();
    for container in containers.iter().filter(|c| c.is_running()) {
        match client
            .call(METHOD_GET_CONTAINER_STATS, json!({ "name": container.names }))
            .await
        {
            Ok(reply) => {
                if let Some(raw) = reply.get("container") {
                    match serde_json::from_value::<ContainerStats>(raw.clone()) {
                        Ok(parsed) => {
                            let _ = stats.insert(container.id.clone(), parsed);
                        }
                        Err(err) => tracing::debug!(
                            container = %container.names,
                            error = %err,
                            "unparseable stats entry"
                        ),
                    }
                }
            }
            // Stats lag the listing; absence is not a poll failure.
            Err(err) => tracing::debug!(
                container = %container.names,
                error = %err,
                "stats unavailable"
            ),
        }
    }
    Ok(Snapshot { containers, stats })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;

    /// Mock daemon answering by method name.
    struct MockDaemon {
        stats_fail_for: Option<String>,
    }

    impl RpcClient for MockDaemon {
        async fn call(&self, method: &str, parameters: Value) -> Result<Value, RpcError> {
            match method {
                METHOD_LIST_CONTAINERS => Ok(json!({
                    "containers": [
                        { "id": "a", "names": "alpha", "image": "img1",
                          "command": ["sh"], "status": "running" },
                        { "id": "b", "names": "beta", "image": "img2",
                          "command": [], "status": "exited" },
                        { "id": "c", "names": "gamma", "image": "img3",
                          "command": [], "status": "running" },
                    ]
                })),
                METHOD_GET_CONTAINER_STATS => {
                    let name = parameters["name"].as_str().unwrap_or_default();
                    if self.stats_fail_for.as_deref() == Some(name) {
                        return Err(RpcError::Call {
                            method: method.to_string(),
                            error: "io.podman.NoContainerRunning".to_string(),
                            reason: None,
                        });
                    }
                    Ok(json!({
                        "container": { "cpu": 0.5, "mem_usage": 1024, "mem_limit": 4096 }
                    }))
                }
                other => Err(RpcError::Protocol {
                    detail: format!("unexpected method {other}"),
                }),
            }
        }
    }

    #[tokio::test]
    async fn snapshot_pairs_stats_for_running_containers_only() {
        let daemon = MockDaemon {
            stats_fail_for: None,
        };
        let snapshot = fetch_snapshot(&daemon).await.expect("snapshot");
        assert_eq!(snapshot.containers.len(), 3);
        assert!(snapshot.stats.contains_key(&ContainerId::new("a")));
        assert!(!snapshot.stats.contains_key(&ContainerId::new("b")));
        assert!(snapshot.stats.contains_key(&ContainerId::new("c")));
    }

    #[tokio::test]
    async fn per_container_stats_failure_leaves_that_entry_absent() {
        let daemon = MockDaemon {
            stats_fail_for: Some("alpha".to_string()),
        };
        let snapshot = fetch_snapshot(&daemon).await.expect("snapshot");
        assert!(!snapshot.stats.contains_key(&ContainerId::new("a")));
        assert!(snapshot.stats.contains_key(&ContainerId::new("c")));
    }

    #[tokio::test]
    async fn listing_failure_is_skipped_and_the_loop_keeps_refreshing() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        /// Fails the first listing, then serves a one-container listing.
        struct FlakyDaemon {
            listings: AtomicUsize,
        }

        impl RpcClient for FlakyDaemon {
            async fn call(&self, method: &str, _parameters: Value) -> Result<Value, RpcError> {
                match method {
                    METHOD_LIST_CONTAINERS => {
                        if self.listings.fetch_add(1, Ordering::SeqCst) == 0 {
                            return Err(RpcError::Protocol {
                                detail: "connection closed by daemon".to_string(),
                            });
                        }
                        Ok(json!({
                            "containers": [
                                { "id": "a", "names": "alpha", "image": "img1",
                                  "command": [], "status": "exited" },
                            ]
                        }))
                    }
                    other => Err(RpcError::Protocol {
                        detail: format!("unexpected method {other}"),
                    }),
                }
            }
        }

        let daemon = Arc::new(FlakyDaemon {
            listings: AtomicUsize::new(0),
        });
        let (tx, mut rx) = mpsc::channel(1);
        let poller = tokio::spawn(run(
            Arc::clone(&daemon),
            Duration::from_millis(1),
            tx,
        ));

        // The failed first refresh emits nothing; the next one arrives.
        let snapshot = rx.recv().await.expect("a later refresh should arrive");
        assert_eq!(snapshot.containers.len(), 1);
        assert_eq!(snapshot.containers[0].names, "alpha");
        assert!(daemon.listings.load(Ordering::SeqCst) >= 2);

        // Dropping the receiver ends the loop.
        drop(rx);
        poller.await.expect("poller should stop with the receiver gone");
    }

    #[tokio::test]
    async fn listing_order_is_preserved() {
        let daemon = MockDaemon {
            stats_fail_for: None,
        };
        let snapshot = fetch_snapshot(&daemon).await.expect("snapshot");
        let names: Vec<_> = snapshot
            .containers
            .iter()
            .map(|c| c.names.as_str())
            .collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
    }
}
