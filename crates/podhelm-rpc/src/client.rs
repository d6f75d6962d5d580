//! The RPC client seam and its error type.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

/// Errors produced by an [`RpcClient`].
#[derive(Debug, Error)]
pub enum RpcError {
    /// The socket failed at the I/O level.
    #[error("daemon socket error: {0}")]
    Io(#[from] std::io::Error),

    /// The daemon sent a frame we could not decode.
    #[error("malformed varlink frame: {detail}")]
    Protocol {
        /// What was wrong with the frame.
        detail: String,
    },

    /// The daemon replied with a structured varlink error.
    #[error("{method} failed: {error}")]
    Call {
        /// Method that was being called.
        method: String,
        /// Varlink error identifier.
        error: String,
        /// Optional human-readable reason from `parameters.reason`.
        reason: Option<String>,
    },
}

impl RpcError {
    /// Returns the daemon-supplied reason string, if the error carries one.
    ///
    /// The reason is opaque and surfaced to the user verbatim, never parsed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Call { reason, .. } => reason.as_deref(),
            Self::Io(_) | Self::Protocol { .. } => None,
        }
    }
}

/// A typed method call to the container daemon.
///
/// Implementors own transport details only; no business logic lives behind
/// this seam. The orchestrator is generic over it so tests can substitute a
/// scripted client.
pub trait RpcClient: Send + Sync {
    /// Calls `method` with the given parameters and returns the reply's
    /// `parameters` object.
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures or daemon error replies.
    fn call(
        &self,
        method: &str,
        parameters: Value,
    ) -> impl Future<Output = Result<Value, RpcError>> + Send;
}

impl<C: RpcClient> RpcClient for &C {
    fn call(
        &self,
        method: &str,
        parameters: Value,
    ) -> impl Future<Output = Result<Value, RpcError>> + Send {
        C::call(self, method, parameters)
    }
}

impl<C: RpcClient> RpcClient for Arc<C> {
    fn call(
        &self,
        method: &str,
        parameters: Value,
    ) -> impl Future<Output = Result<Value, RpcError>> + Send {
        C::call(self, method, parameters)
    }
}
