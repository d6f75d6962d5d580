//! Varlink connection over a Unix domain socket.
//!
//! The varlink wire format is one JSON object per message, terminated by a
//! NUL byte. A request carries `method` and optional `parameters`; a reply
//! carries either `parameters` (success) or `error` plus an optional
//! `parameters.reason` (failure).

use serde_json::{Map, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tokio::sync::Mutex;

use crate::client::{RpcClient, RpcError};

/// A persistent varlink channel to the container daemon.
///
/// Calls are serialized: one request/reply exchange is in flight per
/// connection at a time.
#[derive(Debug)]
pub struct VarlinkConnection {
    inner: Mutex<BufReader<UnixStream>>,
}

impl VarlinkConnection {
    /// Connects to the daemon socket at the given filesystem path.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket cannot be connected.
    pub async fn connect(socket_path: &str) -> Result<Self, RpcError> {
        let stream = UnixStream::connect(socket_path).await?;
        tracing::debug!(socket = socket_path, "connected to daemon");
        Ok(Self::from_stream(stream))
    }

    /// Wraps an already-connected stream. Used by tests with socket pairs.
    #[must_use]
    pub fn from_stream(stream: UnixStream) -> Self {
        Self {
            inner: Mutex::new(BufReader::new(stream)),
        }
    }
}

impl RpcClient for VarlinkConnection {
    async fn call(&self, method: &str, parameters: Value) -> Result<Value, RpcError> {
        let frame = encode_request(method, parameters)?;
        let mut guard = self.inner.lock().await;
        guard.get_mut().write_all(&frame).await?;

        let mut raw = Vec::new();
        let n = guard.read_until(0, &mut raw).await?;
        drop(guard);
        if n == 0 {
            return Err(RpcError::Protocol {
                detail: "connection closed by daemon".to_string(),
            });
        }
        if raw.last() == Some(&0) {
            let _ = raw.pop();
        }
        decode_reply(method, &raw)
    }
}

/// Builds a NUL-terminated varlink request frame.
///
/// An empty `parameters` object is omitted from the frame entirely.
fn encode_request(method: &str, parameters: Value) -> Result<Vec<u8>, RpcError> {
    let mut frame = Map::new();
    let _ = frame.insert("method".to_string(), Value::String(method.to_string()));
    match parameters {
        Value::Object(map) if map.is_empty() => {}
        Value::Null => {}
        other => {
            let _ = frame.insert("parameters".to_string(), other);
        }
    }
    let mut bytes = serde_json::to_vec(&Value::Object(frame)).map_err(|e| RpcError::Protocol {
        detail: e.to_string(),
    })?;
    bytes.push(0);
    Ok(bytes)
}

/// Decodes a reply frame into its `parameters` object or a call error.
fn decode_reply(method: &str, raw: &[u8]) -> Result<Value, RpcError> {
    let reply: Value = serde_json::from_slice(raw).map_err(|e| RpcError::Protocol {
        detail: e.to_string(),
    })?;
    if let Some(error) = reply.get("error").and_then(Value::as_str) {
        let reason = reply
            .pointer("/parameters/reason")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned);
        tracing::debug!(method, error, ?reason, "daemon returned error");
        return Err(RpcError::Call {
            method: method.to_string(),
            error: error.to_string(),
            reason,
        });
    }
    Ok(reply
        .get("parameters")
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new())))
}
