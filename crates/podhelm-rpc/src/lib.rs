//! # podhelm-rpc
//!
//! Varlink client adapter for the container daemon.
//!
//! Exposes the [`RpcClient`](client::RpcClient) seam the orchestrator is
//! written against and one concrete implementation,
//! [`VarlinkConnection`](varlink::VarlinkConnection), speaking
//! NUL-terminated JSON frames over a Unix domain socket.

pub mod client;
pub mod varlink;

pub use client::{RpcClient, RpcError};
pub use varlink::VarlinkConnection;
