//! Network error type.

use thiserror::Error;

use rd_core::NodeId;

/// Errors produced by `rd-network`.
///
/// Everything except `Parse` and `Io` is a local input-validation failure
/// the caller can recover from; `NoPath` is an ordinary outcome on a
/// disconnected network.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("node {0} already exists")]
    DuplicateNode(NodeId),

    #[error("node {id} is outside the id limit {limit}")]
    NodeIdTooLarge { id: NodeId, limit: u32 },

    #[error("node {0} not found in network")]
    UnknownNode(NodeId),

    #[error("road from {0} to itself is not allowed")]
    SelfLoop(NodeId),

    #[error("road {from} - {to} has non-positive weight {weight}")]
    NonPositiveWeight { from: NodeId, to: NodeId, weight: i64 },

    #[error("road {from} - {to} already exists")]
    DuplicateEdge { from: NodeId, to: NodeId },

    #[error("zone {zone} for node {node} is negative")]
    NegativeZone { node: NodeId, zone: i32 },

    #[error("no path from {from} to {to}")]
    NoPath { from: NodeId, to: NodeId },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
