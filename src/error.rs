//! Error types for rejected canvas operations.
//!
//! None of these are fatal: the interaction layer logs them and carries on
//! with the next frame.

use crate::types::NodeId;
use thiserror::Error;

/// Reasons a node or connection operation was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    /// The node store already holds its maximum number of nodes
    #[error("node store is full ({capacity} nodes)")]
    NodeCapacity {
        /// Maximum number of nodes
        capacity: usize,
    },

    /// The connection store already holds its maximum number of connections
    #[error("connection store is full ({capacity} connections)")]
    ConnectionCapacity {
        /// Maximum number of connections
        capacity: usize,
    },

    /// A connection endpoint does not name a node in the store
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    /// Both connection endpoints are the same node
    #[error("cannot connect node {0} to itself")]
    SelfConnection(NodeId),
}
