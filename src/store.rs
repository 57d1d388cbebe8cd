//! Append-only node and connection stores.
//!
//! Both stores grow on demand up to an explicit capacity limit. Entries are
//! addressed by their index, which never changes because nothing is removed.

use crate::error::CanvasError;
use crate::types::*;

/// Append-only collection of nodes.
#[derive(Debug, Clone)]
pub struct NodeStore {
    nodes: Vec<Node>,
    capacity_limit: usize,
}

impl NodeStore {
    /// Creates an empty store that accepts at most `capacity_limit` nodes.
    pub fn with_capacity_limit(capacity_limit: usize) -> Self {
        Self {
            nodes: Vec::new(),
            capacity_limit,
        }
    }

    /// Appends a node and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::NodeCapacity`] when the store is full; the store is
    /// left unchanged.
    pub fn add(&mut self, node: Node) -> Result<NodeId, CanvasError> {
        if self.nodes.len() >= self.capacity_limit {
            return Err(CanvasError::NodeCapacity {
                capacity: self.capacity_limit,
            });
        }
        self.nodes.push(node);
        Ok(NodeId(self.nodes.len() - 1))
    }

    /// Looks up a node by id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Looks up a node by id for in-place mutation.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Returns true if `id` names a node in this store.
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Iterates over nodes in append order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    /// Number of nodes stored.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the store holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Maximum number of nodes this store accepts.
    pub fn capacity_limit(&self) -> usize {
        self.capacity_limit
    }
}

/// Append-only collection of connections.
#[derive(Debug, Clone)]
pub struct ConnectionStore {
    connections: Vec<Connection>,
    capacity_limit: usize,
}

impl ConnectionStore {
    /// Creates an empty store that accepts at most `capacity_limit` connections.
    pub fn with_capacity_limit(capacity_limit: usize) -> Self {
        Self {
            connections: Vec::new(),
            capacity_limit,
        }
    }

    /// Appends a connection and returns its id.
    ///
    /// Endpoints are not checked here; see [`crate::Canvas::connect`].
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ConnectionCapacity`] when the store is full.
    pub fn add(&mut self, connection: Connection) -> Result<ConnectionId, CanvasError> {
        if self.connections.len() >= self.capacity_limit {
            return Err(CanvasError::ConnectionCapacity {
                capacity: self.capacity_limit,
            });
        }
        self.connections.push(connection);
        Ok(ConnectionId(self.connections.len() - 1))
    }

    /// Looks up a connection by id.
    pub fn get(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(id.0)
    }

    /// Iterates over connections in append order.
    pub fn iter(&self) -> impl Iterator<Item = (ConnectionId, &Connection)> {
        self.connections
            .iter()
            .enumerate()
            .map(|(i, connection)| (ConnectionId(i), connection))
    }

    /// Number of connections stored.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Returns true if the store holds no connections.
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Maximum number of connections this store accepts.
    pub fn capacity_limit(&self) -> usize {
        self.capacity_limit
    }
}
