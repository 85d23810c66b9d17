use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::component::{Component, Connection};

pub type NodeIndex = usize;
pub type ConnectionIndex = usize;

/// One wire leaving a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjacent {
    pub neighbor: NodeIndex,
    pub connection: ConnectionIndex,
}

/// Undirected view of a circuit snapshot.
///
/// Node indices follow component order and connection indices follow
/// connection order, so traversal order is fully determined by the snapshot.
#[derive(Debug, Clone)]
pub struct CircuitGraph<'a> {
    components: &'a [Component],
    connections: &'a [Connection],
    index: HashMap<&'a str, NodeIndex>,
    adjacency: Vec<Vec<Adjacent>>,
}

impl<'a> CircuitGraph<'a> {
    pub fn build(components: &'a [Component], connections: &'a [Connection]) -> Self {
        let mut index = HashMap::with_capacity(components.len());
        for (idx, component) in components.iter().enumerate() {
            if let Entry::Vacant(slot) = index.entry(component.id.as_str()) {
                slot.insert(idx);
            } else {
                warn!(id = %component.id, "duplicate component id, keeping the first");
            }
        }

        let mut adjacency = vec![Vec::new(); components.len()];
        for (conn_idx, connection) in connections.iter().enumerate() {
            let (Some(&a), Some(&b)) = (
                index.get(connection.source_id.as_str()),
                index.get(connection.target_id.as_str()),
            ) else {
                warn!(id = %connection.id, "connection endpoint missing from snapshot, ignoring");
                continue;
            };
            if a == b {
                debug!(id = %connection.id, "self-connection carries no loop, ignoring");
                continue;
            }
            adjacency[a].push(Adjacent { neighbor: b, connection: conn_idx });
            adjacency[b].push(Adjacent { neighbor: a, connection: conn_idx });
        }

        debug!(nodes = components.len(), connections = connections.len(), "built circuit graph");
        Self { components, connections, index, adjacency }
    }

    pub fn node_count(&self) -> usize {
        self.components.len()
    }

    pub fn component(&self, idx: NodeIndex) -> &'a Component {
        &self.components[idx]
    }

    pub fn components(&self) -> &'a [Component] {
        self.components
    }

    pub fn connection(&self, idx: ConnectionIndex) -> &'a Connection {
        &self.connections[idx]
    }

    pub fn connections(&self) -> &'a [Connection] {
        self.connections
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub fn adjacent(&self, idx: NodeIndex) -> &[Adjacent] {
        &self.adjacency[idx]
    }

    /// Distinct neighbor ids of `id`, in wiring order.
    pub fn neighbors(&self, id: &str) -> Option<Vec<&'a str>> {
        let idx = self.index_of(id)?;
        let mut seen = HashSet::new();
        Some(
            self.adjacency[idx]
                .iter()
                .filter(|adj| seen.insert(adj.neighbor))
                .map(|adj| self.components[adj.neighbor].id.as_str())
                .collect(),
        )
    }

    /// Id-to-neighbor-set mapping; unconnected components map to an empty set.
    pub fn adjacency_map(&self) -> HashMap<&'a str, HashSet<&'a str>> {
        self.index
            .iter()
            .map(|(&id, &idx)| {
                let neighbors = self.adjacency[idx]
                    .iter()
                    .map(|adj| self.components[adj.neighbor].id.as_str())
                    .collect();
                (id, neighbors)
            })
            .collect()
    }

    /// Power sources in snapshot order.
    pub fn sources(&self) -> Vec<NodeIndex> {
        self.components
            .iter()
            .enumerate()
            .filter(|(idx, c)| c.kind.is_source() && self.index_of(&c.id) == Some(*idx))
            .map(|(idx, _)| idx)
            .collect()
    }
}
