//! Loop enumeration from a power source.
//!
//! A loop leaves the source, visits distinct components and comes back to the
//! source over a wire it has not used yet. The search is a depth-first walk
//! with a hop cap, so dense graphs stay bounded even though the number of
//! loops grows exponentially with their density.

use tracing::{debug, warn};

use crate::graph::{CircuitGraph, ConnectionIndex, NodeIndex};

/// A closed loop through a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitPath {
    /// The source first, then each component in walk order. The source is not repeated.
    pub nodes: Vec<NodeIndex>,
    /// Wires in walk order, including the one closing the loop.
    pub connections: Vec<ConnectionIndex>,
}

impl CircuitPath {
    pub fn source(&self) -> NodeIndex {
        self.nodes[0]
    }

    pub fn contains(&self, node: NodeIndex) -> bool {
        self.nodes.contains(&node)
    }

    pub fn uses_connection(&self, connection: ConnectionIndex) -> bool {
        self.connections.contains(&connection)
    }

    pub fn component_ids<'a>(&self, graph: &CircuitGraph<'a>) -> Vec<&'a str> {
        self.nodes
            .iter()
            .map(|&idx| graph.component(idx).id.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoopSearch {
    pub paths: Vec<CircuitPath>,
    /// Set when some branch was cut off by the hop cap.
    pub depth_capped: bool,
}

impl LoopSearch {
    pub fn is_open_circuit(&self) -> bool {
        self.paths.is_empty()
    }
}

struct Walker<'g, 'a> {
    graph: &'g CircuitGraph<'a>,
    source: NodeIndex,
    max_depth: usize,
    on_path: Vec<bool>,
    nodes: Vec<NodeIndex>,
    connections: Vec<ConnectionIndex>,
    found: LoopSearch,
}

impl Walker<'_, '_> {
    fn walk(&mut self, current: NodeIndex, depth: usize) {
        if depth + 1 > self.max_depth {
            self.found.depth_capped = true;
            return;
        }
        let graph = self.graph;
        for adj in graph.adjacent(current) {
            if self.connections.contains(&adj.connection) {
                continue;
            }
            if adj.neighbor == self.source {
                if self.nodes.len() > 1 {
                    let mut connections = self.connections.clone();
                    connections.push(adj.connection);
                    self.found.paths.push(CircuitPath {
                        nodes: self.nodes.clone(),
                        connections,
                    });
                }
                continue;
            }
            if self.on_path[adj.neighbor] {
                continue;
            }

            self.on_path[adj.neighbor] = true;
            self.nodes.push(adj.neighbor);
            self.connections.push(adj.connection);

            self.walk(adj.neighbor, depth + 1);

            self.connections.pop();
            self.nodes.pop();
            self.on_path[adj.neighbor] = false;
        }
    }
}

/// Every loop through `source`, in depth-first discovery order.
pub fn enumerate_loops(graph: &CircuitGraph<'_>, source: NodeIndex, max_depth: usize) -> LoopSearch {
    let mut on_path = vec![false; graph.node_count()];
    on_path[source] = true;

    let mut walker = Walker {
        graph,
        source,
        max_depth,
        on_path,
        nodes: vec![source],
        connections: Vec::new(),
        found: LoopSearch::default(),
    };
    walker.walk(source, 0);

    let found = walker.found;
    let source_id = &graph.component(source).id;
    if found.depth_capped {
        warn!(source = %source_id, max_depth, "loop search hit the depth cap");
    }
    debug!(source = %source_id, loops = found.paths.len(), "enumerated loops");
    found
}
