use crate::graph::CircuitGraph;
use crate::paths::CircuitPath;

/// A loop carries current only when every switch on it is closed.
pub fn is_path_active(graph: &CircuitGraph<'_>, path: &CircuitPath) -> bool {
    path.nodes.iter().all(|&idx| graph.component(idx).conducts())
}

/// Active loops, in the order they were enumerated.
pub fn active_paths<'p>(graph: &CircuitGraph<'_>, paths: &'p [CircuitPath]) -> Vec<&'p CircuitPath> {
    paths.iter().filter(|path| is_path_active(graph, path)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Component, Connection};
    use crate::paths::enumerate_loops;

    #[test]
    fn open_switch_blocks_only_its_own_loop() {
        let components = vec![
            Component::battery("bat", "9V"),
            Component::switch("sw", false),
            Component::resistor("r1", "1k"),
            Component::resistor("r2", "1k"),
        ];
        let connections = vec![
            Connection::new("e0", "bat", "sw"),
            Connection::new("e1", "sw", "r1"),
            Connection::new("e2", "r1", "bat"),
            Connection::new("e3", "bat", "r2"),
            Connection::new("e4", "r2", "bat"),
        ];
        let graph = CircuitGraph::build(&components, &connections);
        let search = enumerate_loops(&graph, 0, 20);

        let active = active_paths(&graph, &search.paths);
        assert!(!active.is_empty());
        assert!(active.iter().all(|p| !p.contains(1)));
        assert!(search.paths.iter().any(|p| p.contains(1)));
    }

    #[test]
    fn switch_without_state_counts_as_open() {
        let mut switch = Component::switch("sw", true);
        switch.closed = None;
        let components = vec![Component::battery("bat", "9V"), switch];
        let connections = vec![
            Connection::new("e0", "bat", "sw"),
            Connection::new("e1", "sw", "bat"),
        ];
        let graph = CircuitGraph::build(&components, &connections);
        let search = enumerate_loops(&graph, 0, 20);

        assert_eq!(search.paths.len(), 2);
        assert!(active_paths(&graph, &search.paths).is_empty());
    }
}
