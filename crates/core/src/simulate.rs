use tracing::debug;

use crate::activation::active_paths;
use crate::component::{Component, Connection};
use crate::config::SimulationConfig;
use crate::evaluate::{all_off, component_results, connection_states, PathEvaluation};
use crate::graph::CircuitGraph;
use crate::hazards::{detect_hazards, no_source, open_circuit};
use crate::paths::{enumerate_loops, CircuitPath, LoopSearch};
use crate::result::SimulationResult;

/// Runs the solver with the default constants.
pub fn simulate(components: &[Component], connections: &[Connection]) -> SimulationResult {
    simulate_with(&SimulationConfig::default(), components, connections)
}

/// Builds the graph, enumerates loops from every source, evaluates the first
/// active loop and collects hazard warnings.
///
/// Never fails: topological dead ends (no source, open circuit, every switch
/// open) are ordinary results with zero aggregates.
pub fn simulate_with(
    config: &SimulationConfig,
    components: &[Component],
    connections: &[Connection],
) -> SimulationResult {
    let graph = CircuitGraph::build(components, connections);

    let sources = graph.sources();
    if sources.is_empty() {
        debug!("no power source in snapshot");
        return SimulationResult {
            warnings: vec![no_source()],
            ..SimulationResult::default()
        };
    }

    let mut warnings = Vec::new();
    let mut searches: Vec<LoopSearch> = Vec::with_capacity(sources.len());
    for source in sources {
        let search = enumerate_loops(&graph, source, config.max_depth);
        if search.is_open_circuit() {
            warnings.push(open_circuit(&graph.component(source).id));
        } else {
            searches.push(search);
        }
    }
    if searches.is_empty() {
        return SimulationResult {
            warnings,
            ..SimulationResult::default()
        };
    }

    let active: Vec<&CircuitPath> = searches
        .iter()
        .flat_map(|search| active_paths(&graph, &search.paths))
        .collect();
    let Some(&path) = active.first() else {
        debug!("every loop is interrupted by an open switch");
        let (per_component, per_connection) = all_off(&graph);
        return SimulationResult {
            per_component,
            warnings,
            per_connection,
            ..SimulationResult::default()
        };
    };
    debug!(
        path = ?path.component_ids(&graph),
        active_loops = active.len(),
        "evaluating first active loop"
    );

    let evaluation = PathEvaluation::evaluate(&graph, path, config);
    warnings.extend(detect_hazards(&graph, &evaluation, config));

    SimulationResult {
        total_voltage: evaluation.voltage.volts(),
        total_resistance: evaluation.resistance.ohms(),
        total_current_milliamps: evaluation.current.milliamps(),
        total_power_milliwatts: evaluation.power_milliwatts(),
        per_component: component_results(&graph, &evaluation, &warnings, config),
        per_connection: connection_states(&graph, &evaluation, &active),
        warnings,
    }
}
