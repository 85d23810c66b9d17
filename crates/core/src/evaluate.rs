//! Ohm's-law evaluation of the chosen loop.
//!
//! Only one loop is evaluated. Every component on it carries the loop
//! current; everything else is reported as off.

use crate::component::{Component, ComponentKind};
use crate::config::SimulationConfig;
use crate::graph::CircuitGraph;
use crate::paths::CircuitPath;
use crate::result::{ComponentResult, ConnectionState, HazardWarning, Status};
use crate::units::{Milliamps, Resistance, Voltage};

#[derive(Debug, Clone)]
pub struct PathEvaluation<'p> {
    pub path: &'p CircuitPath,
    pub voltage: Voltage,
    pub resistance: Resistance,
    pub current: Milliamps,
}

impl<'p> PathEvaluation<'p> {
    pub fn evaluate(graph: &CircuitGraph<'_>, path: &'p CircuitPath, config: &SimulationConfig) -> Self {
        let voltage = graph.component(path.source()).source_voltage(config);
        let resistance: Resistance = path
            .nodes
            .iter()
            .map(|&idx| graph.component(idx).series_resistance(config))
            .sum();
        let current = Milliamps::ohms_law(voltage, resistance, config.min_divisor_ohms);
        Self { path, voltage, resistance, current }
    }

    pub fn power_milliwatts(&self) -> f64 {
        self.voltage.volts() * self.current.milliamps()
    }

    /// Voltage across one component of this loop.
    pub fn component_voltage(&self, component: &Component, config: &SimulationConfig) -> f64 {
        match component.kind {
            ComponentKind::Resistor => self.current.drop_across(component.series_resistance(config)),
            ComponentKind::Led => config.led_forward_volts,
            ComponentKind::Battery => component.source_voltage(config).volts(),
            _ => 0.0,
        }
    }
}

pub fn assign_status(kind: ComponentKind, on_path: bool, flagged: bool) -> Status {
    match (on_path, flagged) {
        (false, _) => Status::Off,
        (true, true) => Status::Warning,
        (true, false) if kind.glows() => Status::On,
        (true, false) => Status::Normal,
    }
}

pub fn component_results(
    graph: &CircuitGraph<'_>,
    evaluation: &PathEvaluation<'_>,
    warnings: &[HazardWarning],
    config: &SimulationConfig,
) -> Vec<ComponentResult> {
    graph
        .components()
        .iter()
        .enumerate()
        .map(|(idx, component)| {
            let on_path = evaluation.path.contains(idx);
            let flagged = warnings.iter().any(|w| w.names(&component.id));
            let (voltage, current) = if on_path {
                (
                    evaluation.component_voltage(component, config),
                    evaluation.current.milliamps(),
                )
            } else {
                (0.0, 0.0)
            };
            ComponentResult {
                id: component.id.clone(),
                kind: component.kind,
                label: component.label.clone(),
                voltage,
                current_milliamps: current,
                status: assign_status(component.kind, on_path, flagged),
            }
        })
        .collect()
}

/// A wire is active when any active loop runs through it, not only the
/// evaluated one. Active wires carry the evaluated loop current.
pub fn connection_states(
    graph: &CircuitGraph<'_>,
    evaluation: &PathEvaluation<'_>,
    active_loops: &[&CircuitPath],
) -> Vec<ConnectionState> {
    graph
        .connections()
        .iter()
        .enumerate()
        .map(|(idx, connection)| {
            let active = active_loops.iter().any(|path| path.uses_connection(idx));
            ConnectionState {
                id: connection.id.clone(),
                active,
                current_milliamps: if active { evaluation.current.milliamps() } else { 0.0 },
            }
        })
        .collect()
}

/// Every component off and every wire idle.
pub fn all_off(graph: &CircuitGraph<'_>) -> (Vec<ComponentResult>, Vec<ConnectionState>) {
    let components = graph
        .components()
        .iter()
        .map(|component| ComponentResult {
            id: component.id.clone(),
            kind: component.kind,
            label: component.label.clone(),
            voltage: 0.0,
            current_milliamps: 0.0,
            status: Status::Off,
        })
        .collect();
    let connections = graph
        .connections()
        .iter()
        .map(|connection| ConnectionState {
            id: connection.id.clone(),
            active: false,
            current_milliamps: 0.0,
        })
        .collect();
    (components, connections)
}
