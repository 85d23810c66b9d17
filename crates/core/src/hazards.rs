use crate::config::SimulationConfig;
use crate::evaluate::PathEvaluation;
use crate::graph::CircuitGraph;
use crate::result::{HazardWarning, Severity, WarningKind};

pub fn no_source() -> HazardWarning {
    HazardWarning {
        kind: WarningKind::NoSource,
        severity: Severity::Warning,
        message: "No power source: add a battery to the circuit.".to_string(),
        affected_ids: Vec::new(),
    }
}

pub fn open_circuit(source_id: &str) -> HazardWarning {
    HazardWarning {
        kind: WarningKind::OpenCircuit,
        severity: Severity::Warning,
        message: format!("Open circuit: no closed loop returns to {source_id}."),
        affected_ids: vec![source_id.to_string()],
    }
}

/// Short circuit, missing current-limiting resistor and LED overcurrent checks.
///
/// The checks are independent; any combination may fire on one loop.
pub fn detect_hazards(
    graph: &CircuitGraph<'_>,
    evaluation: &PathEvaluation<'_>,
    config: &SimulationConfig,
) -> Vec<HazardWarning> {
    let mut warnings = Vec::new();
    let path = evaluation.path;

    if evaluation.resistance.ohms() < config.short_circuit_ohms {
        warnings.push(HazardWarning {
            kind: WarningKind::ShortCircuit,
            severity: Severity::Danger,
            message: format!(
                "Short circuit: loop resistance is {:.2} Ω, current is effectively unlimited.",
                evaluation.resistance.ohms()
            ),
            affected_ids: path
                .component_ids(graph)
                .into_iter()
                .map(str::to_string)
                .collect(),
        });
    }

    let leds: Vec<String> = path
        .nodes
        .iter()
        .map(|&idx| graph.component(idx))
        .filter(|c| c.kind.is_led())
        .map(|c| c.id.clone())
        .collect();
    if leds.is_empty() {
        return warnings;
    }

    let has_resistor = path
        .nodes
        .iter()
        .any(|&idx| graph.component(idx).kind.is_resistor());
    if !has_resistor {
        warnings.push(HazardWarning {
            kind: WarningKind::NoResistor,
            severity: Severity::Danger,
            message: "LED burn-out risk: add a current-limiting resistor.".to_string(),
            affected_ids: leds.clone(),
        });
    }

    let current = evaluation.current.milliamps();
    if current > config.led_max_current_ma {
        warnings.push(HazardWarning {
            kind: WarningKind::Overcurrent,
            severity: Severity::Warning,
            message: format!(
                "LED current exceeds its rating ({current:.1}mA > {:.0}mA).",
                config.led_max_current_ma
            ),
            affected_ids: leds,
        });
    }

    warnings
}
