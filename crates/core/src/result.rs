use serde::{Deserialize, Serialize};

use crate::component::ComponentKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Off,
    On,
    Normal,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    NoSource,
    OpenCircuit,
    ShortCircuit,
    NoResistor,
    Overcurrent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardWarning {
    pub kind: WarningKind,
    pub severity: Severity,
    pub message: String,
    pub affected_ids: Vec<String>,
}

impl HazardWarning {
    pub fn names(&self, id: &str) -> bool {
        self.affected_ids.iter().any(|a| a == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentResult {
    pub id: String,
    pub kind: ComponentKind,
    pub label: String,
    pub voltage: f64,
    pub current_milliamps: f64,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionState {
    pub id: String,
    pub active: bool,
    pub current_milliamps: f64,
}

/// Outcome of one simulation run, recomputed from scratch every time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub total_voltage: f64,
    pub total_resistance: f64,
    pub total_current_milliamps: f64,
    pub total_power_milliwatts: f64,
    pub per_component: Vec<ComponentResult>,
    pub warnings: Vec<HazardWarning>,
    pub per_connection: Vec<ConnectionState>,
}

impl SimulationResult {
    pub fn component(&self, id: &str) -> Option<&ComponentResult> {
        self.per_component.iter().find(|c| c.id == id)
    }

    pub fn connection(&self, id: &str) -> Option<&ConnectionState> {
        self.per_connection.iter().find(|c| c.id == id)
    }

    pub fn warnings_of(&self, kind: WarningKind) -> impl Iterator<Item = &HazardWarning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }

    pub fn has_warning(&self, kind: WarningKind) -> bool {
        self.warnings_of(kind).next().is_some()
    }

    pub fn is_energized(&self) -> bool {
        self.total_current_milliamps > 0.0
    }

    pub fn has_danger(&self) -> bool {
        self.warnings.iter().any(|w| w.severity == Severity::Danger)
    }
}
