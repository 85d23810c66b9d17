//! Analysis documents returned by the circuit-analysis collaborators.
//!
//! Collaborator output is loosely structured text. It is normalized into a
//! [`CircuitAnalysis`] exactly once, here, and every field has a default so
//! downstream code never re-validates it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::component::{Component, ComponentKind, Connection};
use crate::document::CircuitSnapshot;

/// How many times a document may be found wrapped inside a JSON string.
pub const MAX_UNWRAP_DEPTH: usize = 3;

/// Length of the raw-text summary used when nothing else can be recovered.
pub const FALLBACK_SUMMARY_CHARS: usize = 500;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CircuitAnalysis {
    pub summary: String,
    pub components: Vec<AnalyzedComponent>,
    pub errors: Vec<AnalysisError>,
    pub calculations: Vec<Calculation>,
    pub alternatives: Vec<Alternative>,
    pub causal_explanations: Vec<CausalExplanation>,
    pub real_world_factors: Vec<RealWorldFactor>,
    pub danger_warnings: Vec<DangerWarning>,
    pub optimizations: Vec<Optimization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconstructed_circuit: Option<ReconstructedCircuit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzedComponent {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub quantity: u32,
}

impl Default for AnalyzedComponent {
    fn default() -> Self {
        Self {
            name: String::new(),
            type_name: String::new(),
            value: None,
            quantity: 1,
        }
    }
}

impl AnalyzedComponent {
    /// Unrecognised part types become resistors.
    pub fn kind(&self) -> ComponentKind {
        ComponentKind::from_name(&self.type_name).unwrap_or(ComponentKind::Resistor)
    }

    pub fn to_component(&self, id: String) -> Component {
        let kind = self.kind();
        let mut component = Component::new(id, kind);
        if !self.name.is_empty() {
            component.label = self.name.clone();
        }
        component.value = self.value.clone().filter(|v| !v.is_empty());
        component
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum ErrorSeverity {
    #[default]
    Warning,
    Error,
    Critical,
}

impl From<String> for ErrorSeverity {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "critical" => Self::Critical,
            "error" => Self::Error,
            _ => Self::Warning,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum DangerLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl From<String> for DangerLevel {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "critical" => Self::Critical,
            "high" => Self::High,
            "medium" => Self::Medium,
            _ => Self::Low,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisError {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub severity: ErrorSeverity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calculation {
    pub parameter: String,
    pub value: String,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alternative {
    pub original: String,
    pub alternatives: Vec<String>,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CausalExplanation {
    pub issue: String,
    pub cause: String,
    pub effect: String,
    pub solution: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealWorldFactor {
    pub factor: String,
    pub impact: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DangerWarning {
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: DangerLevel,
    pub description: String,
    pub precaution: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Optimization {
    pub area: String,
    pub suggestion: String,
    pub benefit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructedNode {
    pub id: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructedEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A circuit redrawn by the image-analysis collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructedCircuit {
    pub description: String,
    pub nodes: Vec<ReconstructedNode>,
    pub edges: Vec<ReconstructedEdge>,
    pub improvements: Vec<String>,
}

impl ReconstructedCircuit {
    /// Converts to a solver snapshot.
    ///
    /// Unknown node types become resistors. Switches are closed only when
    /// their value says `on` or `closed`. Edges naming a missing node, and
    /// nodes without an id, are dropped.
    pub fn to_snapshot(&self) -> CircuitSnapshot {
        let components: Vec<Component> = self
            .nodes
            .iter()
            .filter(|node| !node.id.is_empty())
            .map(|node| {
                let kind = ComponentKind::from_name(&node.type_name).unwrap_or(ComponentKind::Resistor);
                let mut component = Component::new(node.id.clone(), kind);
                if !node.label.is_empty() {
                    component.label = node.label.clone();
                }
                component.value = node.value.clone().filter(|v| !v.is_empty());
                if kind.is_switch() {
                    let closed = component
                        .value
                        .as_deref()
                        .map(|v| matches!(v.trim().to_lowercase().as_str(), "on" | "closed"))
                        .unwrap_or(false);
                    component.closed = Some(closed);
                }
                component
            })
            .collect();

        let known = |id: &str| components.iter().any(|c| c.id == id);
        let connections: Vec<Connection> = self
            .edges
            .iter()
            .filter(|edge| {
                let keep = known(&edge.source) && known(&edge.target);
                if !keep {
                    warn!(id = %edge.id, "reconstructed edge names a missing node, dropping");
                }
                keep
            })
            .enumerate()
            .map(|(i, edge)| {
                let id = if edge.id.is_empty() { format!("edge-{}", i + 1) } else { edge.id.clone() };
                Connection::new(id, edge.source.clone(), edge.target.clone())
            })
            .collect();

        CircuitSnapshot { components, connections }
    }
}

impl CircuitAnalysis {
    /// Normalizes raw collaborator text into a document. Never fails.
    ///
    /// Tries, in order: the text as JSON (unwrapping string-wrapped and
    /// fenced documents), the text with truncated brackets closed, and
    /// finally a document carrying only a summary recovered from the text.
    pub fn from_model_text(text: &str) -> Self {
        let body = strip_code_fence(text.trim());
        if let Some(doc) = decode(body, 0) {
            return doc;
        }
        let repaired = repair_truncated_json(body);
        if let Some(doc) = decode(&repaired, 0) {
            debug!("recovered truncated analysis document");
            return doc;
        }
        warn!("analysis text is not a JSON document, keeping a summary only");
        let summary = extract_string_field(body, "summary")
            .unwrap_or_else(|| text.chars().take(FALLBACK_SUMMARY_CHARS).collect());
        Self {
            summary,
            ..Self::default()
        }
    }

    pub fn has_reconstruction(&self) -> bool {
        self.reconstructed_circuit
            .as_ref()
            .is_some_and(|c| !c.nodes.is_empty())
    }
}

fn decode(text: &str, depth: usize) -> Option<CircuitAnalysis> {
    let value: Value = serde_json::from_str(text).ok()?;
    from_value(value, depth)
}

fn from_value(value: Value, depth: usize) -> Option<CircuitAnalysis> {
    match value {
        Value::String(inner) if depth < MAX_UNWRAP_DEPTH => {
            decode(strip_code_fence(inner.trim()), depth + 1)
        }
        object @ Value::Object(_) => {
            let doc: CircuitAnalysis = serde_json::from_value(object).ok()?;
            let nested = doc.summary.trim_start();
            if depth < MAX_UNWRAP_DEPTH && nested.starts_with('{') {
                if let Some(inner) = decode(nested, depth + 1) {
                    return Some(inner);
                }
            }
            Some(doc)
        }
        _ => None,
    }
}

/// Returns the body of a markdown code fence, or the text unchanged.
fn strip_code_fence(text: &str) -> &str {
    let Some(start) = text.find("```") else {
        return text;
    };
    let after = &text[start + 3..];
    let after = after.strip_prefix("json").unwrap_or(after);
    match after.find("```") {
        Some(end) => after[..end].trim(),
        None => text,
    }
}

/// Closes whatever a truncated JSON text left open.
///
/// A string cut off mid-way becomes `""`, a dangling comma is dropped, a
/// dangling colon gets `null`, then open arrays and objects are closed in
/// nesting order.
pub fn repair_truncated_json(text: &str) -> String {
    let mut open = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    let mut string_start = 0;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                string_start = i;
            }
            '{' => open.push('}'),
            '[' => open.push(']'),
            '}' | ']' => {
                open.pop();
            }
            _ => {}
        }
    }

    let mut fixed = if in_string {
        format!("{}\"\"", &text[..string_start])
    } else {
        text.trim_end().to_string()
    };
    loop {
        let trimmed = fixed.trim_end();
        if let Some(stripped) = trimmed.strip_suffix(',') {
            fixed = stripped.to_string();
        } else if trimmed.ends_with(':') {
            fixed = format!("{trimmed} null");
            break;
        } else {
            fixed.truncate(trimmed.len());
            break;
        }
    }
    while let Some(closer) = open.pop() {
        fixed.push(closer);
    }
    fixed
}

/// Reads `"field": "…"` out of text that is not valid JSON as a whole.
fn extract_string_field(text: &str, field: &str) -> Option<String> {
    let key = format!("\"{field}\"");
    let rest = &text[text.find(&key)? + key.len()..];
    let rest = rest.trim_start().strip_prefix(':')?.trim_start();
    if !rest.starts_with('"') {
        return None;
    }
    let mut escaped = false;
    for (i, c) in rest.char_indices().skip(1) {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return serde_json::from_str(&rest[..=i]).ok(),
            _ => {}
        }
    }
    None
}
