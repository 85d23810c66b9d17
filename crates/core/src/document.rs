//! Editable circuit state.
//!
//! The document owns its components, connections and id generator. Simulation
//! only ever sees a borrowed snapshot, so the solver itself keeps no state.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::AnalyzedComponent;
use crate::component::{Component, ComponentKind, Connection};
use crate::config::SimulationConfig;
use crate::errors::{CircuitError, Result};
use crate::result::SimulationResult;
use crate::simulate::simulate_with;

/// Mints ids for new components and connections.
pub trait IdGenerator {
    fn next_component_id(&mut self) -> String;
    fn next_connection_id(&mut self) -> String;

    /// Called for every id already present when a document is loaded.
    fn reserve(&mut self, _id: &str) {}
}

/// `node_0, node_1, …` and `edge_0, edge_1, …`.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next_node: u64,
    next_edge: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_component_id(&mut self) -> String {
        let id = format!("node_{}", self.next_node);
        self.next_node += 1;
        id
    }

    fn next_connection_id(&mut self) -> String {
        let id = format!("edge_{}", self.next_edge);
        self.next_edge += 1;
        id
    }

    fn reserve(&mut self, id: &str) {
        if let Some(n) = id.strip_prefix("node_").and_then(|n| n.parse::<u64>().ok()) {
            self.next_node = self.next_node.max(n + 1);
        } else if let Some(n) = id.strip_prefix("edge_").and_then(|n| n.parse::<u64>().ok()) {
            self.next_edge = self.next_edge.max(n + 1);
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_component_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }

    fn next_connection_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Plain components and connections, the unit handed to the solver and saved to disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CircuitSnapshot {
    #[serde(default, alias = "nodes")]
    pub components: Vec<Component>,
    #[serde(default, alias = "edges")]
    pub connections: Vec<Connection>,
}

impl CircuitSnapshot {
    pub fn simulate(&self, config: &SimulationConfig) -> SimulationResult {
        simulate_with(config, &self.components, &self.connections)
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

#[derive(Debug, Clone)]
pub struct CircuitDocument<G: IdGenerator = SequentialIds> {
    components: Vec<Component>,
    connections: Vec<Connection>,
    ids: G,
}

impl CircuitDocument<SequentialIds> {
    pub fn new() -> Self {
        Self::with_ids(SequentialIds::new())
    }
}

impl Default for CircuitDocument<SequentialIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> CircuitDocument<G> {
    pub fn with_ids(ids: G) -> Self {
        Self {
            components: Vec::new(),
            connections: Vec::new(),
            ids,
        }
    }

    pub fn from_snapshot(snapshot: CircuitSnapshot, ids: G) -> Self {
        let mut doc = Self::with_ids(ids);
        doc.replace(snapshot);
        doc
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Places a new part with its palette label and value.
    pub fn add(&mut self, kind: ComponentKind) -> &Component {
        let mut component = Component::new(self.ids.next_component_id(), kind);
        component.value = kind.palette_value().map(str::to_string);
        self.components.push(component);
        &self.components[self.components.len() - 1]
    }

    pub fn insert(&mut self, component: Component) -> Result<()> {
        if self.component(&component.id).is_some() {
            return Err(CircuitError::DuplicateComponent(component.id));
        }
        self.ids.reserve(&component.id);
        self.components.push(component);
        Ok(())
    }

    /// Wires two existing components together and returns the new connection id.
    pub fn connect(&mut self, source_id: &str, target_id: &str) -> Result<String> {
        for id in [source_id, target_id] {
            if self.component(id).is_none() {
                return Err(CircuitError::UnknownComponent(id.to_string()));
            }
        }
        if source_id == target_id {
            return Err(CircuitError::SelfConnection(source_id.to_string()));
        }
        let id = self.ids.next_connection_id();
        self.connections
            .push(Connection::new(id.clone(), source_id, target_id));
        Ok(id)
    }

    /// Removes a component together with every wire touching it.
    pub fn remove_component(&mut self, id: &str) -> Result<Component> {
        let pos = self
            .components
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CircuitError::UnknownComponent(id.to_string()))?;
        self.connections.retain(|c| !c.touches(id));
        Ok(self.components.remove(pos))
    }

    pub fn remove_connection(&mut self, id: &str) -> Result<Connection> {
        let pos = self
            .connections
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CircuitError::UnknownConnection(id.to_string()))?;
        Ok(self.connections.remove(pos))
    }

    fn component_mut(&mut self, id: &str) -> Result<&mut Component> {
        self.components
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| CircuitError::UnknownComponent(id.to_string()))
    }

    pub fn set_switch(&mut self, id: &str, closed: bool) -> Result<()> {
        let component = self.component_mut(id)?;
        if !component.kind.is_switch() {
            return Err(CircuitError::NotASwitch(id.to_string()));
        }
        component.closed = Some(closed);
        Ok(())
    }

    /// Flips a switch and returns its new state.
    pub fn toggle_switch(&mut self, id: &str) -> Result<bool> {
        let closed = !self
            .component(id)
            .ok_or_else(|| CircuitError::UnknownComponent(id.to_string()))?
            .is_closed();
        self.set_switch(id, closed)?;
        Ok(closed)
    }

    pub fn set_value(&mut self, id: &str, value: Option<String>) -> Result<()> {
        self.component_mut(id)?.value = value;
        Ok(())
    }

    pub fn set_label(&mut self, id: &str, label: impl Into<String>) -> Result<()> {
        self.component_mut(id)?.label = label.into();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.components.clear();
        self.connections.clear();
    }

    /// Swaps in a whole snapshot, e.g. a reconstructed circuit.
    pub fn replace(&mut self, snapshot: CircuitSnapshot) {
        for component in &snapshot.components {
            self.ids.reserve(&component.id);
        }
        for connection in &snapshot.connections {
            self.ids.reserve(&connection.id);
        }
        self.components = snapshot.components;
        self.connections = snapshot.connections;
    }

    /// Replaces the document with unwired parts from an analysis parts list.
    pub fn load_analyzed_parts(&mut self, parts: &[AnalyzedComponent]) {
        self.clear();
        for part in parts {
            let id = self.ids.next_component_id();
            self.components.push(part.to_component(id));
        }
        info!(parts = parts.len(), "loaded analyzed parts");
    }

    pub fn snapshot(&self) -> CircuitSnapshot {
        CircuitSnapshot {
            components: self.components.clone(),
            connections: self.connections.clone(),
        }
    }

    pub fn simulate(&self) -> SimulationResult {
        self.simulate_with(&SimulationConfig::default())
    }

    pub fn simulate_with(&self, config: &SimulationConfig) -> SimulationResult {
        simulate_with(config, &self.components, &self.connections)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    pub fn from_json(input: &str, ids: G) -> Result<Self> {
        Ok(Self::from_snapshot(CircuitSnapshot::from_json_str(input)?, ids))
    }
}
