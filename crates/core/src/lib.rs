//! Single-path DC solver for hand-drawn circuits.
//!
//! A circuit snapshot is a list of components and the wires between them.
//! [`simulate`] finds the loops running through each battery, keeps those
//! whose switches are all closed, evaluates the first one with Ohm's law and
//! reports short circuits, unprotected LEDs and LED overcurrent.
//!
//! ```
//! use circuit_sketch_core::{simulate, Component, Connection, WarningKind};
//!
//! let components = vec![
//!     Component::battery("bat", "9V"),
//!     Component::resistor("r1", "220Ω"),
//!     Component::led("led"),
//! ];
//! let connections = vec![
//!     Connection::new("e1", "bat", "r1"),
//!     Connection::new("e2", "r1", "led"),
//!     Connection::new("e3", "led", "bat"),
//! ];
//!
//! let result = simulate(&components, &connections);
//! assert!((result.total_resistance - 230.0).abs() < 1e-9);
//! assert!(result.has_warning(WarningKind::Overcurrent));
//! ```
//!
//! The solver is a pure function of its input. Editing state lives in
//! [`CircuitDocument`], and collaborator output is normalized by
//! [`CircuitAnalysis::from_model_text`].

pub mod activation;
pub mod analysis;
pub mod component;
pub mod config;
pub mod document;
pub mod errors;
pub mod evaluate;
pub mod graph;
pub mod hazards;
pub mod parser;
pub mod paths;
pub mod result;
pub mod simulate;
pub mod units;

pub use analysis::{CircuitAnalysis, ReconstructedCircuit};
pub use component::{Component, ComponentKind, Connection};
pub use config::SimulationConfig;
pub use document::{CircuitDocument, CircuitSnapshot, IdGenerator, SequentialIds, UuidIds};
pub use errors::{CircuitError, Result};
pub use result::{
    ComponentResult, ConnectionState, HazardWarning, Severity, SimulationResult, Status, WarningKind,
};
pub use simulate::{simulate, simulate_with};
