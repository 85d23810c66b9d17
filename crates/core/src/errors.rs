use thiserror::Error;

#[derive(Debug, Error)]
pub enum CircuitError {
    #[error("Unknown component: {0}")]
    UnknownComponent(String),
    #[error("Unknown connection: {0}")]
    UnknownConnection(String),
    #[error("Duplicate component id: {0}")]
    DuplicateComponent(String),
    #[error("Component {0} cannot be connected to itself")]
    SelfConnection(String),
    #[error("Component {0} is not a switch")]
    NotASwitch(String),
    #[error("Invalid voltage: {0} V (must be ≥ 0 and finite)")]
    InvalidVoltage(f64),
    #[error("Invalid resistance: {0} Ω (must be ≥ 0 and finite)")]
    InvalidResistance(f64),
    #[error("Invalid config value for {field}: {value}")]
    InvalidConfig { field: &'static str, value: f64 },
    #[error("Search depth cap must be at least 1")]
    ZeroDepthCap,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CircuitError>;
