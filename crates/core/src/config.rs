use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CircuitError, Result};

/// Tunable constants of the single-path solver.
///
/// Every field has a default, so a JSON override only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    /// Hop cap for loop enumeration.
    pub max_depth: usize,
    pub default_source_volts: f64,
    pub default_resistor_ohms: f64,
    /// Small-signal estimate for a standard 5mm LED.
    pub led_internal_ohms: f64,
    /// Typical red LED drop.
    pub led_forward_volts: f64,
    pub led_max_current_ma: f64,
    /// Loops below this resistance are reported as short circuits.
    pub short_circuit_ohms: f64,
    /// Smallest divisor used for Ohm's law.
    pub min_divisor_ohms: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_depth: 20,
            default_source_volts: 9.0,
            default_resistor_ohms: 220.0,
            led_internal_ohms: 10.0,
            led_forward_volts: 2.0,
            led_max_current_ma: 20.0,
            short_circuit_ohms: 1.0,
            min_divisor_ohms: 0.1,
        }
    }
}

impl SimulationConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(CircuitError::ZeroDepthCap);
        }
        let fields = [
            ("defaultSourceVolts", self.default_source_volts),
            ("defaultResistorOhms", self.default_resistor_ohms),
            ("ledInternalOhms", self.led_internal_ohms),
            ("ledForwardVolts", self.led_forward_volts),
            ("ledMaxCurrentMa", self.led_max_current_ma),
            ("shortCircuitOhms", self.short_circuit_ohms),
            ("minDivisorOhms", self.min_divisor_ohms),
        ];
        for (field, value) in fields {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(CircuitError::InvalidConfig { field, value });
            }
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
