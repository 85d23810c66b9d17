#![allow(dead_code)]

use approx::assert_relative_eq;
use circuit_sketch_core::*;

pub mod strategies;

/// Epsilon for values derived through a single division or product.
pub const EPSILON_STRICT: f64 = 1e-9;

/// Epsilon for hand-computed figures quoted to one decimal place.
pub const EPSILON_QUOTED: f64 = 0.05;

/// Wires `ids` into one ring, closing back to the first id.
///
/// Connection ids are `w0, w1, …` in ring order.
pub fn ring(ids: &[&str]) -> Vec<Connection> {
    ids.iter()
        .zip(ids.iter().cycle().skip(1))
        .enumerate()
        .map(|(i, (a, b))| Connection::new(format!("w{i}"), *a, *b))
        .collect()
}

/// Battery, resistor and LED in one loop.
pub fn led_loop(volts: &str, ohms: &str) -> (Vec<Component>, Vec<Connection>) {
    let components = vec![
        Component::battery("bat", volts),
        Component::resistor("r1", ohms),
        Component::led("led"),
    ];
    (components, ring(&["bat", "r1", "led"]))
}

pub fn assert_current(result: &SimulationResult, expected_ma: f64) {
    assert_relative_eq!(
        result.total_current_milliamps,
        expected_ma,
        max_relative = EPSILON_STRICT
    );
}

pub fn status_of(result: &SimulationResult, id: &str) -> Status {
    result
        .component(id)
        .unwrap_or_else(|| panic!("no result for component {id}"))
        .status
}

pub fn is_all_zero(result: &SimulationResult) -> bool {
    result.total_voltage == 0.0
        && result.total_resistance == 0.0
        && result.total_current_milliamps == 0.0
        && result.total_power_milliwatts == 0.0
}
