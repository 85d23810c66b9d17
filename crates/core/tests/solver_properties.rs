use std::collections::HashSet;

use proptest::prelude::*;
use circuit_sketch_core::*;

mod common;
use common::strategies::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Same snapshot in, same result out.
    #[test]
    fn prop_simulation_is_deterministic(snapshot in snapshot_strategy()) {
        let first = simulate(&snapshot.components, &snapshot.connections);
        let second = simulate(&snapshot.components, &snapshot.connections);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_aggregates_are_finite_and_non_negative(snapshot in snapshot_strategy()) {
        let result = simulate(&snapshot.components, &snapshot.connections);
        for value in [
            result.total_voltage,
            result.total_resistance,
            result.total_current_milliamps,
            result.total_power_milliwatts,
        ] {
            prop_assert!(value.is_finite() && value >= 0.0, "bad aggregate {value}");
        }
    }

    #[test]
    fn prop_sourceless_snapshots_report_once(snapshot in snapshot_strategy()) {
        let components: Vec<_> = snapshot
            .components
            .into_iter()
            .filter(|c| !c.kind.is_source())
            .collect();
        let result = simulate(&components, &snapshot.connections);

        prop_assert_eq!(result.total_current_milliamps, 0.0);
        prop_assert_eq!(result.warnings.len(), 1);
        prop_assert_eq!(result.warnings[0].kind, WarningKind::NoSource);
    }

    /// Every component and wire gets exactly one entry, in snapshot order.
    #[test]
    fn prop_results_cover_the_snapshot(snapshot in snapshot_strategy()) {
        let result = simulate(&snapshot.components, &snapshot.connections);
        if result.per_component.is_empty() {
            return Ok(());
        }
        let ids: Vec<_> = result.per_component.iter().map(|c| c.id.as_str()).collect();
        let expected: Vec<_> = snapshot.components.iter().map(|c| c.id.as_str()).collect();
        prop_assert_eq!(ids, expected);
        prop_assert_eq!(result.per_connection.len(), snapshot.connections.len());
    }

    /// Energized parts all carry the loop current; everything else is dark.
    #[test]
    fn prop_statuses_agree_with_current(snapshot in snapshot_strategy()) {
        let result = simulate(&snapshot.components, &snapshot.connections);
        for part in &result.per_component {
            if part.status == Status::Off {
                prop_assert_eq!(part.current_milliamps, 0.0);
            } else {
                prop_assert_eq!(part.current_milliamps, result.total_current_milliamps);
            }
        }
        for wire in &result.per_connection {
            if !wire.active {
                prop_assert_eq!(wire.current_milliamps, 0.0);
            }
        }
    }

    /// An energized loop never passes through an open switch.
    #[test]
    fn prop_open_switches_stay_dark(snapshot in snapshot_strategy()) {
        let result = simulate(&snapshot.components, &snapshot.connections);
        for component in snapshot.components.iter().filter(|c| !c.conducts()) {
            if let Some(part) = result.component(&component.id) {
                prop_assert_eq!(part.status, Status::Off);
            }
        }
    }

    /// Warnings only ever name components that exist.
    #[test]
    fn prop_warnings_name_known_components(snapshot in snapshot_strategy()) {
        let known: HashSet<_> = snapshot.components.iter().map(|c| c.id.as_str()).collect();
        let result = simulate(&snapshot.components, &snapshot.connections);
        for warning in &result.warnings {
            for id in &warning.affected_ids {
                prop_assert!(known.contains(id.as_str()), "unknown id {id}");
            }
        }
    }

    #[test]
    fn prop_flagged_parts_on_the_loop_are_warning(snapshot in snapshot_strategy()) {
        let result = simulate(&snapshot.components, &snapshot.connections);
        for part in result.per_component.iter().filter(|p| p.status != Status::Off) {
            let flagged = result.warnings.iter().any(|w| w.names(&part.id));
            prop_assert_eq!(part.status == Status::Warning, flagged);
        }
    }

    #[test]
    fn prop_depth_cap_never_panics(snapshot in snapshot_strategy(), max_depth in 1usize..6) {
        let config = SimulationConfig::default().with_max_depth(max_depth);
        let result = simulate_with(&config, &snapshot.components, &snapshot.connections);
        prop_assert!(result.total_current_milliamps.is_finite());
    }
}
