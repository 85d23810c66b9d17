/// strategies.rs
use proptest::prelude::*;
use circuit_sketch_core::*;
use circuit_sketch_core::parser::SiPrefix;

pub fn prefix_strategy() -> impl Strategy<Value = Option<SiPrefix>> {
    prop_oneof![
        Just(None),
        Just(Some(SiPrefix::Giga)),
        Just(Some(SiPrefix::Kilo)),
        Just(Some(SiPrefix::Milli)),
        Just(Some(SiPrefix::Micro)),
        Just(Some(SiPrefix::Nano)),
        Just(Some(SiPrefix::Pico)),
    ]
}

/// `(text, number, prefix)` where text is `<number><prefix><unit>`.
pub fn value_string_strategy() -> impl Strategy<Value = (String, f64, Option<SiPrefix>)> {
    (0u32..1_000_000, 0u32..4, prefix_strategy(), prop::sample::select(vec!["", "Ω", "V", "F", "A", "H"]))
        .prop_map(|(mantissa, decimals, prefix, unit)| {
            let number = mantissa as f64 / 10f64.powi(decimals as i32);
            let digits = format!("{number:.prec$}", prec = decimals as usize);
            let text = match prefix {
                Some(p) => format!("{digits}{}{unit}", p.symbol()),
                None => format!("{digits}{unit}"),
            };
            (text, digits.parse().unwrap(), prefix)
        })
}

pub fn component_kind_strategy() -> impl Strategy<Value = ComponentKind> {
    prop::sample::select(ComponentKind::ALL.to_vec())
}

pub fn component_strategy(id: String) -> impl Strategy<Value = Component> {
    (
        component_kind_strategy(),
        prop::option::of(prop_oneof!["[0-9]{1,4}[kmu]?[ΩV]?", "[a-z]{0,4}"]),
        any::<bool>(),
    )
        .prop_map(move |(kind, value, closed)| {
            let mut component = Component::new(id.clone(), kind);
            component.value = value;
            if kind.is_switch() {
                component.closed = Some(closed);
            }
            component
        })
}

/// Small snapshots with random wiring, including self-loops and parallel wires.
pub fn snapshot_strategy() -> impl Strategy<Value = CircuitSnapshot> {
    (1usize..=7)
        .prop_flat_map(|n| {
            let components: Vec<_> = (0..n).map(|i| component_strategy(format!("c{i}"))).collect();
            let wires = prop::collection::vec((0..n, 0..n), 0..=12);
            (components, wires)
        })
        .prop_map(|(components, wires)| {
            let connections = wires
                .into_iter()
                .enumerate()
                .map(|(i, (a, b))| Connection::new(format!("w{i}"), format!("c{a}"), format!("c{b}")))
                .collect();
            CircuitSnapshot { components, connections }
        })
}
