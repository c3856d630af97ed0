//! Property-based tests over the built-in catalog.

use dsp_calculator::Catalog;
use proptest::prelude::*;

// ===========================================================================
// Generators
// ===========================================================================

/// Items in the built-in data with a selectable producer.
const CHAINABLE: &[&str] = &[
    "Iron Ingot",
    "Copper Ingot",
    "Gear",
    "Magnetic Coil",
    "Circuit Board",
    "Electric Motor",
    "Processor",
    "Plastic",
    "Graphene",
    "Energy Matrix",
    "Electromagnetic Matrix",
    "Prism",
    "Steel",
];

const RAW: &[&str] = &[
    "Iron Ore",
    "Copper Ore",
    "Stone",
    "Coal",
    "Silicon Ore",
    "Titanium Ore",
    "Water",
    "Crude Oil",
];

fn arb_item() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(CHAINABLE)
}

fn arb_targets() -> impl Strategy<Value = Vec<(&'static str, f64)>> {
    proptest::collection::vec((arb_item(), 0.1f64..100.0), 1..5)
}

fn arb_inventory() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::sample::subsequence(RAW, 0..=RAW.len())
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Converting factories to a rate and back gives the factory count.
    #[test]
    fn factory_conversion_round_trip(item in arb_item(), factories in 0.01f64..1000.0) {
        let catalog = Catalog::sample().unwrap();
        let rate = catalog.factories_to_items_per_second(item, factories).unwrap();
        let back = catalog.items_per_second_to_factories(item, rate).unwrap();

        prop_assert!((back - factories).abs() <= factories * 1e-12);
    }

    /// Filling terminates with every step resolved and no negative rates.
    #[test]
    fn fill_resolves_everything(targets in arb_targets()) {
        let catalog = Catalog::sample().unwrap();
        let mut chain = catalog.new_chain(targets.iter().map(|(item, _)| *item));
        for (item, rate) in &targets {
            chain.set_rate(item, *rate).unwrap();
        }
        chain.fill().unwrap();

        prop_assert!(chain.is_filled());
        prop_assert!(chain.steps().iter().all(|s| s.rate >= 0.0));
    }

    /// The same query always renders the same text.
    #[test]
    fn fill_is_deterministic(targets in arb_targets()) {
        let render = || {
            let catalog = Catalog::sample().unwrap();
            let mut chain = catalog.new_chain(targets.iter().map(|(item, _)| *item));
            for (item, rate) in &targets {
                chain.set_rate(item, *rate).unwrap();
            }
            chain.fill().unwrap();
            chain.to_string()
        };

        prop_assert_eq!(render(), render());
    }

    /// Demand scales linearly with the target rate.
    #[test]
    fn rates_scale_linearly(item in arb_item(), rate in 0.1f64..100.0) {
        let catalog = Catalog::sample().unwrap();

        let mut unit = catalog.new_chain([item]);
        unit.set_rate(item, 1.0).unwrap();
        unit.fill().unwrap();

        let mut scaled = catalog.new_chain([item]);
        scaled.set_rate(item, rate).unwrap();
        scaled.fill().unwrap();

        prop_assert_eq!(unit.len(), scaled.len());
        for (a, b) in unit.steps().iter().zip(scaled.steps()) {
            prop_assert_eq!(&a.target, &b.target);
            prop_assert!((a.rate * rate - b.rate).abs() <= 1e-9 * b.rate.max(1.0));
        }
    }

    /// A second closure pass with the same exclusions adds nothing.
    #[test]
    fn expand_is_idempotent(inventory in arb_inventory(), banned in proptest::option::of(arb_item())) {
        let catalog = Catalog::sample().unwrap();
        let excluded: Vec<&str> = banned.into_iter().collect();

        let mut chain = catalog.new_chain(inventory.iter().copied());
        chain.expand_excluding(&excluded);
        let len = chain.len();

        prop_assert_eq!(chain.expand_excluding(&excluded), 0);
        prop_assert_eq!(chain.len(), len);
        prop_assert!(chain.steps().iter().all(|s| !excluded.contains(&s.target.as_str())));
    }
}
