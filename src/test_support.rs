//! Shared fixtures for unit tests

use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::models::Process;

pub const FIXTURE_YAML: &str = r#"
facilities:
  smelter:
    Arc Smelter: 1
    Plane Smelter: 2
  assembler:
    Assembling Machine Mk. I: 0.75
    Assembling Machine Mk. II: 1
  mine:
    Mining Machine: 1
  extractor:
    Oil Extractor: 1
  refinery:
    Oil Refinery: 1
  collector:
    Orbital Collector: 1

processes:
  - makes:
      Iron Ore: 1
    time: 2
    facility: [ mine ]

  - makes:
      Copper Ore: 1
    time: 2
    facility: [ mine ]

  - makes:
      Iron Ingot: 1
    consumes:
      Iron Ore: 1
    time: 1
    facility: [ smelter ]

  - makes:
      Copper Ingot: 1
    consumes:
      Copper Ore: 1
    time: 1
    facility: [ smelter ]

  - makes:
      Gear: 1
    consumes:
      Iron Ingot: 1
    time: 1
    facility: [ assembler ]

  - makes:
      Circuit Board: 2
    consumes:
      Iron Ingot: 2
      Copper Ingot: 1
    time: 1
    facility: [ assembler ]

  - makes:
      Electric Motor: 1
    consumes:
      Iron Ore: 2
      Gear: 1
    time: 2
    facility: [ assembler ]

  - makes:
      Special Item: 1
    consumes:
      Iron Ingot: 1
    time: 1
    facility: [ assembler ]
    special: true

  - makes:
      Crude Oil: 1
    time: 1
    facility: [ extractor ]

  - makes:
      Refined Oil: 2
      Hydrogen: 1
    consumes:
      Crude Oil: 2
    time: 4
    facility: [ refinery ]

  - makes:
      Hydrogen: 1
    time: 1
    facility: [ Orbital Collector, Orbital Collector Mk. II ]
    special: true
"#;

pub fn fixture_catalog() -> Catalog {
    Catalog::from_yaml(FIXTURE_YAML).expect("fixture should parse")
}

/// A one-second assembler process.
pub fn process(makes: &[(&str, u32)], consumes: &[(&str, u32)]) -> Process {
    let to_map = |entries: &[(&str, u32)]| -> BTreeMap<String, u32> {
        entries
            .iter()
            .map(|(item, quantity)| (item.to_string(), *quantity))
            .collect()
    };

    Process {
        makes: to_map(makes),
        consumes: to_map(consumes),
        time: 1.0,
        facility: vec!["assembler".to_string()],
        special: false,
    }
}
