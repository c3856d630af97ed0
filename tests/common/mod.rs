#![allow(dead_code)]

use dsp_calculator::Catalog;

pub const CHAIN_YAML: &str = r#"
facilities:
  smelter:
    Arc Smelter: 1
  assembler:
    Assembling Machine Mk. I: 1
  mine:
    Mining Machine: 1

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
"#;

pub fn chain_catalog() -> Catalog {
    Catalog::from_yaml(CHAIN_YAML).expect("test data should parse")
}

pub fn targets(steps: &[dsp_calculator::ProductionStep<'_>]) -> Vec<String> {
    steps.iter().map(|s| s.target.clone()).collect()
}
