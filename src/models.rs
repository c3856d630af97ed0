//! Data models for recipes, facilities and production steps

use std::collections::BTreeMap;

use serde::Deserialize;

/// A recipe: fixed quantities in, fixed quantities out, fixed time per run.
///
/// `makes` and `consumes` are ordered maps so every walk over a process's
/// items is lexicographic by item name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Process {
    pub makes: BTreeMap<String, u32>,
    #[serde(default)]
    pub consumes: BTreeMap<String, u32>,
    /// Seconds per run
    pub time: f64,
    #[serde(default)]
    pub facility: Vec<String>,
    /// Never picked by chain resolution; still counts for reachability.
    #[serde(default)]
    pub special: bool,
}

impl Process {
    /// Quantity of `item` produced per run, 0 if this process doesn't make it.
    pub fn yield_of(&self, item: &str) -> u32 {
        self.makes.get(item).copied().unwrap_or(0)
    }

    /// True for mining, pumping and other processes with no inputs.
    pub fn is_extraction(&self) -> bool {
        self.consumes.is_empty()
    }

    pub fn outputs(&self) -> impl Iterator<Item = &str> {
        self.makes.keys().map(String::as_str)
    }

    pub fn inputs(&self) -> impl Iterator<Item = &str> {
        self.consumes.keys().map(String::as_str)
    }
}

/// One facility type ("smelter") and the variants that implement it.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityGroup {
    pub name: String,
    pub variants: Vec<FacilityVariant>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FacilityVariant {
    pub name: String,
    /// Speed multiplier relative to the base facility
    pub speed: f64,
}

/// One entry of a production chain
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionStep<'c> {
    pub target: String,
    /// `None` until the step is resolved against a catalog process
    pub process: Option<&'c Process>,
    /// Demand in items per second
    pub rate: f64,
}

impl<'c> ProductionStep<'c> {
    pub fn new(target: impl Into<String>) -> Self {
        Self::with_rate(target, 0.0)
    }

    pub fn with_rate(target: impl Into<String>, rate: f64) -> Self {
        Self {
            target: target.into(),
            process: None,
            rate,
        }
    }

    pub fn resolved(target: impl Into<String>, process: &'c Process) -> Self {
        Self {
            target: target.into(),
            process: Some(process),
            rate: 0.0,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.process.is_some()
    }
}
