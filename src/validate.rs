//! Catalog consistency checks
//!
//! Validation reports the first problem found rather than collecting all of
//! them. Facility checks run before item reachability.

use std::collections::HashSet;

use tracing::debug;

use crate::catalog::Catalog;
use crate::error::ValidationError;

/// Outcome of a reachability check for a single item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Makeability {
    Makeable,
    Unmakeable,
    /// Unmakeable, and the unmakeable items it depends on form a cycle.
    Cyclic(Vec<String>),
}

impl Catalog {
    /// Returns true if some producer of `item` has all of its inputs makeable.
    ///
    /// Extraction processes are the base case. Special processes count.
    pub fn makeable(&self, item: &str) -> bool {
        self.makeable_items().contains(item)
    }

    pub fn makeability(&self, item: &str) -> Makeability {
        let makeable = self.makeable_items();
        classify(self, &makeable, item)
    }

    /// Every item some chain of processes can produce from nothing.
    ///
    /// Computed as a least fixed point: start from extraction outputs and
    /// keep adding the outputs of processes whose inputs are all present
    /// until a pass adds nothing. Cycles need no special handling.
    pub fn makeable_items(&self) -> HashSet<&str> {
        let mut makeable: HashSet<&str> = HashSet::new();
        let mut pass = 0;

        loop {
            pass += 1;
            let mut added = false;
            for process in self.processes() {
                if process.inputs().all(|input| makeable.contains(input)) {
                    for output in process.outputs() {
                        added |= makeable.insert(output);
                    }
                }
            }
            if !added {
                break;
            }
        }

        debug!(pass, items = makeable.len(), "makeable set computed");
        makeable
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut group_names = HashSet::new();
        for group in self.facilities() {
            if !group_names.insert(group.name.as_str()) {
                return Err(ValidationError::DuplicateFacilityType(group.name.clone()));
            }
        }

        for group in self.facilities() {
            let mut variant_names = HashSet::new();
            for variant in &group.variants {
                if !variant_names.insert(variant.name.as_str()) {
                    return Err(ValidationError::DuplicateFacility {
                        group: group.name.clone(),
                        name: variant.name.clone(),
                    });
                }
            }
        }

        for group in self.facilities() {
            if let Some(variant) = group.variants.iter().find(|v| v.speed == 0.0) {
                return Err(ValidationError::ZeroFacilityRate {
                    group: group.name.clone(),
                    name: variant.name.clone(),
                });
            }
        }

        let items = self.items();
        let makeable = self.makeable_items();
        if let Some(item) = items.iter().find(|item| !makeable.contains(*item)) {
            return Err(match classify(self, &makeable, item) {
                Makeability::Cyclic(cycle) => ValidationError::CyclicDependency {
                    item: item.to_string(),
                    cycle,
                },
                _ => ValidationError::Unmakeable(item.to_string()),
            });
        }

        debug!(items = items.len(), "catalog validated");
        Ok(())
    }
}

fn classify(catalog: &Catalog, makeable: &HashSet<&str>, item: &str) -> Makeability {
    if makeable.contains(item) {
        return Makeability::Makeable;
    }
    match CycleSearch::new(catalog, makeable).find(item) {
        Some(cycle) => Makeability::Cyclic(cycle),
        None => Makeability::Unmakeable,
    }
}

/// Depth-first search for a cycle among unmakeable items, following the
/// unmakeable inputs of every producer. Each item is expanded at most once.
struct CycleSearch<'a> {
    catalog: &'a Catalog,
    makeable: &'a HashSet<&'a str>,
    in_progress: Vec<&'a str>,
    done: HashSet<&'a str>,
}

impl<'a> CycleSearch<'a> {
    fn new(catalog: &'a Catalog, makeable: &'a HashSet<&'a str>) -> Self {
        Self {
            catalog,
            makeable,
            in_progress: Vec::new(),
            done: HashSet::new(),
        }
    }

    fn find(&mut self, item: &'a str) -> Option<Vec<String>> {
        if self.done.contains(item) {
            return None;
        }
        if let Some(start) = self.in_progress.iter().position(|i| *i == item) {
            let mut cycle: Vec<String> =
                self.in_progress[start..].iter().map(|i| i.to_string()).collect();
            cycle.push(item.to_string());
            return Some(cycle);
        }

        self.in_progress.push(item);
        let catalog = self.catalog;
        for process in catalog.producers(item) {
            for input in process.inputs() {
                if self.makeable.contains(input) {
                    continue;
                }
                if let Some(cycle) = self.find(input) {
                    return Some(cycle);
                }
            }
        }
        self.in_progress.pop();
        self.done.insert(item);
        None
    }
}
