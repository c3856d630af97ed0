//! The immutable recipe catalog and its item -> producer index

use std::collections::{HashMap, HashSet};

use crate::error::ResolutionError;
use crate::models::{FacilityGroup, Process};

/// Facilities and processes loaded from data files, plus an index from each
/// item to the processes that make it.
///
/// A catalog is built once and never mutated; chains borrow it for as long
/// as they live.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    facilities: Vec<FacilityGroup>,
    processes: Vec<Process>,
    /// item -> positions in `processes`, in declaration order
    index: HashMap<String, Vec<usize>>,
}

impl Catalog {
    pub fn new(facilities: Vec<FacilityGroup>, processes: Vec<Process>) -> Self {
        let mut index: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, process) in processes.iter().enumerate() {
            for item in process.outputs() {
                index.entry(item.to_string()).or_default().push(position);
            }
        }

        Self {
            facilities,
            processes,
            index,
        }
    }

    pub fn facilities(&self) -> &[FacilityGroup] {
        &self.facilities
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// All processes that make `item`, in declaration order.
    pub fn producers<'a>(&'a self, item: &str) -> impl Iterator<Item = &'a Process> + use<'a> {
        self.index
            .get(item)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&position| &self.processes[position])
    }

    /// The process used whenever a single producer has to be picked for
    /// `item`: the first non-special one in declaration order.
    ///
    /// There is deliberately no scoring here, so results are reproducible
    /// for a given data file.
    pub fn first_selectable_producer(&self, item: &str) -> Result<&Process, ResolutionError> {
        let mut producers = self.producers(item).peekable();
        if producers.peek().is_none() {
            return Err(ResolutionError::NoProcesses {
                item: item.to_string(),
            });
        }
        producers
            .find(|process| !process.special)
            .ok_or_else(|| ResolutionError::NoNonSpecialProcesses {
                item: item.to_string(),
            })
    }

    /// Items that are mined, pumped or otherwise made from nothing.
    pub fn resources(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.processes
            .iter()
            .filter(|process| process.is_extraction())
            .flat_map(Process::outputs)
            .filter(|item| seen.insert(*item))
            .collect()
    }

    /// Every item mentioned as an input or output, in order of first mention.
    pub fn items(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.processes
            .iter()
            .flat_map(|process| process.outputs().chain(process.inputs()))
            .filter(|item| seen.insert(*item))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture_catalog;

    #[test]
    fn index_keeps_declaration_order() {
        let catalog = fixture_catalog();
        let hydrogen: Vec<_> = catalog.producers("Hydrogen").collect();

        assert_eq!(hydrogen.len(), 2);
        assert!(hydrogen[0].consumes.contains_key("Crude Oil"));
        assert!(hydrogen[1].special);
    }

    #[test]
    fn unknown_item_has_no_producers() {
        let catalog = fixture_catalog();
        assert_eq!(catalog.producers("Nonexistent Item").count(), 0);
    }

    #[test]
    fn first_selectable_producer_skips_special() {
        let catalog = fixture_catalog();

        let gear = catalog.first_selectable_producer("Gear").unwrap();
        assert_eq!(gear.yield_of("Gear"), 1);

        assert_eq!(
            catalog.first_selectable_producer("Special Item"),
            Err(ResolutionError::NoNonSpecialProcesses {
                item: "Special Item".to_string()
            })
        );
        assert_eq!(
            catalog.first_selectable_producer("Nonexistent Item"),
            Err(ResolutionError::NoProcesses {
                item: "Nonexistent Item".to_string()
            })
        );
    }

    #[test]
    fn resources_are_deduplicated() {
        let catalog = fixture_catalog();
        assert_eq!(
            catalog.resources(),
            vec!["Iron Ore", "Copper Ore", "Crude Oil", "Hydrogen"]
        );
    }

    #[test]
    fn items_in_first_mention_order() {
        let catalog = fixture_catalog();
        let items = catalog.items();

        assert_eq!(&items[..3], &["Iron Ore", "Copper Ore", "Iron Ingot"]);
        assert!(items.contains(&"Special Item"));
        assert_eq!(
            items.len(),
            items.iter().collect::<HashSet<_>>().len(),
            "items should be unique"
        );
    }
}
