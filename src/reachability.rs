//! Forward closure: everything producible from a starting inventory

use std::collections::HashSet;

use tracing::debug;

use crate::catalog::Catalog;
use crate::chain::ProductionChain;
use crate::models::ProductionStep;

impl<'c> ProductionChain<'c> {
    pub fn expand(&mut self) -> usize {
        self.expand_excluding::<&str>(&[])
    }

    /// Treat the chain's targets as available and append a resolved step for
    /// every item that becomes producible, repeating until nothing changes.
    ///
    /// Extraction processes are ignored, so raw resources must already be in
    /// the chain. A process with any output in `excluded` is never used.
    /// Special processes are eligible. Appended steps carry no rate.
    ///
    /// Returns the number of steps appended.
    pub fn expand_excluding<S: AsRef<str>>(&mut self, excluded: &[S]) -> usize {
        let excluded: HashSet<&str> = excluded.iter().map(AsRef::as_ref).collect();
        let mut have: HashSet<String> = self.steps().iter().map(|s| s.target.clone()).collect();
        let catalog = self.catalog();
        let mut added = 0;
        let mut pass = 0;

        loop {
            pass += 1;
            let mut found_any = false;

            for process in catalog.processes() {
                if process.is_extraction() {
                    continue;
                }
                if process.outputs().any(|item| excluded.contains(item)) {
                    continue;
                }
                if process.outputs().all(|item| have.contains(item)) {
                    continue;
                }
                if !process.inputs().all(|item| have.contains(item)) {
                    continue;
                }

                found_any = true;
                for item in process.outputs() {
                    if have.insert(item.to_string()) {
                        self.push_step(ProductionStep::resolved(item, process));
                        added += 1;
                    }
                }
            }

            debug!(pass, added, "closure pass");
            if !found_any {
                break;
            }
        }

        added
    }
}

/// Steps producible from `old + new` (minus `exclude_new`) that are not
/// producible from `old` alone (minus `exclude_old`), in discovery order.
///
/// The seeded `new` items themselves are part of the result when `old`
/// could not already produce them.
pub fn closure_diff<'c, S: AsRef<str>>(
    catalog: &'c Catalog,
    old: &[S],
    new: &[S],
    exclude_old: &[S],
    exclude_new: &[S],
) -> Vec<ProductionStep<'c>> {
    let mut before = catalog.new_chain(old.iter().map(|s| s.as_ref().to_string()));
    before.expand_excluding(exclude_old);

    let mut after = catalog.new_chain(
        old.iter()
            .chain(new)
            .map(|s| s.as_ref().to_string()),
    );
    after.expand_excluding(exclude_new);

    after
        .steps()
        .iter()
        .filter(|step| !before.contains(&step.target))
        .cloned()
        .collect()
}
