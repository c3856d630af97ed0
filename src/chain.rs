//! Production chains and demand-driven chain filling

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::catalog::Catalog;
use crate::error::ResolutionError;
use crate::models::ProductionStep;

/// An ordered list of production steps resolved against a catalog.
///
/// Steps are only ever appended. Their order is the order in which targets
/// were requested followed by the order in which dependencies were found,
/// and it is also the rendering order.
#[derive(Debug, Clone)]
pub struct ProductionChain<'c> {
    catalog: &'c Catalog,
    steps: Vec<ProductionStep<'c>>,
    /// target -> index of the first step with that target
    positions: HashMap<String, usize>,
}

impl Catalog {
    /// Start a chain with one unresolved step per target.
    pub fn new_chain<I, S>(&self, targets: I) -> ProductionChain<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ProductionChain::new(self, targets)
    }
}

impl<'c> ProductionChain<'c> {
    pub fn new<I, S>(catalog: &'c Catalog, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut chain = Self {
            catalog,
            steps: Vec::new(),
            positions: HashMap::new(),
        };
        for target in targets {
            chain.push_step(ProductionStep::new(target));
        }
        chain
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn steps(&self) -> &[ProductionStep<'c>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The first step producing `item`.
    pub fn step(&self, item: &str) -> Option<&ProductionStep<'c>> {
        self.positions.get(item).map(|&index| &self.steps[index])
    }

    pub fn rate_of(&self, item: &str) -> Option<f64> {
        self.step(item).map(|step| step.rate)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.positions.contains_key(item)
    }

    /// True once every step has a process attached.
    pub fn is_filled(&self) -> bool {
        self.steps.iter().all(ProductionStep::is_resolved)
    }

    /// Set the demanded rate of an item that is already in the chain.
    pub fn set_rate(&mut self, item: &str, rate: f64) -> Result<(), ResolutionError> {
        let index = *self
            .positions
            .get(item)
            .ok_or_else(|| ResolutionError::ItemNotFound {
                item: item.to_string(),
            })?;
        self.steps[index].rate = rate;
        Ok(())
    }

    pub fn fill(&mut self) -> Result<(), ResolutionError> {
        self.fill_excluding::<&str>(&[])
    }

    /// Resolve every unresolved step, adding steps for whatever they consume.
    ///
    /// Items in `excluded` are treated as already available: they are never
    /// added to the chain, and neither is anything needed only to make them.
    ///
    /// Rates flow from each resolved step to its inputs. An input shared by
    /// several consumers gets the sum of their demands. On error the chain
    /// is left partially filled and should be discarded.
    pub fn fill_excluding<S: AsRef<str>>(&mut self, excluded: &[S]) -> Result<(), ResolutionError> {
        let excluded: HashSet<&str> = excluded.iter().map(AsRef::as_ref).collect();

        // Pending steps in index order. New steps are always appended, so
        // this visits them in the same order as rescanning from the front.
        let mut queue: VecDeque<usize> = self
            .steps
            .iter()
            .enumerate()
            .filter(|(_, step)| !step.is_resolved())
            .map(|(index, _)| index)
            .collect();

        while let Some(index) = queue.pop_front() {
            let appended = self.resolve(index, &excluded)?;
            queue.extend(appended);
        }

        debug!(steps = self.steps.len(), "chain filled");
        Ok(())
    }

    /// Resolve a single step without exclusions.
    pub fn resolve_step(&mut self, index: usize) -> Result<(), ResolutionError> {
        self.resolve(index, &HashSet::new()).map(|_| ())
    }

    /// Attach a process to step `index` and push its demand onto the inputs.
    /// Returns the indices of newly appended steps.
    fn resolve(
        &mut self,
        index: usize,
        excluded: &HashSet<&str>,
    ) -> Result<Vec<usize>, ResolutionError> {
        let step = self
            .steps
            .get(index)
            .ok_or(ResolutionError::StepOutOfRange {
                index,
                len: self.steps.len(),
            })?;
        if step.is_resolved() {
            return Err(ResolutionError::AlreadyFilled {
                item: step.target.clone(),
            });
        }

        let target = step.target.clone();
        let rate = step.rate;
        let catalog = self.catalog;

        // Special producers never qualify here, and a target made only by
        // special processes is reported as having no processes at all.
        let process = catalog
            .producers(&target)
            .find(|process| !process.special)
            .ok_or_else(|| ResolutionError::NoProcesses {
                item: target.clone(),
            })?;

        let per_run = process.yield_of(&target);
        let runs_per_second = if per_run > 0 {
            rate / f64::from(per_run)
        } else {
            0.0
        };
        debug!(item = %target, rate, runs_per_second, "resolving step");

        let mut appended = Vec::new();
        for (input, &quantity) in &process.consumes {
            if excluded.contains(input.as_str()) {
                continue;
            }
            let required = runs_per_second * f64::from(quantity);
            match self.positions.get(input) {
                Some(&existing) => self.steps[existing].rate += required,
                None => {
                    let step = ProductionStep::with_rate(input.clone(), required);
                    appended.push(self.push_step(step));
                }
            }
        }

        self.steps[index].process = Some(process);
        Ok(appended)
    }

    pub(crate) fn push_step(&mut self, step: ProductionStep<'c>) -> usize {
        let index = self.steps.len();
        self.positions.entry(step.target.clone()).or_insert(index);
        self.steps.push(step);
        index
    }
}
