//! Conversion between items per second and facility counts

use crate::catalog::Catalog;
use crate::error::ResolutionError;

impl Catalog {
    /// Items per second produced by one facility running the first
    /// selectable process for `item`.
    pub fn per_factory_rate(&self, item: &str) -> Result<f64, ResolutionError> {
        let process = self.first_selectable_producer(item)?;
        Ok(f64::from(process.yield_of(item)) / process.time)
    }

    pub fn factories_to_items_per_second(
        &self,
        item: &str,
        factories: f64,
    ) -> Result<f64, ResolutionError> {
        Ok(factories * self.per_factory_rate(item)?)
    }

    pub fn items_per_second_to_factories(
        &self,
        item: &str,
        rate: f64,
    ) -> Result<f64, ResolutionError> {
        Ok(rate / self.per_factory_rate(item)?)
    }
}
