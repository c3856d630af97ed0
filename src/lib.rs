//! Dyson Sphere Program production calculator
//!
//! Works out the production chain needed to sustain a set of target items
//! at given rates, and everything that can be produced from a starting
//! inventory, using a catalog of recipes loaded from YAML.

pub mod catalog;
pub mod chain;
pub mod error;
pub mod loader;
pub mod models;
pub mod rates;
pub mod reachability;
pub mod render;
pub mod validate;

#[cfg(test)]
mod test_support;

pub use catalog::Catalog;
pub use chain::ProductionChain;
pub use error::{CatalogError, ResolutionError, ValidationError};
pub use models::{FacilityGroup, FacilityVariant, Process, ProductionStep};
pub use reachability::closure_diff;
pub use render::{Factories, ItemsPerSecond, RateUnits};
pub use validate::Makeability;
