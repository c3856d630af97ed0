//! Error types for catalog loading, validation and chain resolution

use std::path::PathBuf;

/// Errors raised while reading and parsing catalog data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("could not read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// A process that parsed but cannot describe a real recipe.
    #[error("invalid process #{position} in {origin}: {reason}")]
    InvalidProcess {
        origin: String,
        position: usize,
        reason: String,
    },

    #[error("could not scan data directory")]
    Walk(#[from] walkdir::Error),

    #[error("no .yml or .yaml files found in {dir}")]
    NoDataFiles { dir: PathBuf },
}

/// The first consistency problem found in a catalog.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("duplicate facility type: {0}")]
    DuplicateFacilityType(String),

    #[error("duplicate facility: {name}")]
    DuplicateFacility { group: String, name: String },

    #[error("facility rate is zero: {name}")]
    ZeroFacilityRate { group: String, name: String },

    #[error("item cannot be made: {0}")]
    Unmakeable(String),

    #[error("item cannot be made: {item} (dependency cycle {})", .cycle.join(" -> "))]
    CyclicDependency { item: String, cycle: Vec<String> },
}

/// Errors from chain resolution, rate lookups and unit conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolutionError {
    #[error("no processes found for target {item}")]
    NoProcesses { item: String },

    #[error("no non-special processes found for target {item}")]
    NoNonSpecialProcesses { item: String },

    #[error("chain already filled for target {item}")]
    AlreadyFilled { item: String },

    #[error("item not found in chain: {item}")]
    ItemNotFound { item: String },

    #[error("step {index} out of range for a chain of {len} steps")]
    StepOutOfRange { index: usize, len: usize },
}
