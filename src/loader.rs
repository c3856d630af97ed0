//! Catalog data loading
//!
//! Reads YAML data files describing facilities and processes. A data path
//! may be a single file or a directory, in which case every `.yml`/`.yaml`
//! file below it is merged in file-name order.

use std::fmt;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::models::{FacilityGroup, FacilityVariant, Process};

/// Catalog bundled into the binary, used when no data path is given.
pub const SAMPLE_DATA: &str = include_str!("../data/sample.yml");

/// The contents of one or more data files before indexing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CatalogSource {
    #[serde(deserialize_with = "facility_groups")]
    pub facilities: Vec<FacilityGroup>,
    pub processes: Vec<Process>,
}

impl CatalogSource {
    /// Parse one YAML document. `origin` names the document in errors.
    pub fn parse(text: &str, origin: &str) -> Result<Self, CatalogError> {
        if is_blank(text) {
            return Ok(Self::default());
        }

        let source: Self = serde_yaml::from_str(text).map_err(|source| CatalogError::Parse {
            origin: origin.to_string(),
            source,
        })?;

        for (position, process) in source.processes.iter().enumerate() {
            check_process(process).map_err(|reason| CatalogError::InvalidProcess {
                origin: origin.to_string(),
                position: position + 1,
                reason,
            })?;
        }

        Ok(source)
    }

    /// Append another document. Nothing is deduplicated; repeated facility
    /// types are left for validation to report.
    pub fn merge(&mut self, other: CatalogSource) {
        self.facilities.extend(other.facilities);
        self.processes.extend(other.processes);
    }

    pub fn into_catalog(self) -> Catalog {
        Catalog::new(self.facilities, self.processes)
    }
}

impl Catalog {
    pub fn from_yaml(text: &str) -> Result<Self, CatalogError> {
        Ok(CatalogSource::parse(text, "data")?.into_catalog())
    }

    pub fn sample() -> Result<Self, CatalogError> {
        Ok(CatalogSource::parse(SAMPLE_DATA, "built-in data")?.into_catalog())
    }
}

/// Load a catalog from a data file or a directory of data files.
pub fn load_path(path: &Path) -> Result<Catalog, CatalogError> {
    let files = if path.is_dir() {
        let files = find_data_files(path)?;
        if files.is_empty() {
            return Err(CatalogError::NoDataFiles {
                dir: path.to_path_buf(),
            });
        }
        files
    } else {
        vec![path.to_path_buf()]
    };

    let mut source = CatalogSource::default();
    for file in &files {
        source.merge(read_source(file)?);
    }

    let catalog = source.into_catalog();
    info!(
        path = %path.display(),
        files = files.len(),
        facilities = catalog.facilities().len(),
        processes = catalog.processes().len(),
        "loaded catalog"
    );
    Ok(catalog)
}

/// Find all YAML data files below `dir`, sorted by path.
pub fn find_data_files(dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        let is_yaml = path
            .extension()
            .is_some_and(|ext| ext == "yml" || ext == "yaml");
        if entry.file_type().is_file() && is_yaml {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

fn read_source(path: &Path) -> Result<CatalogSource, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let source = CatalogSource::parse(&content, &path.display().to_string())?;
    debug!(
        path = %path.display(),
        processes = source.processes.len(),
        "read data file"
    );
    Ok(source)
}

fn check_process(process: &Process) -> Result<(), String> {
    if process.makes.is_empty() {
        return Err("process makes nothing".to_string());
    }
    if !(process.time.is_finite() && process.time > 0.0) {
        return Err(format!("time must be positive, got {}", process.time));
    }
    let mut quantities = process.makes.iter().chain(&process.consumes);
    if let Some((item, _)) = quantities.find(|(_, quantity)| **quantity == 0) {
        return Err(format!("zero quantity for {item}"));
    }
    Ok(())
}

/// Whitespace, comments and document markers only.
fn is_blank(text: &str) -> bool {
    text.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

/// Deserialize `type -> variant -> speed` keeping declaration order and any
/// repeated keys, so duplicates stay visible to validation.
fn facility_groups<'de, D>(deserializer: D) -> Result<Vec<FacilityGroup>, D::Error>
where
    D: Deserializer<'de>,
{
    let groups = OrderedPairs::<OrderedPairs<f64>>::deserialize(deserializer)?;
    Ok(groups
        .0
        .into_iter()
        .map(|(name, variants)| FacilityGroup {
            name,
            variants: variants
                .0
                .into_iter()
                .map(|(name, speed)| FacilityVariant { name, speed })
                .collect(),
        })
        .collect())
}

/// A mapping read as a list of entries.
struct OrderedPairs<V>(Vec<(String, V)>);

impl<'de, V> Deserialize<'de> for OrderedPairs<V>
where
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PairsVisitor<V>(PhantomData<V>);

        impl<'de, V> Visitor<'de> for PairsVisitor<V>
        where
            V: Deserialize<'de>,
        {
            type Value = OrderedPairs<V>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a mapping")
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(OrderedPairs(Vec::new()))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, V>()? {
                    pairs.push(entry);
                }
                Ok(OrderedPairs(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor(PhantomData))
    }
}
