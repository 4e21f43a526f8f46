use crate::core::forcefield::params::ParameterTable;
use crate::core::io::mmff::MmffParameterFile;
use crate::core::io::traits::{ParamLoadError, ParameterFormat};
use itertools::Itertools;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Constructs a parameter table from a source path.
pub type FormatLoader = fn(&Path) -> Result<ParameterTable, ParamLoadError>;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RegistryError {
    #[error("Unknown parameter format: '{0}'")]
    UnknownFormat(String),
}

/// Maps format names to the functions that read them. Names are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct FormatRegistry {
    loaders: HashMap<String, FormatLoader>,
}

fn read_mmff(path: &Path) -> Result<ParameterTable, ParamLoadError> {
    MmffParameterFile::read_from_path(path)
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in MMFF94 reader under `mmff` and `mmff94`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("mmff", read_mmff);
        registry.register("mmff94", read_mmff);
        registry
    }

    /// Registers `loader` under `name`, returning the loader it replaced.
    pub fn register(&mut self, name: &str, loader: FormatLoader) -> Option<FormatLoader> {
        self.loaders.insert(name.to_ascii_lowercase(), loader)
    }

    pub fn create(&self, name: &str) -> Result<FormatLoader, RegistryError> {
        self.loaders
            .get(&name.to_ascii_lowercase())
            .copied()
            .ok_or_else(|| RegistryError::UnknownFormat(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loaders.contains_key(&name.to_ascii_lowercase())
    }

    pub fn names(&self) -> Vec<&str> {
        self.loaders.keys().map(String::as_str).sorted().collect()
    }
}
